use d1compare::{report, run_validation, tables};

// A two-row comparison fed from in-memory tables: one well-observed circuit
// and one long-path circuit with a single measured hour.
const CIRCUITS: &str = "\
ID ,TX,RX,Freq (MHz),TX Lat (D.M),TX Long (D.M),RX Lat (D.M),RX Long (D.M),Distance (km),SSN,Year,Month
  5,ALLOUIS,BOULDER,7.0,47.10N,002.12E,40.00N,105.16W,7858,50,85,1
169,CANBERRA,OTTAWA,9.5,35.18S,149.08E,45.25N,075.42W,23800,30,86,7
";

const MEASUREMENTS: &str = "\
 ID, Y, M,01,02,03,04,05,06,07,08,09,10,11,12,13,14,15,16,17,18,19,20,21,22,23,24
  5,85,01,-52,-54,-55,99,99,99,-58,-60,-61,-60,-59,-57,-55,-54,-53,-52,-51,-50,-50,-51,-52,-53,-54,-53
169,86,07,99,99,99,99,99,99,99,99,99,-72,99,99,99,99,99,99,99,99,99,99,99,99,99,99
";

const PREDICTIONS: &str = "\
 ID, Y, M,01,02,03,04,05,06,07,08,09,10,11,12,13,14,15,16,17,18,19,20,21,22,23,24
  5,85,01,-50,-51,-52,-53,-54,-55,-56,-57,-58,-57,-56,-55,-54,-53,-52,-51,-50,-49,-49,-50,-51,-52,-53,-52
169,86,07,-70,-70,-70,-70,-70,-70,-70,-70,-70,-70,-70,-70,-70,-70,-70,-70,-70,-70,-70,-70,-70,-70,-70,-70
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("D1 Measurement Bank Comparison - Simple Example");
    println!("===============================================");

    let outcome = run_validation(
        CIRCUITS.as_bytes(),
        MEASUREMENTS.as_bytes(),
        PREDICTIONS.as_bytes(),
    )?;

    println!(
        "\nCompared {} rows ({} hourly samples, {} rows skipped)\n",
        outcome.summary.rows_compared, outcome.summary.samples, outcome.summary.rows_skipped
    );

    println!("Per-hour difference table:");
    let mut diff_table = Vec::new();
    tables::write_diff_table(&outcome.records, &mut diff_table)?;
    print!("{}", String::from_utf8(diff_table)?);

    println!("\nStratified statistics:");
    report::write_report(&outcome.stats, std::io::stdout().lock())?;

    Ok(())
}
