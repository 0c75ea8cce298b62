use thiserror::Error;

#[derive(Debug, Error)]
pub enum D1Error {
    /// The prediction and measurement streams disagree on which circuit a row
    /// belongs to. Once alignment is lost no partial result is safe.
    #[error(
        "prediction/measurement streams disagree at row {position}: \
         prediction circuit {prediction_id}, measurement circuit {measurement_id}"
    )]
    Alignment {
        position: usize,
        prediction_id: u32,
        measurement_id: u32,
    },

    #[error(
        "prediction table has {predictions} rows but measurement table has {measurements} rows"
    )]
    LengthMismatch {
        predictions: usize,
        measurements: usize,
    },

    #[error("row {position}: circuit {id} is not in the catalog")]
    UnknownCircuit { position: usize, id: u32 },

    #[error("circuit {id}: bad {axis} coordinate {field:?}: {reason}")]
    BadCoordinate {
        id: u32,
        axis: &'static str,
        field: String,
        reason: String,
    },

    #[error("line {line}: {message}")]
    Table { line: usize, message: String },

    #[error("no row in the measurement table matched a catalog entry")]
    EmptyRun,

    #[error(transparent)]
    Geodesy(#[from] geodesy::GeodesyError),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
