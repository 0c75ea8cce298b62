/// Constants shared by the D1 comparison

/// Sentinel in the hourly tables meaning no measurement for that hour.
/// Matched exactly, never clipped. The prediction table reuses the same
/// value for off-scale levels (anything at or above 99.5 dB is written as
/// 99 by the upstream result-file reader); those arrive here as given data.
pub const NO_MEASUREMENT: i32 = 99;

/// Circuits at or above this ID in the D1 circuit table take the long way
/// around the great circle. This is a property of how the source table is
/// laid out, not a geometric rule.
pub const LONG_PATH_MIN_ID: u32 = 169;

pub const HOURS_PER_DAY: usize = 24;
