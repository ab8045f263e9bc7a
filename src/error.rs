use thiserror::Error;

/// The (year, month, day) triple does not name a day that exists in its
/// calendar, e.g. Gregorian February 30 or Esfand 30 of a non-leap year.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no day {day} in month {month} of year {year}")]
pub struct InvalidDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

/// The Persian year falls outside the range a converter is verified for.
/// Callers that need the answer anyway must use the astronomical path.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("persian year {year} is outside the supported range {first}..={last}")]
pub struct OutOfRange {
    pub year: i32,
    pub first: i32,
    pub last: i32,
}

/// The equinox oracle was asked about a year it cannot resolve.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("persian year {year} is outside the equinox oracle's span {oracle_first}..={oracle_last}")]
pub struct RangeError {
    pub year: i32,
    pub oracle_first: i32,
    pub oracle_last: i32,
}

/// Either failure mode of a date-to-fixed conversion.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionError {
    #[error(transparent)]
    InvalidDate(#[from] InvalidDate),
    #[error(transparent)]
    OutOfRange(#[from] OutOfRange),
}
