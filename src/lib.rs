//! Conversions between the proleptic Gregorian calendar, the Persian
//! (Solar Hijri) calendar and a linear fixed day count (day 1 = Gregorian
//! 0001-01-01). The interesting part is the Persian fast path: leap years
//! are placed by the 33-year cyclic rule plus a small bit-packed correction
//! table, which makes it match the true equinox-based calendar exactly for
//! years 1178 through 3000 without any astronomy at run time.

pub use correction::{BuildError, CorrectionTable, FIRST_YEAR, LAST_YEAR};
pub use equinox::{EquinoxOracle, SolarOracle, ORACLE_FIRST_YEAR, ORACLE_LAST_YEAR};
pub use error::{ConversionError, InvalidDate, OutOfRange, RangeError};
pub use fixed::FixedDay;
pub use gregorian::{fixed_from_gregorian, gregorian_from_fixed, GregorianDate};
pub use persian::{cycle_leap_year, AstronomicalPersian, FastPersian, PersianDate};

mod astronomy;
mod correction;
mod div_rem;
mod equinox;
mod error;
mod fixed;
pub mod gregorian;
mod gregorian_normalized_date;
mod persian;
pub mod verify;

#[cfg(test)]
mod tests {
    use super::*;

    // End-to-end: today's date through all three representations.
    #[test]
    fn test_cross_calendar_conversion() {
        let fast = FastPersian::builtin();
        let fixed = fixed_from_gregorian(GregorianDate::new(2025, 9, 23)).unwrap();
        let persian = fast.persian_from_fixed(fixed).unwrap();
        assert_eq!(persian, PersianDate::new(1404, 7, 1));
        assert_eq!(fast.fixed_from_persian(persian).unwrap(), fixed);
        assert_eq!(gregorian_from_fixed(fixed), GregorianDate::new(2025, 9, 23));
    }
}
