use crate::astronomy::MEAN_TROPICAL_YEAR;
use crate::equinox::EquinoxOracle;
use crate::error::{ConversionError, OutOfRange, RangeError};
use crate::fixed::FixedDay;

use super::{days_before_month, month_of_day_of_year, validate, PersianDate, PERSIAN_EPOCH};

/// Ground-truth Persian conversions. Every New-Year and leap-year decision
/// comes from the equinox oracle; nothing here is approximated, and nothing
/// here is fast. The fast converter's correction table is built from this
/// one and verified against it.
#[derive(Debug, Clone)]
pub struct AstronomicalPersian<O> {
    oracle: O,
}

impl<O: EquinoxOracle> AstronomicalPersian<O> {
    pub fn new(oracle: O) -> AstronomicalPersian<O> {
        AstronomicalPersian { oracle }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    fn new_year(&self, year: i32) -> Result<i64, OutOfRange> {
        self.oracle
            .vernal_equinox_new_year(year)
            .map(FixedDay::get)
            .map_err(oracle_out_of_range)
    }

    /// A year is leap exactly when 366 days separate its New Year from the
    /// next one.
    pub fn is_leap_year(&self, year: i32) -> Result<bool, OutOfRange> {
        Ok(self.new_year(year + 1)? - self.new_year(year)? == 366)
    }

    /// Fixed day number of a Persian date, per the equinox oracle.
    pub fn fixed_from_persian(&self, date: PersianDate) -> Result<FixedDay, ConversionError> {
        validate(date, self.is_leap_year(date.year)?)?;
        Ok(FixedDay::new(
            self.new_year(date.year)? - 1 + days_before_month(date.month) + date.day as i64,
        ))
    }

    /// Persian date containing a fixed day number, per the equinox oracle.
    pub fn persian_from_fixed(&self, fixed: FixedDay) -> Result<PersianDate, OutOfRange> {
        // Mean-year estimate of the year, then anchor on the oracle's New
        // Years; the loops absorb whatever the estimate is off by.
        let elapsed = (fixed.get() - PERSIAN_EPOCH.get()) as f64;
        let mut year = 1 + (elapsed / MEAN_TROPICAL_YEAR).floor() as i32;
        while self.new_year(year + 1)? <= fixed.get() {
            year += 1;
        }
        while self.new_year(year)? > fixed.get() {
            year -= 1;
        }
        let day_of_year = fixed.get() - self.new_year(year)? + 1;
        let month = month_of_day_of_year(day_of_year);
        let day = (day_of_year - days_before_month(month)) as u8;
        Ok(PersianDate { year, month, day })
    }
}

// The oracle's span plays the role of the supported range on this path.
fn oracle_out_of_range(error: RangeError) -> OutOfRange {
    OutOfRange {
        year: error.year,
        first: error.oracle_first,
        last: error.oracle_last,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equinox::SolarOracle;
    use crate::gregorian::{fixed_from_gregorian, GregorianDate};

    fn astronomical() -> AstronomicalPersian<SolarOracle> {
        AstronomicalPersian::new(SolarOracle::new())
    }

    fn gregorian(year: i32, month: u8, day: u8) -> FixedDay {
        fixed_from_gregorian(GregorianDate::new(year, month, day)).unwrap()
    }

    #[test]
    fn test_known_gregorian_correspondences() {
        let astronomical = astronomical();
        for (persian, (gy, gm, gd)) in [
            ((1403, 1, 1), (2024, 3, 20)),
            ((1404, 1, 1), (2025, 3, 21)),
            ((1399, 12, 30), (2021, 3, 20)),
            ((1357, 11, 22), (1979, 2, 11)),
        ] {
            let (py, pm, pd) = persian;
            let date = PersianDate::new(py, pm, pd);
            let fixed = astronomical.fixed_from_persian(date).unwrap();
            assert_eq!(fixed, gregorian(gy, gm, gd), "{:?}", date);
            assert_eq!(astronomical.persian_from_fixed(fixed).unwrap(), date);
        }
    }

    #[test]
    fn test_leap_years() {
        let astronomical = astronomical();
        assert!(astronomical.is_leap_year(1399).unwrap());
        assert!(!astronomical.is_leap_year(1400).unwrap());
        assert!(astronomical.is_leap_year(1403).unwrap());
        // The first correction year: cycle-leap, astronomically ordinary.
        assert!(!astronomical.is_leap_year(1502).unwrap());
        assert!(astronomical.is_leap_year(1503).unwrap());
    }

    #[test]
    fn test_invalid_dates() {
        let astronomical = astronomical();
        assert!(matches!(
            astronomical.fixed_from_persian(PersianDate::new(1402, 12, 30)),
            Err(ConversionError::InvalidDate(_))
        ));
        assert!(astronomical
            .fixed_from_persian(PersianDate::new(1403, 12, 30))
            .is_ok());
    }

    #[test]
    fn test_oracle_span_is_surfaced() {
        let astronomical = astronomical();
        assert!(matches!(
            astronomical.fixed_from_persian(PersianDate::new(0, 1, 1)),
            Err(ConversionError::OutOfRange(_))
        ));
        assert!(astronomical.is_leap_year(crate::equinox::ORACLE_LAST_YEAR).is_err());
    }
}
