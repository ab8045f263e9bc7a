//! The Persian (Solar Hijri) calendar. Months 1-6 have 31 days, months 7-11
//! have 30, and month 12 (Esfand) has 29 days, or 30 in a leap year. Where
//! the leap years fall is the whole question; `fast` answers it by
//! arithmetic plus a correction table, `astronomical` by asking an equinox
//! oracle.

pub use astronomical::AstronomicalPersian;
pub use fast::FastPersian;

mod astronomical;
mod fast;

use num_integer::Integer;

use crate::error::InvalidDate;
use crate::fixed::FixedDay;

/// Fixed day number of 1 Farvardin of year 1, i.e. March 19 of 622 CE
/// (Julian), the equinox of the year of the Hijra.
pub(crate) const PERSIAN_EPOCH: FixedDay = FixedDay::new(226_896);

/// A Persian calendar date. Plain data; conversions validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PersianDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl PersianDate {
    pub const fn new(year: i32, month: u8, day: u8) -> PersianDate {
        PersianDate { year, month, day }
    }
}

/// Leap-year placement of the plain 33-year cycle: 8 leap years per cycle,
/// on a fixed residue set modulo 33. This tracks the mean tropical year
/// closely but not exactly; the correction table covers the difference.
pub fn cycle_leap_year(year: i32) -> bool {
    (25 * year as i64 + 11).rem_euclid(33) < 8
}

pub(crate) fn days_in_month(month: u8, leap: bool) -> u8 {
    match month {
        1..=6 => 31,
        7..=11 => 30,
        _ => {
            if leap {
                30
            } else {
                29
            }
        }
    }
}

// Days of the year before `month` starts, 0 for Farvardin.
pub(crate) fn days_before_month(month: u8) -> i64 {
    let month = month as i64;
    if month <= 7 {
        31 * (month - 1)
    } else {
        30 * (month - 1) + 6
    }
}

// Month containing the 1-based day of the year. The first 186 days divide
// evenly into the six 31-day months; the rest divide by 30 after the 6
// surplus days are discarded.
pub(crate) fn month_of_day_of_year(day_of_year: i64) -> u8 {
    if day_of_year <= 186 {
        day_of_year.div_ceil(&31) as u8
    } else {
        (day_of_year - 6).div_ceil(&30) as u8
    }
}

pub(crate) fn validate(date: PersianDate, leap: bool) -> Result<(), InvalidDate> {
    if !(1..=12).contains(&date.month) || date.day == 0 || date.day > days_in_month(date.month, leap)
    {
        return Err(InvalidDate {
            year: date.year,
            month: date.month,
            day: date.day,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_leap_years() {
        // Recent leap years of the 33-year cycle.
        for year in [1370, 1375, 1379, 1387, 1391, 1395, 1399, 1403] {
            assert!(cycle_leap_year(year), "{}", year);
        }
        for year in [1400, 1401, 1402, 1404, 1405] {
            assert!(!cycle_leap_year(year), "{}", year);
        }
        // Exactly 8 leap years in any window of 33 consecutive years.
        for start in [1, 1178, 1400, 2967] {
            let count = (start..start + 33).filter(|&y| cycle_leap_year(y)).count();
            assert_eq!(count, 8, "window starting at {}", start);
        }
    }

    #[test]
    fn test_month_shapes() {
        assert_eq!(days_before_month(1), 0);
        assert_eq!(days_before_month(7), 186);
        assert_eq!(days_before_month(12), 336);
        // days_before_month and days_in_month agree month by month.
        for month in 1..12u8 {
            assert_eq!(
                days_before_month(month) + days_in_month(month, false) as i64,
                days_before_month(month + 1)
            );
        }
        assert_eq!(days_before_month(12) + 29, 365);
        assert_eq!(days_before_month(12) + 30, 366);
        // month_of_day_of_year is the inverse of the month starts.
        for month in 1..=12u8 {
            let leap = true;
            for day in 1..=days_in_month(month, leap) {
                let day_of_year = days_before_month(month) + day as i64;
                assert_eq!(month_of_day_of_year(day_of_year), month);
            }
        }
    }

    #[test]
    fn test_validate() {
        assert!(validate(PersianDate::new(1402, 12, 29), false).is_ok());
        assert!(validate(PersianDate::new(1402, 12, 30), false).is_err());
        assert!(validate(PersianDate::new(1403, 12, 30), true).is_ok());
        assert!(validate(PersianDate::new(1403, 1, 32), true).is_err());
        assert!(validate(PersianDate::new(1403, 7, 31), true).is_err());
        assert!(validate(PersianDate::new(1403, 13, 1), true).is_err());
        assert!(validate(PersianDate::new(1403, 0, 1), true).is_err());
        assert!(validate(PersianDate::new(1403, 1, 0), true).is_err());
    }
}
