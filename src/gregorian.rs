//! Proleptic Gregorian calendar to fixed day numbers and back.

use num_integer::Integer;

use crate::div_rem::ClampedDivRem;
use crate::error::InvalidDate;
use crate::fixed::FixedDay;

// The Gregorian calendar repeats every 400 years: 97 leap years and 303
// ordinary years, 146097 days. The first three centuries of a cycle have
// 36524 days each; the fourth ends with a leap day. Likewise the first
// three years of a quadrennium have 365 days and the fourth has 366.
const CYCLE_DAYS: i64 = 97 * 366 + 303 * 365;
const CENTURY_DAYS: i64 = 24 * 366 + 76 * 365;
const QUADRENNIUM_DAYS: i64 = 3 * 365 + 366;
const YEAR_DAYS: i64 = 365;

// Days before the start of each month in an ordinary year, January first.
const MONTH_STARTS: [u16; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// A proleptic Gregorian calendar date. Plain data; conversions validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GregorianDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl GregorianDate {
    pub const fn new(year: i32, month: u8, day: u8) -> GregorianDate {
        GregorianDate { year, month, day }
    }
}

/// True for years divisible by 4, except centuries not divisible by 400.
pub fn is_leap_year(year: i32) -> bool {
    let r = year.rem_euclid(400);
    year % 4 == 0 && r != 100 && r != 200 && r != 300
}

pub(crate) fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Fixed day number of a Gregorian date, or `InvalidDate` if the triple
/// does not name an existing day.
pub fn fixed_from_gregorian(date: GregorianDate) -> Result<FixedDay, InvalidDate> {
    if !(1..=12).contains(&date.month) || date.day == 0 || date.day > days_in_month(date.year, date.month)
    {
        return Err(InvalidDate {
            year: date.year,
            month: date.month,
            day: date.day,
        });
    }
    Ok(FixedDay::new(fixed_from_ymd(date.year, date.month, date.day)))
}

// Closed-form day count: whole years since the epoch with the 4/100/400
// leap days, whole months assuming a 30-day February, a correction for the
// actual February, then the day of the month.
pub(crate) fn fixed_from_ymd(year: i32, month: u8, day: u8) -> i64 {
    let prior_years = year as i64 - 1;
    let month = month as i64;
    let mut fixed = 365 * prior_years + prior_years.div_euclid(4) - prior_years.div_euclid(100)
        + prior_years.div_euclid(400)
        + (367 * month - 362) / 12
        + day as i64;
    if month > 2 {
        fixed -= if is_leap_year(year) { 1 } else { 2 };
    }
    fixed
}

/// Gregorian date containing a fixed day number. Total, and the exact
/// inverse of `fixed_from_gregorian` on valid dates.
pub fn gregorian_from_fixed(fixed: FixedDay) -> GregorianDate {
    let day0 = fixed.get() - 1;
    let (cycle, days_into_cycle) = day0.div_mod_floor(&CYCLE_DAYS);
    let (century, days_into_century) = days_into_cycle.clamped_div_rem(CENTURY_DAYS, 3i64);
    let (quadrennium, days_into_quadrennium) = days_into_century.div_mod_floor(&QUADRENNIUM_DAYS);
    let (year_in_quad, day0_of_year) = days_into_quadrennium.clamped_div_rem(YEAR_DAYS, 3i64);

    let year = (400 * cycle + 100 * century + 4 * quadrennium + year_in_quad + 1) as i32;
    let day_of_year = day0_of_year as u16 + 1;

    let leap = is_leap_year(year);
    let mut month = 12u8;
    while day_of_year <= month_start(month, leap) {
        month -= 1;
    }
    let day = (day_of_year - month_start(month, leap)) as u8;
    GregorianDate { year, month, day }
}

// Days of the year before `month` starts, 0 for January.
fn month_start(month: u8, leap: bool) -> u16 {
    MONTH_STARTS[(month - 1) as usize] + (leap && month > 2) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(year: i32, month: u8, day: u8) -> i64 {
        fixed_from_gregorian(GregorianDate::new(year, month, day))
            .unwrap()
            .get()
    }

    #[test]
    fn test_known_fixed_days() {
        // Day 1 of the fixed count is January 1 of year 1.
        assert_eq!(fixed(1, 1, 1), 1);
        // A leap day on a 400-year boundary.
        assert_eq!(fixed(2000, 2, 29), 730179);
        // The day after the end of a February that is *not* leap despite
        // being divisible by 4.
        assert_eq!(fixed(1900, 3, 1), 693655);
        assert_eq!(fixed(1970, 1, 1), 719163);
        assert_eq!(fixed(2000, 3, 1), 730180);
        assert_eq!(fixed(2024, 3, 20), 738965);
    }

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2004));
        assert!(is_leap_year(1600));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(1800));
        assert!(!is_leap_year(2023));
        assert!(!is_leap_year(100));
        assert!(!is_leap_year(-100));
        assert!(is_leap_year(0));
        assert!(is_leap_year(-400));
    }

    #[test]
    fn test_invalid_dates() {
        assert!(fixed_from_gregorian(GregorianDate::new(2023, 2, 29)).is_err());
        assert!(fixed_from_gregorian(GregorianDate::new(2024, 2, 30)).is_err());
        assert!(fixed_from_gregorian(GregorianDate::new(2024, 13, 1)).is_err());
        assert!(fixed_from_gregorian(GregorianDate::new(2024, 0, 1)).is_err());
        assert!(fixed_from_gregorian(GregorianDate::new(2024, 4, 31)).is_err());
        assert!(fixed_from_gregorian(GregorianDate::new(2024, 1, 0)).is_err());
        assert!(fixed_from_gregorian(GregorianDate::new(2024, 2, 29)).is_ok());
    }

    #[test]
    fn test_round_trip_through_leap_boundaries() {
        // Sweep day by day across year ranges that contain every kind of
        // leap boundary: an ordinary leap year, a skipped century, a kept
        // 400-year century, and the end of a full cycle.
        for start_year in [-5, 3, 97, 1897, 1997, 2397] {
            let mut fixed_day = fixed(start_year, 1, 1);
            for year in start_year..start_year + 8 {
                for month in 1..=12u8 {
                    for day in 1..=days_in_month(year, month) {
                        let date = GregorianDate::new(year, month, day);
                        let via = fixed_from_gregorian(date).unwrap();
                        assert_eq!(via.get(), fixed_day, "{:?}", date);
                        assert_eq!(gregorian_from_fixed(via), date);
                        fixed_day += 1;
                    }
                }
            }
        }
    }

    #[test]
    fn test_monotonicity() {
        let mut previous = fixed(1899, 12, 31);
        for &(y, m, d) in &[
            (1900, 1, 1),
            (1900, 2, 28),
            (1900, 3, 1),
            (1999, 12, 31),
            (2000, 2, 29),
            (2000, 3, 1),
            (2400, 2, 29),
        ] {
            let f = fixed(y, m, d);
            assert!(previous < f, "{}-{}-{}", y, m, d);
            previous = f;
        }
    }
}
