// A second, structurally different Gregorian implementation, kept as the
// cross-check reference for the main converter in `gregorian`.
//
// The Gregorian calendar works in cycles of 400 years. Each cycle has
// 100-3=97 leap years and 303 normal years, 97*366 + 303*365 = 146097 days.
// Having the leap year at the beginning of a cycle or quadrennium makes
// calculations more complicated, since we have to take into account the
// extra day in the initial period. By shifting values so that the leap day
// comes out at the end of each period we can just let the leap days come
// naturally as an "overflow", without any branches in control flow other
// than the implicit branch in a call to min() inside clamped_div_rem. So we
// pick 2000-03-01 as zero point, right after the last leap day of the
// preceding cycle. The year then ends with the leap day (February 29) and
// the quadrennium ends with the leap year, e.g.:
// - 2000-03-01 to 2001-02-28
// - 2001-03-01 to 2002-02-28
// - 2002-03-01 to 2003-02-28
// - 2003-03-01 to 2004-02-29

use num_integer::Integer;

use crate::div_rem::ClampedDivRem;

pub(crate) struct GregorianNormalizedDate {
    // Number of 400-year cycles since 2000-03-01.
    cycle: i64,
    // Number of centuries since the start of the cycle (0-3).
    century: u8,
    // Number of quadrennia (4-year periods) since the start of the century (0-24).
    quadrennium: u8,
    // Number of years since the start of the quadrennium (0-3).
    year: u8,
    // Number of days since the start of the year (0-366, where the year starts March 1).
    day: u16,
}

const GREGORIAN_CYCLE_DAYS: u32 = 97 * 366 + 303 * 365;
const GREGORIAN_CENTURY_DAYS: u16 = 24 * 366 + 76 * 365;
const GREGORIAN_QUADRENNIUM_DAYS: u16 = 3 * 365 + 366;
const GREGORIAN_YEAR_DAYS: u16 = 365;
const GREGORIAN_CYCLE_YEARS: u16 = 400;
const GREGORIAN_CENTURY_YEARS: u16 = 100;
const GREGORIAN_QUADRENNIUM_YEARS: u16 = 4;

// Fixed day number of 2000-03-01, the zero point of the normalized form.
const NORMALIZED_EPOCH_FIXED: i64 = 730180;

// Days before each month of the shifted year, index 0 = March. The sentinel
// keeps month_from_day_offset's overshoot probe in bounds.
const GREGORIAN_MONTH_STARTS: [u16; 13] =
    [0, 31, 61, 92, 122, 153, 184, 214, 245, 275, 306, 337, u16::MAX];

fn month_from_day_offset(day: u16) -> u8 {
    let mut month = (day / 30) as u8;
    if day < GREGORIAN_MONTH_STARTS[month as usize] {
        // We have overshot the month. Move back.
        month -= 1;
    }
    month
}

impl GregorianNormalizedDate {
    pub(crate) fn from_fixed(fixed: i64) -> Self {
        let day = fixed - NORMALIZED_EPOCH_FIXED;
        let (cycle, days_into_cycle) = day.div_mod_floor(&(GREGORIAN_CYCLE_DAYS as i64));
        let days_into_cycle = days_into_cycle as u32;

        // The first three centuries of each cycle are normal centuries with
        // 24 leap years and 76 normal years. The fourth century has one
        // extra leap day at the end, which the clamp absorbs.
        let (century, days_into_century) =
            days_into_cycle.clamped_div_rem(GREGORIAN_CENTURY_DAYS as u32, 3u8);
        let days_into_century = days_into_century as u16;

        // Each quadrennium has one extra leap day at the end, except the
        // last quadrennium of the first three centuries, which lacks it and
        // so never reaches the quotient that would need clamping.
        let (quadrennium, days_into_quadrennium) =
            days_into_century.div_rem(&GREGORIAN_QUADRENNIUM_DAYS);
        let quadrennium = quadrennium as u8;

        let (years_into_quadrennium, days_into_year) =
            days_into_quadrennium.clamped_div_rem(GREGORIAN_YEAR_DAYS, 3u8);

        GregorianNormalizedDate {
            cycle,
            century,
            quadrennium,
            year: years_into_quadrennium,
            day: days_into_year,
        }
    }

    pub(crate) fn to_fixed(&self) -> i64 {
        self.cycle * GREGORIAN_CYCLE_DAYS as i64
            + self.century as i64 * GREGORIAN_CENTURY_DAYS as i64
            + self.quadrennium as i64 * GREGORIAN_QUADRENNIUM_DAYS as i64
            + self.year as i64 * GREGORIAN_YEAR_DAYS as i64
            + self.day as i64
            + NORMALIZED_EPOCH_FIXED
    }

    pub(crate) fn from_date(year: i32, month: u8, day: u8) -> Self {
        assert!((1..=12).contains(&month));
        assert!((1..=31).contains(&day));

        let mut year = year as i64;
        let mut month = month - 1;
        let day = day - 1;
        if month < 2 {
            month += 12;
            year -= 1;
        }
        month -= 2;
        year -= 2000;
        let (cycle, years_into_cycle) = year.div_mod_floor(&(GREGORIAN_CYCLE_YEARS as i64));
        let years_into_cycle = years_into_cycle as u16;
        let (century, years_into_century) =
            years_into_cycle.clamped_div_rem(GREGORIAN_CENTURY_YEARS, 3u8);
        let (quadrennium, years_into_quadrennium) =
            years_into_century.clamped_div_rem(GREGORIAN_QUADRENNIUM_YEARS, 24u8);
        let years_into_quadrennium = years_into_quadrennium as u8;

        let month_day_offset = GREGORIAN_MONTH_STARTS[month as usize];
        let days_into_year = month_day_offset + day as u16;
        GregorianNormalizedDate {
            cycle,
            century,
            quadrennium,
            year: years_into_quadrennium,
            day: days_into_year,
        }
    }

    pub(crate) fn to_date(&self) -> (i32, u8, u8) {
        let mut year = 2000
            + 400 * self.cycle
            + 100 * self.century as i64
            + 4 * self.quadrennium as i64
            + self.year as i64;

        // The year is shifted so March is first and the leap day comes at
        // the end, so month starts need no leap adjustment.
        let mut month = month_from_day_offset(self.day);
        let days_into_month = (self.day - GREGORIAN_MONTH_STARTS[month as usize]) as u8;

        // Shift back so March is month 3 and the year begins in January.
        month += 2;
        if month >= 12 {
            month -= 12;
            year += 1;
        }
        (year as i32, month + 1, days_into_month + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gregorian_normalized_date() {
        // 1970-01-01 is fixed day 719163. Because normalized years start in
        // March, the normalized representation is based on the year 1969:
        // 2000 - 1*400 + 3*100 + 17*4 + 1 = 1969.
        let date = GregorianNormalizedDate::from_fixed(719163);
        assert_eq!(date.cycle, -1);
        assert_eq!(date.century, 3);
        assert_eq!(date.quadrennium, 17);
        assert_eq!(date.year, 1);
        assert_eq!(date.day, 306); // 306 days from 1969-03-01 to 1970-01-01.
        assert_eq!(date.to_fixed(), 719163);
        assert_eq!(date.to_date(), (1970, 1, 1));

        // The zero point of normalized dates.
        let date = GregorianNormalizedDate::from_date(2000, 3, 1);
        assert_eq!(date.cycle, 0);
        assert_eq!(date.century, 0);
        assert_eq!(date.quadrennium, 0);
        assert_eq!(date.year, 0);
        assert_eq!(date.day, 0);
        assert_eq!(date.to_fixed(), 730180);
        assert_eq!(date.to_date(), (2000, 3, 1));

        // The end of a cycle.
        let date = GregorianNormalizedDate::from_date(2000, 2, 29);
        assert_eq!(date.cycle, -1);
        assert_eq!(date.century, 3);
        assert_eq!(date.quadrennium, 24);
        assert_eq!(date.year, 3);
        assert_eq!(date.day, 365);

        // The end of the year before that, to probe around the leap day.
        let date = GregorianNormalizedDate::from_date(1999, 2, 28);
        assert_eq!(date.cycle, -1);
        assert_eq!(date.century, 3);
        assert_eq!(date.quadrennium, 24);
        assert_eq!(date.year, 2);
        assert_eq!(date.day, 364);
    }

    #[test]
    fn test_month_from_day_offset() {
        for (month, &start) in GREGORIAN_MONTH_STARTS[..12].iter().enumerate() {
            assert_eq!(month_from_day_offset(start), month as u8);
            if month < 11 {
                assert_eq!(
                    month_from_day_offset(GREGORIAN_MONTH_STARTS[month + 1] - 1),
                    month as u8
                );
            } else {
                assert_eq!(month_from_day_offset(365), 11);
            }
        }
    }
}
