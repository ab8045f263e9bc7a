use crate::correction::CorrectionTable;
use crate::error::{ConversionError, OutOfRange};
use crate::fixed::FixedDay;

use super::{
    cycle_leap_year, days_before_month, month_of_day_of_year, validate, PersianDate, PERSIAN_EPOCH,
};

/// Persian conversions by pure arithmetic: the 33-year cycle places the
/// leap years and the correction table flips the handful of years where
/// the equinox has drifted off the cycle. Matches [`AstronomicalPersian`]
/// day for day inside the table's range and refuses to answer outside it.
///
/// [`AstronomicalPersian`]: super::AstronomicalPersian
#[derive(Debug, Clone, Copy)]
pub struct FastPersian<'t> {
    table: &'t CorrectionTable,
}

impl FastPersian<'static> {
    /// Converter over the built-in table, Persian years 1178..=3000.
    pub fn builtin() -> FastPersian<'static> {
        FastPersian {
            table: CorrectionTable::builtin(),
        }
    }
}

impl<'t> FastPersian<'t> {
    pub fn new(table: &'t CorrectionTable) -> FastPersian<'t> {
        FastPersian { table }
    }

    pub fn table(&self) -> &'t CorrectionTable {
        self.table
    }

    fn check_year(&self, year: i32) -> Result<(), OutOfRange> {
        if year < self.table.first_year() || year > self.table.last_year() {
            return Err(self.out_of_range(year));
        }
        Ok(())
    }

    fn out_of_range(&self, year: i32) -> OutOfRange {
        OutOfRange {
            year,
            first: self.table.first_year(),
            last: self.table.last_year(),
        }
    }

    // Fixed day of 1 Farvardin: 365 days per elapsed year, the leap days
    // the 33-year cycle inserts, and one day back when the table cancelled
    // the previous year's leap day.
    fn new_year(&self, year: i32) -> i64 {
        let y = year as i64;
        let mut day = PERSIAN_EPOCH.get() - 1 + 365 * (y - 1) + (8 * y + 21).div_euclid(33);
        if self.table.contains(year - 1) {
            day -= 1;
        }
        day
    }

    fn leap_unchecked(&self, year: i32) -> bool {
        if self.table.contains(year) {
            false
        } else if self.table.contains(year - 1) {
            true
        } else {
            cycle_leap_year(year)
        }
    }

    /// Corrected leap status of a year inside the table's range.
    pub fn is_leap_year(&self, year: i32) -> Result<bool, OutOfRange> {
        self.check_year(year)?;
        Ok(self.leap_unchecked(year))
    }

    /// Fixed day number of a Persian date. `OutOfRange` for years the
    /// table does not certify, `InvalidDate` for a day that does not exist
    /// (notably Esfand 30 of a non-leap year).
    pub fn fixed_from_persian(&self, date: PersianDate) -> Result<FixedDay, ConversionError> {
        self.check_year(date.year)?;
        validate(date, self.leap_unchecked(date.year))?;
        Ok(FixedDay::new(
            self.new_year(date.year) - 1 + days_before_month(date.month) + date.day as i64,
        ))
    }

    /// Persian date containing a fixed day number, if its year is inside
    /// the table's range.
    pub fn persian_from_fixed(&self, fixed: FixedDay) -> Result<PersianDate, OutOfRange> {
        let first = self.table.first_year();
        let last = self.table.last_year();
        // Bounds in fixed days, so the year estimate below only ever runs
        // on day counts it is verified for.
        let start = self.new_year(first);
        let end = self.new_year(last + 1);
        if fixed.get() < start {
            return Err(self.out_of_range(first - 1));
        }
        if fixed.get() >= end {
            return Err(self.out_of_range(last + 1));
        }

        let days_since_epoch = fixed.get() - PERSIAN_EPOCH.get() + 1;
        // 12053 days = 33 years of 365 days plus the cycle's 8 leap days.
        let mut year = (1 + (33 * days_since_epoch + 3).div_euclid(12053)) as i32;
        let mut day_of_year = fixed.get() - self.new_year(year) + 1;
        if day_of_year == 366 && self.table.contains(year) {
            // The cycle would put a leap day here, but the table moved it
            // to the next year; this day is that year's 1 Farvardin.
            year += 1;
            day_of_year = 1;
        }
        let month = month_of_day_of_year(day_of_year);
        let day = (day_of_year - days_before_month(month)) as u8;
        Ok(PersianDate { year, month, day })
    }
}
