//! Acceptance checks for a correction table and the converters around it.
//! A rebuilt table ships only when every check here passes; the functions
//! are public so a rebuild can run them against a candidate table without
//! touching the built-in one.

use thiserror::Error;

use crate::correction::CorrectionTable;
use crate::equinox::EquinoxOracle;
use crate::fixed::FixedDay;
use crate::gregorian::{fixed_from_gregorian, gregorian_from_fixed, GregorianDate};
use crate::gregorian_normalized_date::GregorianNormalizedDate;
use crate::persian::{cycle_leap_year, AstronomicalPersian, FastPersian, PersianDate};

/// First discrepancy a verification pass found, if any.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    #[error("new year of {year}: fast {fast}, astronomical {astronomical}")]
    NewYear {
        year: i32,
        fast: i64,
        astronomical: i64,
    },
    #[error("leap status of {year}: fast {fast}, astronomical {astronomical}")]
    Leap {
        year: i32,
        fast: bool,
        astronomical: bool,
    },
    #[error("fixed day {fixed} round-trips to {back}")]
    RoundTrip { fixed: i64, back: i64 },
    #[error("fixed day {fixed}: fast {fast:?}, astronomical {astronomical:?}")]
    Day {
        fixed: i64,
        fast: PersianDate,
        astronomical: PersianDate,
    },
    #[error("gregorian {year}-{month}-{day} disagrees with the reference implementation")]
    Gregorian { year: i32, month: u8, day: u8 },
    #[error("year {year} is flagged but does not disagree with the cycle rule")]
    SpuriousCorrection { year: i32 },
    #[error("year {year} disagrees with the cycle rule but no flag covers it")]
    MissingCorrection { year: i32 },
    #[error("rebuilding the table did not reproduce it: {0}")]
    Rebuild(String),
    #[error("conversion failed during verification: {0}")]
    Failed(String),
}

fn failed(error: impl std::fmt::Display) -> Mismatch {
    Mismatch::Failed(error.to_string())
}

/// Compare the fast converter against the astronomical one on every New
/// Year and leap flag of the fast converter's range. Because both sides lay
/// the months out identically within a year, agreement here is agreement on
/// every single day in range.
pub fn verify_new_years<O: EquinoxOracle>(
    fast: &FastPersian,
    astronomical: &AstronomicalPersian<O>,
) -> Result<(), Mismatch> {
    for year in fast.table().first_year()..=fast.table().last_year() {
        let nowruz = PersianDate::new(year, 1, 1);
        let f = fast.fixed_from_persian(nowruz).map_err(failed)?;
        let a = astronomical.fixed_from_persian(nowruz).map_err(failed)?;
        if f != a {
            return Err(Mismatch::NewYear {
                year,
                fast: f.get(),
                astronomical: a.get(),
            });
        }
        let f_leap = fast.is_leap_year(year).map_err(failed)?;
        let a_leap = astronomical.is_leap_year(year).map_err(failed)?;
        if f_leap != a_leap {
            return Err(Mismatch::Leap {
                year,
                fast: f_leap,
                astronomical: a_leap,
            });
        }
    }
    Ok(())
}

/// Compare `persian_from_fixed` on both paths directly, every `stride`-th
/// day of the range. Stride 1 is the exhaustive day-by-day check; larger
/// strides trade coverage for oracle calls.
pub fn verify_days<O: EquinoxOracle>(
    fast: &FastPersian,
    astronomical: &AstronomicalPersian<O>,
    stride: i64,
) -> Result<(), Mismatch> {
    assert!(stride >= 1);
    let (start, end) = range_in_fixed_days(fast)?;
    let mut fixed = start;
    while fixed < end {
        let f = fast.persian_from_fixed(FixedDay::new(fixed)).map_err(failed)?;
        let a = astronomical
            .persian_from_fixed(FixedDay::new(fixed))
            .map_err(failed)?;
        if f != a {
            return Err(Mismatch::Day {
                fixed,
                fast: f,
                astronomical: a,
            });
        }
        fixed += stride;
    }
    Ok(())
}

/// Round-trip identity of the fast converter for every day of its range.
pub fn verify_round_trip(fast: &FastPersian) -> Result<(), Mismatch> {
    let (start, end) = range_in_fixed_days(fast)?;
    for fixed in start..end {
        let date = fast.persian_from_fixed(FixedDay::new(fixed)).map_err(failed)?;
        let back = fast.fixed_from_persian(date).map_err(failed)?;
        if back.get() != fixed {
            return Err(Mismatch::RoundTrip {
                fixed,
                back: back.get(),
            });
        }
    }
    Ok(())
}

// First fixed day of the range and the first fixed day past it.
fn range_in_fixed_days(fast: &FastPersian) -> Result<(i64, i64), Mismatch> {
    let first = fast.table().first_year();
    let last = fast.table().last_year();
    let start = fast
        .fixed_from_persian(PersianDate::new(first, 1, 1))
        .map_err(failed)?;
    let esfand_days = if fast.is_leap_year(last).map_err(failed)? { 30 } else { 29 };
    let last_day = fast
        .fixed_from_persian(PersianDate::new(last, 12, esfand_days))
        .map_err(failed)?;
    Ok((start.get(), last_day.get() + 1))
}

/// Cross-check the main Gregorian converter against the normalized-date
/// reference on hand-picked boundary dates plus `samples` pseudo-random
/// dates across six millennia.
pub fn verify_gregorian(samples: u32) -> Result<(), Mismatch> {
    // Every kind of period boundary: cycle, skipped century, kept century,
    // quadrennium, plus the epoch and some ordinary days.
    const BOUNDARY_DATES: [(i32, u8, u8); 16] = [
        (1, 1, 1),
        (4, 2, 29),
        (100, 2, 28),
        (100, 3, 1),
        (400, 2, 29),
        (1582, 10, 15),
        (1899, 12, 31),
        (1900, 2, 28),
        (1900, 3, 1),
        (1969, 12, 31),
        (1970, 1, 1),
        (1999, 12, 31),
        (2000, 2, 29),
        (2000, 3, 1),
        (2399, 12, 31),
        (2400, 2, 29),
    ];
    for &(year, month, day) in &BOUNDARY_DATES {
        check_gregorian(year, month, day)?;
    }

    // Fixed-seed linear congruential generator, so failures reproduce.
    let mut state: u64 = 0x853c_49e6_748f_ea9b;
    let mut next = || {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        state >> 33
    };
    for _ in 0..samples {
        let year = (next() % 6000) as i32 - 2000;
        let month = (next() % 12) as u8 + 1;
        let day = (next() % crate::gregorian::days_in_month(year, month) as u64) as u8 + 1;
        check_gregorian(year, month, day)?;
    }
    Ok(())
}

fn check_gregorian(year: i32, month: u8, day: u8) -> Result<(), Mismatch> {
    let mismatch = || Mismatch::Gregorian { year, month, day };
    let date = GregorianDate::new(year, month, day);
    let fixed = fixed_from_gregorian(date).map_err(failed)?;
    let reference = GregorianNormalizedDate::from_date(year, month, day);
    if reference.to_fixed() != fixed.get() {
        return Err(mismatch());
    }
    if GregorianNormalizedDate::from_fixed(fixed.get()).to_date() != (year, month, day) {
        return Err(mismatch());
    }
    if gregorian_from_fixed(fixed) != date {
        return Err(mismatch());
    }
    Ok(())
}

/// Check a table against the oracle it claims to summarize: every flag must
/// mark a real disagreement pair, every disagreement must be covered, and
/// rebuilding from scratch must reproduce the table bit for bit.
pub fn verify_table<O: EquinoxOracle>(
    table: &CorrectionTable,
    oracle: &O,
) -> Result<(), Mismatch> {
    let first = table.first_year();
    let last = table.last_year();
    let mut new_years = Vec::with_capacity((last - first + 2) as usize);
    for year in first..=last + 1 {
        new_years.push(oracle.vernal_equinox_new_year(year).map_err(failed)?.get());
    }
    let astronomical_leap =
        |year: i32| new_years[(year - first + 1) as usize] - new_years[(year - first) as usize] == 366;

    for year in first..=last {
        let disagrees = astronomical_leap(year) != cycle_leap_year(year);
        if table.contains(year) {
            // A flag marks a cancelled leap day: the rule says leap, the
            // equinox says ordinary.
            if !disagrees || !cycle_leap_year(year) {
                return Err(Mismatch::SpuriousCorrection { year });
            }
        } else if disagrees && !table.contains(year - 1) {
            return Err(Mismatch::MissingCorrection { year });
        }
    }

    let rebuilt = CorrectionTable::build(first, last, oracle)
        .map_err(|e| Mismatch::Rebuild(e.to_string()))?;
    if &rebuilt != table {
        return Err(Mismatch::Rebuild(
            "rebuilt bits differ from the supplied table".to_string(),
        ));
    }
    Ok(())
}
