//! The seam between the Persian converters and the astronomy that defines
//! the calendar: something that can say on which fixed day a Persian year
//! begins.

use crate::astronomy;
use crate::error::RangeError;
use crate::fixed::FixedDay;
use crate::persian::PERSIAN_EPOCH;

/// Decides where each Persian year begins. The real implementation is
/// [`SolarOracle`]; tests inject synthetic ones to exercise the table
/// builder without paying for trigonometry.
pub trait EquinoxOracle {
    /// Fixed day number of 1 Farvardin of the given Persian year.
    fn vernal_equinox_new_year(&self, year: i32) -> Result<FixedDay, RangeError>;
}

/// Longitude of the reference meridian, in degrees east. Iran Standard
/// Time is mean solar time at this meridian, so the zone offset and the
/// longitude correction cancel exactly.
const REFERENCE_LONGITUDE: f64 = 52.5;

/// Solar longitude at the March equinox.
const SPRING: f64 = 0.0;

/// First Persian year [`SolarOracle`] will answer for.
pub const ORACLE_FIRST_YEAR: i32 = 1;
/// Last Persian year [`SolarOracle`] will answer for. The solar series is
/// published for roughly four millennia around J2000 (this is Gregorian
/// 3999); beyond that we refuse rather than extrapolate.
pub const ORACLE_LAST_YEAR: i32 = 3378;

/// Places Persian New Year by the true vernal equinox: 1 Farvardin is the
/// day whose apparent midday at the reference meridian falls on or just
/// after the equinox. This is the ground truth the fast converter's
/// correction table is built and verified against.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolarOracle;

impl SolarOracle {
    pub fn new() -> SolarOracle {
        SolarOracle
    }

    // Universal time of apparent noon at the reference meridian.
    fn midday(date: i64) -> f64 {
        let mean_noon = date as f64 + 0.5 - REFERENCE_LONGITUDE / 360.0;
        mean_noon - astronomy::equation_of_time(mean_noon)
    }

    // Fixed day of the Persian New Year on or before `date`: the first day
    // whose apparent midday finds the Sun within two degrees past the
    // equinox. Two degrees is comfortably more than a day of solar motion,
    // so the scan cannot skip a year.
    fn new_year_on_or_before(date: i64) -> i64 {
        let approx = astronomy::estimate_prior_solar_longitude(SPRING, Self::midday(date));
        let mut day = approx.floor() as i64 - 1;
        while astronomy::solar_longitude(astronomy::julian_centuries(Self::midday(day)))
            > SPRING + 2.0
        {
            day += 1;
        }
        day
    }
}

impl EquinoxOracle for SolarOracle {
    fn vernal_equinox_new_year(&self, year: i32) -> Result<FixedDay, RangeError> {
        if !(ORACLE_FIRST_YEAR..=ORACLE_LAST_YEAR).contains(&year) {
            return Err(RangeError {
                year,
                oracle_first: ORACLE_FIRST_YEAR,
                oracle_last: ORACLE_LAST_YEAR,
            });
        }
        // Aim half a year past where the mean year puts the New Year, then
        // walk back onto it.
        let anchor = PERSIAN_EPOCH.get()
            + 180
            + (astronomy::MEAN_TROPICAL_YEAR * (year - 1) as f64).floor() as i64;
        Ok(FixedDay::new(Self::new_year_on_or_before(anchor)))
    }
}
