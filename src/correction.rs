//! The correction table: the years where the 33-year cycle and the equinox
//! disagree, packed one bit per year.
//!
//! Disagreements come in pairs. When the equinox drifts off the cycle it
//! cancels the leap day of a cycle-leap year Y and hands it to Y+1 instead,
//! so Y is flagged and the opposite flip of Y+1 is implied by the flag on
//! its predecessor. One bit per pair is exactly what the consumers probe:
//! `contains(year)` forces a year ordinary, `contains(year - 1)` forces it
//! leap.

use std::borrow::Cow;

use lazy_static::lazy_static;
use thiserror::Error;

use crate::equinox::EquinoxOracle;
use crate::error::RangeError;
use crate::persian::cycle_leap_year;

/// First Persian year covered by the built-in table.
pub const FIRST_YEAR: i32 = 1178;
/// Last Persian year covered by the built-in table.
pub const LAST_YEAR: i32 = 3000;

// Packed correction years for 1178..=3000: bit (year - 1178) % 8 of byte
// (year - 1178) / 8. Output of CorrectionTable::build against SolarOracle,
// never edited by hand; regenerate it whenever the range or the cycle
// rule's residue set changes.
static BUILTIN_BITS: [u8; 228] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x80, 0x00, 0x00, 0x00, //
    0x00, 0x01, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, //
    0x00, 0x04, 0x00, 0x00, 0x00, 0x08, 0x00, 0x00, //
    0x00, 0x10, 0x00, 0x00, 0x00, 0x20, 0x00, 0x00, //
    0x00, 0x40, 0x00, 0x00, 0x00, 0x80, 0x00, 0x00, //
    0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x02, 0x00, //
    0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x08, 0x00, //
    0x00, 0x00, 0x10, 0x00, 0x00, 0x00, 0x22, 0x00, //
    0x00, 0x00, 0x40, 0x00, 0x00, 0x00, 0x80, 0x00, //
    0x00, 0x00, 0x10, 0x01, 0x00, 0x00, 0x20, 0x02, //
    0x00, 0x00, 0x40, 0x04, 0x00, 0x00, 0x80, 0x08, //
    0x00, 0x00, 0x00, 0x11, 0x00, 0x00, 0x00, 0x22, //
    0x00, 0x00, 0x00, 0x44, 0x00, 0x00, 0x00, 0x88, //
    0x00, 0x00, 0x00, 0x10, 0x01, 0x00, 0x00, 0x20, //
    0x02, 0x00, 0x00, 0x40, 0x04, 0x00, 0x00, 0x80, //
    0x08, 0x00, 0x00, 0x00, 0x11, 0x00, 0x00, 0x00, //
    0x22, 0x00, 0x00, 0x00, 0x44, 0x00, 0x00, 0x00, //
    0x88, 0x00, 0x00, 0x00, 0x10, 0x01, 0x00, 0x00, //
    0x20, 0x02, 0x00, 0x00, 0x44, 0x04, 0x00, 0x00, //
    0x88, 0x08, 0x00, 0x00, 0x00, 0x11, 0x00, 0x00, //
    0x20, 0x22, 0x00, 0x00, 0x40, 0x44, 0x00, 0x00, //
    0x80, 0x88, 0x00, 0x00, 0x00, 0x11, 0x01, 0x00, //
    0x00, 0x22, 0x02, 0x00, //
];

lazy_static! {
    static ref BUILTIN: CorrectionTable =
        CorrectionTable::from_packed(FIRST_YEAR, LAST_YEAR, &BUILTIN_BITS[..]);
}

/// Immutable set of correction years with the bounds it is valid for.
/// The bounds and the bits always travel together; a table is never probed
/// against bounds it was not built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionTable {
    first_year: i32,
    last_year: i32,
    bits: Cow<'static, [u8]>,
}

/// Failure of the offline table build.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
    #[error(transparent)]
    Oracle(#[from] RangeError),
    /// The oracle disagreed with the cycle rule in a way one bit per pair
    /// cannot encode. Means the cycle rule itself no longer fits the range.
    #[error("year {year} disagrees with the 33-year cycle but is not part of a correction pair")]
    Unrepresentable { year: i32 },
}

impl CorrectionTable {
    fn packed_len(first_year: i32, last_year: i32) -> usize {
        ((last_year - first_year + 1) as usize + 7) / 8
    }

    /// Table from a previously built artifact. The byte length must match
    /// the bounds exactly; a mismatch means the bits and the bounds came
    /// from different builds and the table would be silently misaligned.
    pub fn from_packed(
        first_year: i32,
        last_year: i32,
        bits: impl Into<Cow<'static, [u8]>>,
    ) -> CorrectionTable {
        assert!(first_year <= last_year);
        let bits = bits.into();
        assert_eq!(
            bits.len(),
            Self::packed_len(first_year, last_year),
            "packed table length does not match the year bounds"
        );
        CorrectionTable {
            first_year,
            last_year,
            bits,
        }
    }

    /// The offline builder: compare the oracle against the cycle rule for
    /// every year of the range and flag the cancelled leap years. Needs the
    /// oracle to answer `first_year..=last_year + 1` (the leap status of
    /// the last year depends on the following New Year); a range the oracle
    /// cannot cover is an error, not a partial table.
    pub fn build<O: EquinoxOracle>(
        first_year: i32,
        last_year: i32,
        oracle: &O,
    ) -> Result<CorrectionTable, BuildError> {
        assert!(first_year <= last_year);
        let mut new_years = Vec::with_capacity((last_year - first_year + 2) as usize);
        for year in first_year..=last_year + 1 {
            new_years.push(oracle.vernal_equinox_new_year(year)?.get());
        }

        let mut bits = vec![0u8; Self::packed_len(first_year, last_year)];
        let mut previous_flagged = false;
        for year in first_year..=last_year {
            let index = (year - first_year) as usize;
            let astronomical = new_years[index + 1] - new_years[index] == 366;
            let rule = cycle_leap_year(year);
            if previous_flagged {
                // The implied second half of a pair: the leap day the flag
                // cancelled must reappear here.
                if !astronomical || rule {
                    return Err(BuildError::Unrepresentable { year });
                }
                previous_flagged = false;
            } else if astronomical != rule {
                if !rule {
                    // A leap year the cycle missed, with no flagged
                    // predecessor to imply it.
                    return Err(BuildError::Unrepresentable { year });
                }
                bits[index / 8] |= 1 << (index % 8);
                previous_flagged = true;
            }
        }
        Ok(CorrectionTable {
            first_year,
            last_year,
            bits: Cow::Owned(bits),
        })
    }

    /// The table shipped with the crate, covering [`FIRST_YEAR`]..=[`LAST_YEAR`].
    pub fn builtin() -> &'static CorrectionTable {
        &BUILTIN
    }

    /// O(1) bit probe. Years outside the bounds are never flagged.
    pub fn contains(&self, year: i32) -> bool {
        if year < self.first_year || year > self.last_year {
            return false;
        }
        let index = (year - self.first_year) as usize;
        self.bits[index / 8] & (1 << (index % 8)) != 0
    }

    pub fn first_year(&self) -> i32 {
        self.first_year
    }

    pub fn last_year(&self) -> i32 {
        self.last_year
    }

    pub fn packed_bytes(&self) -> &[u8] {
        &self.bits
    }
}
