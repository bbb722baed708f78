//! Ratios folded into a single equave.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TonalError};
use crate::interval::Interval;
use crate::ratio::{to_ratio, Ratio, RatioLike};

/// A positive, finite ratio in lowest terms inside `[1, equave)`.
///
/// Operations that would leave the equave (inversion, reflection) fold the
/// result back in, so `3/2` inverts to `4/3` rather than `2/3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReducedRatio {
    ratio: Ratio,
    equave: Ratio,
}

impl ReducedRatio {
    /// `ratio` folded into the octave.
    pub fn new(ratio: impl Into<RatioLike>) -> Result<Self> {
        Self::with_equave(ratio, Ratio::OCTAVE)
    }

    /// `ratio` folded into `[1, equave)`.
    pub fn with_equave(ratio: impl Into<RatioLike>, equave: Ratio) -> Result<Self> {
        let ratio = to_ratio(ratio)?;
        if !ratio.is_positive_finite() {
            return Err(TonalError::InvalidTarget {
                ratio: ratio.to_string(),
                reason: "only positive, finite ratios reduce into an equave",
            });
        }
        Ok(Self {
            ratio: ratio.equave_reduce(equave)?,
            equave: equave.reduced(),
        })
    }

    /// The equave reduced into.
    pub fn equave(&self) -> Ratio {
        self.equave
    }

    /// The plain [`Ratio`] with the same value.
    pub fn to_basic_ratio(&self) -> Ratio {
        self.ratio
    }

    /// The complement within the equave, `equave / self`.
    pub fn invert(&self) -> Result<Self> {
        self.fold(self.equave.checked_div(&self.ratio)?)
    }

    /// `self` reflected around `axis` and folded back into the equave.
    pub fn mirror(&self, axis: &Ratio) -> Result<Self> {
        self.fold(self.ratio.mirror(axis)?)
    }

    /// The Ernst Levy negative, folded back into the equave: `7/4 -> 12/7`.
    pub fn negative(&self) -> Result<Self> {
        self.fold(self.ratio.negative()?)
    }

    /// The interval from `other` up to `self`.
    pub fn interval_with(&self, other: impl Into<RatioLike>) -> Result<Interval> {
        let other = Self::with_equave(other, self.equave)?;
        Interval::new(self.ratio, other.ratio)
    }

    fn fold(&self, ratio: Ratio) -> Result<Self> {
        Self::with_equave(ratio, self.equave)
    }
}

impl fmt::Display for ReducedRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ratio)
    }
}
