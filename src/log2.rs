//! Base 2 logarithms of ratios: the octave as a unit.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cents::{Cents, CENT_SCALE};
use crate::error::Result;
use crate::ratio::Ratio;
use crate::step::Step;

/// `log2` of a ratio, i.e. its size in octaves.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Log2 {
    logarithmand: f64,
    logarithm: f64,
}

impl Log2 {
    /// `log2` of an exact ratio.
    pub fn from_ratio(ratio: &Ratio) -> Self {
        Self {
            logarithmand: ratio.to_f64(),
            logarithm: ratio.to_cents().value() / CENT_SCALE,
        }
    }

    /// The log2 whose logarithm is `logarithm` octaves.
    pub fn from_logarithm(logarithm: f64) -> Self {
        Self {
            logarithmand: logarithm.exp2(),
            logarithm,
        }
    }

    /// The exponent, in octaves.
    pub fn logarithm(&self) -> f64 {
        self.logarithm
    }

    /// The value whose logarithm was taken.
    pub fn logarithmand(&self) -> f64 {
        self.logarithmand
    }

    /// The same interval in cents.
    pub fn to_cents(&self) -> Cents {
        Cents::new(self.logarithm * CENT_SCALE)
    }

    /// Nearest step of `modulo` equal divisions of the octave.
    pub fn step(&self, modulo: u32) -> Result<Step> {
        Step::from_log2(*self, modulo)
    }
}

impl fmt::Display for Log2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.logarithm)
    }
}
