//! Logarithms of ratios in an arbitrary base.
//!
//! [`Log2`] covers the octave; a [`Log`] measures against any other period,
//! such as the tritave (`base = 3`) of Bohlen-Pierce tunings.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cents::Cents;
use crate::error::{Result, TonalError};
use crate::log2::Log2;
use crate::ratio::Ratio;
use crate::step::Step;

/// `log_base(logarithmand) = logarithm`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Log {
    logarithmand: f64,
    logarithm: f64,
    base: f64,
}

impl Log {
    /// Logarithm of `logarithmand` in `base`.
    pub fn new(logarithmand: f64, base: f64) -> Result<Self> {
        check_base(base)?;
        if !(logarithmand.is_finite() && logarithmand > 0.0) {
            return Err(TonalError::invalid_parameter(
                "logarithmand",
                format!("{} is not a positive, finite number", logarithmand),
            ));
        }
        Ok(Self {
            logarithmand,
            logarithm: logarithmand.ln() / base.ln(),
            base,
        })
    }

    /// Logarithm of an exact ratio in `base`.
    pub fn from_ratio(ratio: &Ratio, base: f64) -> Result<Self> {
        check_base(base)?;
        if !ratio.is_positive_finite() {
            return Err(TonalError::InvalidTarget {
                ratio: ratio.to_string(),
                reason: "only positive, finite ratios have a logarithm",
            });
        }
        // through log2 so that terms past 2^53 keep their precision
        Ok(Self {
            logarithmand: ratio.to_f64(),
            logarithm: ratio.to_log2().logarithm() / base.log2(),
            base,
        })
    }

    /// The log whose logarithm is `logarithm` in `base`.
    pub fn from_logarithm(logarithm: f64, base: f64) -> Result<Self> {
        check_base(base)?;
        Ok(Self {
            logarithmand: base.powf(logarithm),
            logarithm,
            base,
        })
    }

    /// The exponent.
    pub fn logarithm(&self) -> f64 {
        self.logarithm
    }

    /// The value whose logarithm was taken.
    pub fn logarithmand(&self) -> f64 {
        self.logarithmand
    }

    /// The base.
    pub fn base(&self) -> f64 {
        self.base
    }

    /// The same interval in octaves.
    pub fn to_log2(&self) -> Log2 {
        Log2::from_logarithm(self.logarithm * self.base.log2())
    }

    /// The same interval in cents.
    pub fn to_cents(&self) -> Cents {
        self.to_log2().to_cents()
    }

    /// Nearest step of `modulo` equal divisions of the octave.
    pub fn step(&self, modulo: u32) -> Result<Step> {
        self.to_log2().step(modulo)
    }
}

fn check_base(base: f64) -> Result<()> {
    if !(base.is_finite() && base > 0.0) || base == 1.0 {
        return Err(TonalError::invalid_parameter(
            "base",
            format!("{} is not a positive, finite number other than 1", base),
        ));
    }
    Ok(())
}

impl From<Log2> for Log {
    fn from(log: Log2) -> Self {
        Self {
            logarithmand: log.logarithmand(),
            logarithm: log.logarithm(),
            base: 2.0,
        }
    }
}

impl fmt::Display for Log {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.logarithm)
    }
}
