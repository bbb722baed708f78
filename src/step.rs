//! Ratios measured as steps of an equal division of the octave.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cents::Cents;
use crate::error::{Result, TonalError};
use crate::log2::Log2;
use crate::ratio::Ratio;

/// The nearest step of a `modulo`-EDO to some interval, e.g. `7\12` for 3/2.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Step {
    step: i64,
    modulo: u32,
    log: Log2,
}

impl Step {
    /// Nearest step to `ratio`.
    pub fn from_ratio(ratio: &Ratio, modulo: u32) -> Result<Self> {
        if !ratio.is_positive_finite() {
            return Err(TonalError::InvalidTarget {
                ratio: ratio.to_string(),
                reason: "only positive, finite ratios fall on a step",
            });
        }
        Self::from_log2(ratio.to_log2(), modulo)
    }

    /// Nearest step to an interval of `log.logarithm()` octaves.
    pub fn from_log2(log: Log2, modulo: u32) -> Result<Self> {
        if modulo == 0 {
            return Err(TonalError::invalid_parameter("modulo", "must be at least 1"));
        }
        let step = (modulo as f64 * log.logarithm()).round() as i64;
        Ok(Self { step, modulo, log })
    }

    /// Exactly step `step` of `modulo`.
    pub fn new(step: i64, modulo: u32) -> Result<Self> {
        if modulo == 0 {
            return Err(TonalError::invalid_parameter("modulo", "must be at least 1"));
        }
        let log = Log2::from_logarithm(step as f64 / modulo as f64);
        Ok(Self { step, modulo, log })
    }

    /// Number of steps.
    pub fn step(&self) -> i64 {
        self.step
    }

    /// Steps per octave.
    pub fn modulo(&self) -> u32 {
        self.modulo
    }

    /// The same interval measured in another EDO.
    pub fn convert(&self, modulo: u32) -> Result<Self> {
        Self::from_log2(self.log, modulo)
    }

    /// The tempered interval `2^(step/modulo)` as an exact float ratio.
    pub fn tempered(&self) -> Result<Ratio> {
        Ratio::from_f64((self.step as f64 / self.modulo as f64).exp2())
    }

    /// Cents of the tempered step.
    pub fn step_cents(&self) -> Cents {
        Cents::new(1200.0 * self.step as f64 / self.modulo as f64)
    }

    /// Cents of the measured interval.
    pub fn ratio_cents(&self) -> Cents {
        self.log.to_cents()
    }

    /// How far the measured interval sits above its tempered step.
    pub fn efficiency(&self) -> Cents {
        self.ratio_cents() - self.step_cents()
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\\{}", self.step, self.modulo)
    }
}
