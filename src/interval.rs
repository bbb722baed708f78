//! The interval between two ratios.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cents::Cents;
use crate::error::Result;
use crate::ratio::Ratio;

/// The distance from a lower ratio up to an upper one, `upper / lower`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    lower: Ratio,
    upper: Ratio,
    interval: Ratio,
}

impl Interval {
    /// The interval from `lower` up to `upper`.
    pub fn new(upper: Ratio, lower: Ratio) -> Result<Self> {
        let interval = upper.checked_div(&lower)?.reduced();
        Ok(Self {
            lower,
            upper,
            interval,
        })
    }

    /// The ratio the interval starts from.
    pub fn lower(&self) -> Ratio {
        self.lower
    }

    /// The ratio the interval reaches.
    pub fn upper(&self) -> Ratio {
        self.upper
    }

    /// `upper / lower` in lowest terms.
    pub fn ratio(&self) -> Ratio {
        self.interval
    }

    /// Size of the interval.
    pub fn to_cents(&self) -> Cents {
        self.interval.to_cents()
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} / {})",
            self.interval,
            self.upper.reduced(),
            self.lower.reduced()
        )
    }
}
