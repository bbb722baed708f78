//! Frequencies.

use std::fmt;
use std::ops::{Div, Mul};

use serde::{Deserialize, Serialize};

use crate::cents::{Cents, CENT_SCALE};
use crate::error::{Result, TonalError};
use crate::ratio::Ratio;

/// A frequency in Hertz.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hertz(f64);

impl Hertz {
    /// Concert pitch, A4.
    pub const A440: Hertz = Hertz(440.0);

    /// MIDI note number of [`Hertz::A440`].
    pub const A440_MIDI_NOTE: f64 = 69.0;

    /// A frequency of `value` Hz. Negative, NaN and infinite values are refused.
    pub fn new(value: f64) -> Result<Self> {
        if !(value.is_finite() && value >= 0.0) {
            return Err(TonalError::invalid_parameter(
                "hertz",
                format!("{} is not a non-negative, finite frequency", value),
            ));
        }
        Ok(Self(value))
    }

    /// The 12-EDO frequency of a (possibly fractional) MIDI note, tuned to A440.
    pub fn from_midi_note(note: f64) -> Result<Self> {
        Self::new(Self::A440.0 * ((note - Self::A440_MIDI_NOTE) / 12.0).exp2())
    }

    /// Value in Hz.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Value in Hz.
    pub fn to_f64(&self) -> f64 {
        self.0
    }

    /// The exact rational value of the frequency.
    pub fn to_ratio(&self) -> Result<Ratio> {
        Ratio::from_f64(self.0)
    }

    /// The fractional MIDI note of this frequency, relative to A440.
    pub fn to_midi_note(&self) -> f64 {
        Self::A440_MIDI_NOTE + 12.0 * (self.0 / Self::A440.0).log2()
    }

    /// Cents from `self` up to `other`.
    pub fn cents_to(&self, other: Hertz) -> Cents {
        Cents::new(CENT_SCALE * (other.0 / self.0).log2())
    }

    /// `self` transposed by `ratio`.
    pub fn transpose(&self, ratio: &Ratio) -> Hertz {
        Hertz(self.0 * ratio.to_f64())
    }
}

impl Default for Hertz {
    fn default() -> Self {
        Self::A440
    }
}

impl fmt::Display for Hertz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Hz", self.0)
    }
}

impl Mul<Ratio> for Hertz {
    type Output = Hertz;

    fn mul(self, rhs: Ratio) -> Hertz {
        self.transpose(&rhs)
    }
}

/// The frequency ratio of two pitches.
impl Div for Hertz {
    type Output = f64;

    fn div(self, rhs: Hertz) -> f64 {
        self.0 / rhs.0
    }
}
