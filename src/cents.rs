// Copyright 2025 Tyler Neely (tylerneely@gmail.com).
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.
//
// See http://creativecommons.org/licenses/MIT/ for more information.

//! Cents, the logarithmic unit of pitch distance (1200 per octave).

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::ratio::Ratio;

/// Cents in one octave.
pub const CENT_SCALE: f64 = 1200.0;

/// Decimal places used when cents are displayed.
pub const PRECISION: i32 = 2;

/// A pitch distance in cents, held at full precision.
///
/// Rounding to hundredths only happens on display (and in [`Cents::rounded`]);
/// tolerance comparisons always see the full value.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cents(f64);

impl Cents {
    /// Tolerance used by every approximation method unless told otherwise.
    pub const DEFAULT_TOLERANCE: f64 = 5.0;

    /// Wrap a number of cents.
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// The default search tolerance, 5¢.
    pub const fn default_tolerance() -> Self {
        Self(Self::DEFAULT_TOLERANCE)
    }

    /// `1200 * log2(ratio)`. Infinite ratios give `+inf`, zero gives `-inf`.
    pub fn from_ratio(ratio: &Ratio) -> Self {
        if ratio.is_infinite() {
            return Self(f64::INFINITY);
        }
        // log2(a) - log2(b) keeps precision for terms far beyond 2^53
        let upper = (ratio.antecedent() as f64).log2();
        let lower = (ratio.consequent() as f64).log2();
        Self(CENT_SCALE * (upper - lower))
    }

    /// Full precision value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Value rounded to hundredths of a cent.
    pub fn rounded(&self) -> f64 {
        let scale = 10f64.powi(PRECISION);
        (self.0 * scale).round() / scale
    }

    /// Distance from zero.
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// The nearest multiple of 100¢ (the nearest 12-EDO step).
    pub fn nearest_hundred(&self) -> Self {
        Self((self.0 / 100.0).round() * 100.0)
    }

    /// Distance from the nearest multiple of 100¢.
    pub fn nearest_hundred_difference(&self) -> Self {
        *self - self.nearest_hundred()
    }

    /// `(self - offset, self + offset)`.
    pub fn plus_minus(&self, offset: Cents) -> (Self, Self) {
        (*self - offset, *self + offset)
    }

    /// `log2` of the ratio these cents describe.
    pub fn to_log2(&self) -> f64 {
        self.0 / CENT_SCALE
    }

    /// Whether `other` is no further than `tolerance` from `self`.
    pub fn within(&self, other: Cents, tolerance: Cents) -> bool {
        within_cents(self.0, other.0, tolerance.0)
    }
}

/// `|a - b| <= tolerance`, compared on full precision values.
///
/// Any `NaN` or infinite distance fails the test.
pub fn within_cents(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

impl From<f64> for Cents {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<Cents> for f64 {
    fn from(cents: Cents) -> Self {
        cents.0
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.*}", PRECISION as usize, self.0)
    }
}

impl Add for Cents {
    type Output = Cents;

    fn add(self, rhs: Cents) -> Cents {
        Cents(self.0 + rhs.0)
    }
}

impl Sub for Cents {
    type Output = Cents;

    fn sub(self, rhs: Cents) -> Cents {
        Cents(self.0 - rhs.0)
    }
}

impl Mul<f64> for Cents {
    type Output = Cents;

    fn mul(self, rhs: f64) -> Cents {
        Cents(self.0 * rhs)
    }
}

impl Div<f64> for Cents {
    type Output = Cents;

    fn div(self, rhs: f64) -> Cents {
        Cents(self.0 / rhs)
    }
}

impl Neg for Cents {
    type Output = Cents;

    fn neg(self) -> Cents {
        Cents(-self.0)
    }
}
