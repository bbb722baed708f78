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

//! Exact musical ratios.
//!
//! A [`Ratio`] keeps the antecedent and consequent exactly as it was built
//! (`1044/694` stays `1044/694`), which is what the lattice searches need:
//! a ratio is also a point on the integer grid. Comparisons, ordering and
//! hashing all go through the reduced value, so `1044/694 == 522/347`.
//!
//! Terms are `u128`. A float target carries terms around 2^52 and the
//! searches scale those by up to a million, which leaves plenty of headroom;
//! cross products for comparisons are taken at 256 bits.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::approximation::Approximation;
use crate::cents::Cents;
use crate::error::{Result, TonalError};
use crate::logarithm::Log;
use crate::log2::Log2;
use crate::primes;
use crate::reduced_ratio::ReducedRatio;
use crate::step::Step;

/// `(prime, exponent)` pairs of one side of a ratio.
pub type PrimeDivisions = Vec<(u128, u32)>;

/// An exact, non-negative ratio `antecedent/consequent`.
///
/// A zero consequent denotes an infinite ratio; all infinite ratios compare
/// equal to each other and greater than every finite one.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Ratio {
    antecedent: u128,
    consequent: u128,
}

/// Which side of a superparticular carries the extra summand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Superpart {
    /// `(n + 1) / n`, an ascending interval.
    #[default]
    Upper,
    /// `n / (n + 1)`, a descending interval.
    Lower,
}

impl Ratio {
    /// The unison, `1/1`.
    pub const UNISON: Ratio = Ratio::new(1, 1);

    /// The octave, `2/1`.
    pub const OCTAVE: Ratio = Ratio::new(2, 1);

    /// The just fifth, `3/2`, the axis of the Ernst Levy negative.
    pub const FIFTH: Ratio = Ratio::new(3, 2);

    /// Largest prime a [`Ratio::prime_vector`] will index up to.
    pub const MAX_PRIME_VECTOR_PRIME: u128 = 1 << 20;

    /// Build a ratio from its two terms, unreduced.
    pub const fn new(antecedent: u128, consequent: u128) -> Self {
        Self {
            antecedent,
            consequent,
        }
    }

    /// Build a ratio from signed terms. The sign is discarded, not preserved.
    pub fn from_signed(antecedent: i128, consequent: i128) -> Self {
        Self::new(antecedent.unsigned_abs(), consequent.unsigned_abs())
    }

    /// The exact rational value of a double, e.g. `1.5 -> 3/2`.
    ///
    /// The binary expansion is kept as is, so `2^(1/12)` becomes
    /// `4771397596969315/4503599627370496`.
    pub fn from_f64(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(TonalError::NonFinite(value));
        }
        let (mantissa, exponent, _sign) = Float::integer_decode(value);
        if mantissa == 0 {
            return Ok(Self::new(0, 1));
        }

        let shift = mantissa.trailing_zeros();
        let mantissa = u128::from(mantissa >> shift);
        let exponent = exponent as i32 + shift as i32;

        if exponent >= 0 {
            if exponent as u32 > mantissa.leading_zeros() {
                return Err(TonalError::overflow(format!("{} is too large", value)));
            }
            Ok(Self::new(mantissa << exponent, 1))
        } else {
            let exponent = (-exponent) as u32;
            if exponent > 127 {
                return Err(TonalError::overflow(format!("{} is too small", value)));
            }
            Ok(Self::new(mantissa, 1u128 << exponent))
        }
    }

    /// Step `step` of `modulo` equal divisions of the octave, `2^(step/modulo)`.
    pub fn ed(modulo: u32, step: i32) -> Result<Self> {
        if modulo == 0 {
            return Err(TonalError::invalid_parameter("modulo", "must be at least 1"));
        }
        Self::from_f64(2.0_f64.powf(step as f64 / modulo as f64))
    }

    /// `(n + 1) / n` (or its inversion) multiplied by `factor`, unreduced.
    pub fn superparticular(n: u128, factor: Ratio, superpart: Superpart) -> Result<Self> {
        Self::superpartient(n, 1, factor, superpart)
    }

    /// `(n + summand) / n` (or its inversion) multiplied by `factor`, unreduced.
    pub fn superpartient(n: u128, summand: u128, factor: Ratio, superpart: Superpart) -> Result<Self> {
        let sum = checked_sum(n, summand)?;
        let (upper, lower) = match superpart {
            Superpart::Upper => (sum, n),
            Superpart::Lower => (n, sum),
        };
        Ok(Self::new(
            checked_product(upper, factor.antecedent)?,
            checked_product(lower, factor.consequent)?,
        ))
    }

    /// The numerator as stored.
    pub fn antecedent(&self) -> u128 {
        self.antecedent
    }

    /// The denominator as stored.
    pub fn consequent(&self) -> u128 {
        self.consequent
    }

    /// Both terms as stored, without reduction.
    pub fn to_tuple(&self) -> (u128, u128) {
        (self.antecedent, self.consequent)
    }

    /// Whether the consequent is zero.
    pub fn is_infinite(&self) -> bool {
        self.consequent == 0
    }

    /// Whether this is a finite zero, `0/b` with `b > 0`.
    pub fn is_zero(&self) -> bool {
        self.antecedent == 0 && self.consequent != 0
    }

    /// Neither zero nor infinite.
    pub fn is_positive_finite(&self) -> bool {
        self.antecedent != 0 && self.consequent != 0
    }

    /// Nearest double; infinite ratios give `f64::INFINITY`.
    pub fn to_f64(&self) -> f64 {
        if self.is_infinite() {
            return f64::INFINITY;
        }
        self.antecedent as f64 / self.consequent as f64
    }

    /// Size in cents, `+inf` for infinite ratios.
    pub fn to_cents(&self) -> Cents {
        Cents::from_ratio(self)
    }

    /// Size in octaves.
    pub fn to_log2(&self) -> Log2 {
        Log2::from_ratio(self)
    }

    /// Logarithm in an arbitrary `base`, e.g. `3/2` in base 3 is `0.369...`.
    pub fn to_log(&self, base: f64) -> Result<Log> {
        Log::from_ratio(self, base)
    }

    /// The nearest step of `modulo` equal divisions of the octave.
    pub fn step(&self, modulo: u32) -> Result<Step> {
        Step::from_ratio(self, modulo)
    }

    /// Cents from `other` up to `self`.
    pub fn cent_diff(&self, other: &Ratio) -> Cents {
        self.to_cents() - other.to_cents()
    }

    /// The approximation engine targeting this ratio.
    pub fn approximate(&self) -> Result<Approximation> {
        Approximation::new(*self)
    }

    /// Copy of `self` in lowest terms.
    pub fn reduced(&self) -> Ratio {
        if self.is_infinite() {
            return Ratio::new(1, 0);
        }
        let divisor = self.antecedent.gcd(&self.consequent);
        Ratio::new(self.antecedent / divisor, self.consequent / divisor)
    }

    /// Copy of `self` moved into `[1, equave)` by whole equaves, in lowest terms.
    ///
    /// Zero and infinite ratios are returned unchanged.
    pub fn equave_reduce(&self, equave: Ratio) -> Result<Ratio> {
        check_equave(&equave)?;
        if !self.is_positive_finite() {
            return Ok(*self);
        }

        let mut ratio = self.reduced();
        while ratio >= equave {
            ratio = ratio.checked_div(&equave)?.reduced();
        }
        while ratio < Ratio::UNISON {
            ratio = ratio.checked_mul(&equave)?.reduced();
        }
        Ok(ratio)
    }

    /// `self` octave reduced, as a [`ReducedRatio`].
    pub fn to_reduced_ratio(&self) -> Result<ReducedRatio> {
        ReducedRatio::new(*self)
    }

    /// `consequent/antecedent`.
    pub fn invert(&self) -> Ratio {
        Ratio::new(self.consequent, self.antecedent)
    }

    /// `self` reflected around `axis`: `axis^2 / self`, in lowest terms.
    pub fn mirror(&self, axis: &Ratio) -> Result<Ratio> {
        Ok(axis.checked_mul(axis)?.checked_div(self)?.reduced())
    }

    /// The Ernst Levy negative: `self` reflected so that `1/1` and `3/2`
    /// swap, i.e. `(3/2) / self`, in lowest terms.
    pub fn negative(&self) -> Result<Ratio> {
        Ok(Ratio::FIFTH.checked_div(self)?.reduced())
    }

    /// The mediant (Farey sum) of the stored terms.
    pub fn mediant(&self, other: &Ratio) -> Result<Ratio> {
        Ok(Ratio::new(
            checked_sum(self.antecedent, other.antecedent)?,
            checked_sum(self.consequent, other.consequent)?,
        ))
    }

    /// Scale the antecedent by `a` and the consequent by `b` on the ratio grid.
    pub fn scale(&self, a: u128, b: u128) -> Result<Ratio> {
        Ok(Ratio::new(
            checked_product(self.antecedent, a)?,
            checked_product(self.consequent, b)?,
        ))
    }

    /// Translate the point `(antecedent, consequent)` by `(x, y)` on the ratio grid.
    pub fn translate(&self, x: u128, y: u128) -> Result<Ratio> {
        Ok(Ratio::new(
            checked_sum(self.antecedent, x)?,
            checked_sum(self.consequent, y)?,
        ))
    }

    /// Shear the grid point by `[[1, a], [0, 1]] * [[1, 0], [b, 1]]`, so
    /// `3/2` sheared by `(1, 3)` is `14/11`.
    pub fn shear(&self, a: u128, b: u128) -> Result<Ratio> {
        let (x, y) = self.to_tuple();
        // [[1 + ab, a], [b, 1]] * (x, y)
        let diagonal = checked_sum(1, checked_product(a, b)?)?;
        Ok(Ratio::new(
            checked_sum(checked_product(diagonal, x)?, checked_product(a, y)?)?,
            checked_sum(checked_product(b, x)?, y)?,
        ))
    }

    /// Angle of the grid point `(antecedent, consequent)`, in degrees.
    pub fn planar_degrees(&self) -> f64 {
        self.planar_radians().to_degrees()
    }

    /// Angle of the grid point `(antecedent, consequent)`, in radians.
    pub fn planar_radians(&self) -> f64 {
        (self.consequent as f64).atan2(self.antecedent as f64)
    }

    /// Position of `self` on a circle one `equave` around, in degrees.
    pub fn period_degrees(&self, equave: &Ratio) -> Result<f64> {
        Ok(360.0 * self.periods(equave)?)
    }

    /// Position of `self` on a circle one `equave` around, in radians.
    pub fn period_radians(&self, equave: &Ratio) -> Result<f64> {
        Ok(std::f64::consts::TAU * self.periods(equave)?)
    }

    fn periods(&self, equave: &Ratio) -> Result<f64> {
        check_equave(equave)?;
        Ok(self.to_cents().value() / equave.to_cents().value())
    }

    /// Product of the two ratios, terms multiplied without reduction.
    pub fn checked_mul(&self, other: &Ratio) -> Result<Ratio> {
        Ok(Ratio::new(
            checked_product(self.antecedent, other.antecedent)?,
            checked_product(self.consequent, other.consequent)?,
        ))
    }

    /// Quotient of the two ratios, terms cross-multiplied without reduction.
    pub fn checked_div(&self, other: &Ratio) -> Result<Ratio> {
        self.checked_mul(&other.invert())
    }

    /// Prime factorizations of the reduced antecedent and consequent.
    pub fn prime_divisions(&self) -> (PrimeDivisions, PrimeDivisions) {
        let reduced = self.reduced();
        (
            primes::factorize(reduced.antecedent),
            primes::factorize(reduced.consequent),
        )
    }

    /// The exponent of every prime up to the largest one of the reduced
    /// ratio, consequent primes negative: `3/2 -> [-1, 1]`, `1/60 -> [-2, -1, -1]`.
    ///
    /// `None` for ratios without prime factors (`1/1`, zero, infinity).
    pub fn prime_vector(&self) -> Result<Option<Vec<i32>>> {
        let max = match self.max_prime() {
            Some(max) => max,
            None => return Ok(None),
        };
        if max > Self::MAX_PRIME_VECTOR_PRIME {
            return Err(TonalError::overflow(format!(
                "a prime vector reaching {} has too many entries",
                max
            )));
        }

        let basis = primes::primes_up_to(max as usize);
        let mut vector = vec![0i32; basis.len()];
        let (upper, lower) = self.prime_divisions();
        let signed = upper
            .iter()
            .map(|&(p, e)| (p, e as i32))
            .chain(lower.iter().map(|&(p, e)| (p, -(e as i32))));
        for (p, e) in signed {
            if let Ok(index) = basis.binary_search(&p) {
                vector[index] = e;
            }
        }
        Ok(Some(vector))
    }

    /// Largest prime of the reduced ratio; `None` when there is none (`1/1`,
    /// zero, infinity).
    pub fn max_prime(&self) -> Option<u128> {
        if !self.is_positive_finite() {
            return None;
        }
        let (upper, lower) = self.prime_divisions();
        upper.iter().chain(lower.iter()).map(|&(p, _)| p).max()
    }

    /// Smallest prime of the reduced ratio; `None` when there is none.
    pub fn min_prime(&self) -> Option<u128> {
        if !self.is_positive_finite() {
            return None;
        }
        let (upper, lower) = self.prime_divisions();
        upper.iter().chain(lower.iter()).map(|&(p, _)| p).min()
    }

    /// Whether no prime above `bound` divides the reduced ratio.
    ///
    /// `None` means unbounded. Zero and infinite ratios are never within a bound.
    pub fn within_max_prime(&self, bound: Option<u64>) -> bool {
        if !self.is_positive_finite() {
            return false;
        }
        match bound {
            None => true,
            Some(bound) => {
                let reduced = self.reduced();
                primes::is_smooth(reduced.antecedent, bound)
                    && primes::is_smooth(reduced.consequent, bound)
            }
        }
    }

    /// Product complexity `n * d` of the reduced ratio.
    pub fn benedetti_height(&self) -> BigUint {
        let reduced = self.reduced();
        BigUint::from(reduced.antecedent) * BigUint::from(reduced.consequent)
    }

    /// `log2` of the Benedetti height.
    pub fn tenney_height(&self) -> f64 {
        let reduced = self.reduced();
        (reduced.antecedent as f64).log2() + (reduced.consequent as f64).log2()
    }

    /// `max(n, d)` of the reduced ratio.
    pub fn weil_height(&self) -> u128 {
        let reduced = self.reduced();
        reduced.antecedent.max(reduced.consequent)
    }

    /// `log2` of the Weil height.
    pub fn log_weil_height(&self) -> f64 {
        (self.weil_height() as f64).log2()
    }

    /// Sum of `p * |e|` over the odd primes of the reduced ratio.
    pub fn wilson_height(&self) -> u128 {
        let (upper, lower) = self.prime_divisions();
        // p * e <= p^e, so each product fits
        upper
            .iter()
            .chain(lower.iter())
            .filter(|&&(p, _)| p != 2)
            .fold(0u128, |sum, &(p, e)| sum.saturating_add(p * u128::from(e)))
    }
}

fn check_equave(equave: &Ratio) -> Result<()> {
    if !equave.is_positive_finite() || *equave <= Ratio::UNISON {
        return Err(TonalError::invalid_parameter(
            "equave",
            format!("{} is not greater than 1/1", equave),
        ));
    }
    Ok(())
}

fn checked_product(a: u128, b: u128) -> Result<u128> {
    a.checked_mul(b)
        .ok_or_else(|| TonalError::overflow(format!("{} * {}", a, b)))
}

fn checked_sum(a: u128, b: u128) -> Result<u128> {
    a.checked_add(b)
        .ok_or_else(|| TonalError::overflow(format!("{} + {}", a, b)))
}

/// `a * b` as a 256-bit `(high, low)` pair.
fn wide_mul(a: u128, b: u128) -> (u128, u128) {
    const LOW: u128 = u64::MAX as u128;
    let (a_high, a_low) = (a >> 64, a & LOW);
    let (b_high, b_low) = (b >> 64, b & LOW);

    let low_low = a_low * b_low;
    let high_low = a_high * b_low;
    let low_high = a_low * b_high;
    let high_high = a_high * b_high;

    let middle = (low_low >> 64) + (high_low & LOW) + (low_high & LOW);
    let low = (low_low & LOW) | (middle << 64);
    let high = high_high + (high_low >> 64) + (low_high >> 64) + (middle >> 64);
    (high, low)
}

impl Default for Ratio {
    fn default() -> Self {
        Ratio::UNISON
    }
}

impl PartialEq for Ratio {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ratio {}

impl Ord for Ratio {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_infinite(), other.is_infinite()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                let left = wide_mul(self.antecedent, other.consequent);
                let right = wide_mul(other.antecedent, self.consequent);
                left.cmp(&right)
            }
        }
    }
}

impl PartialOrd for Ratio {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Ratio {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.reduced().to_tuple().hash(state);
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.antecedent, self.consequent)
    }
}

impl FromStr for Ratio {
    type Err = TonalError;

    /// Accepts `3/2`, `3:2`, `7`, `1.5` and EDO steps written `1\12`.
    fn from_str(s: &str) -> Result<Self> {
        let input = s.trim();
        let parse_error = |reason: &str| TonalError::Parse {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        if let Some((step, modulo)) = input.split_once('\\') {
            let step = step
                .trim()
                .parse::<i32>()
                .map_err(|_| parse_error("EDO step must be an integer"))?;
            let modulo = modulo
                .trim()
                .parse::<u32>()
                .map_err(|_| parse_error("EDO modulo must be a positive integer"))?;
            return Ratio::ed(modulo, step);
        }

        if let Some((upper, lower)) = input.split_once(|c: char| c == '/' || c == ':') {
            let upper = upper
                .trim()
                .parse::<u128>()
                .map_err(|_| parse_error("antecedent must be a non-negative integer"))?;
            let lower = lower
                .trim()
                .parse::<u128>()
                .map_err(|_| parse_error("consequent must be a non-negative integer"))?;
            return Ok(Ratio::new(upper, lower));
        }

        if let Ok(whole) = input.parse::<u128>() {
            return Ok(Ratio::new(whole, 1));
        }

        let value = input.parse::<f64>().map_err(|_| {
            parse_error("expected a fraction (3/2), a float (1.5) or an EDO step (7\\12)")
        })?;
        Ratio::from_f64(value)
    }
}

/// Every kind of value accepted where a ratio is expected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RatioLike {
    /// A whole number `n/1`.
    Integer(u128),
    /// A double, taken at its exact binary value.
    Float(f64),
    /// Antecedent and consequent.
    Fraction(u128, u128),
    /// Already a ratio.
    Ratio(Ratio),
}

/// Convert any ratio-like value into an exact [`Ratio`].
pub fn to_ratio(value: impl Into<RatioLike>) -> Result<Ratio> {
    match value.into() {
        RatioLike::Integer(n) => Ok(Ratio::new(n, 1)),
        RatioLike::Float(x) => Ratio::from_f64(x),
        RatioLike::Fraction(a, b) => Ok(Ratio::new(a, b)),
        RatioLike::Ratio(r) => Ok(r),
    }
}

impl From<u128> for RatioLike {
    fn from(n: u128) -> Self {
        RatioLike::Integer(n)
    }
}

impl From<u64> for RatioLike {
    fn from(n: u64) -> Self {
        RatioLike::Integer(u128::from(n))
    }
}

impl From<u32> for RatioLike {
    fn from(n: u32) -> Self {
        RatioLike::Integer(u128::from(n))
    }
}

impl From<i64> for RatioLike {
    fn from(n: i64) -> Self {
        RatioLike::Integer(u128::from(n.unsigned_abs()))
    }
}

impl From<i32> for RatioLike {
    fn from(n: i32) -> Self {
        RatioLike::Integer(u128::from(n.unsigned_abs()))
    }
}

impl From<f64> for RatioLike {
    fn from(x: f64) -> Self {
        RatioLike::Float(x)
    }
}

impl From<(u64, u64)> for RatioLike {
    fn from((a, b): (u64, u64)) -> Self {
        RatioLike::Fraction(u128::from(a), u128::from(b))
    }
}

impl From<(u128, u128)> for RatioLike {
    fn from((a, b): (u128, u128)) -> Self {
        RatioLike::Fraction(a, b)
    }
}

impl From<Ratio> for RatioLike {
    fn from(r: Ratio) -> Self {
        RatioLike::Ratio(r)
    }
}

impl From<&Ratio> for RatioLike {
    fn from(r: &Ratio) -> Self {
        RatioLike::Ratio(*r)
    }
}

/// A reduced ratio hands over its basic (lowest terms) ratio.
impl From<ReducedRatio> for RatioLike {
    fn from(r: ReducedRatio) -> Self {
        RatioLike::Ratio(r.to_basic_ratio())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_equality_is_by_value() {
        assert_eq!(Ratio::new(1044, 694), Ratio::new(522, 347));
        assert_ne!(Ratio::new(3, 2), Ratio::new(4, 3));
        assert_eq!(Ratio::new(5, 0), Ratio::new(1, 0));
        assert!(Ratio::new(1, 0) > Ratio::new(u128::MAX, 1));
        assert!(Ratio::new(0, 7) < Ratio::new(1, u128::MAX));

        let set: HashSet<Ratio> = [Ratio::new(3, 2), Ratio::new(6, 4), Ratio::new(9, 6)]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_ordering_past_128_bit_products() {
        let big = u128::MAX / 3;
        assert_eq!(Ratio::new(big * 2, big), Ratio::new(2, 1));
        assert!(Ratio::new(u128::MAX, u128::MAX - 1) < Ratio::new(u128::MAX - 1, u128::MAX - 2));
        assert!(Ratio::new(u128::MAX - 1, u128::MAX) < Ratio::UNISON);
    }

    #[test]
    fn test_terms_are_kept_unreduced() {
        let r = Ratio::new(16, 14);
        assert_eq!(r.to_tuple(), (16, 14));
        assert_eq!(r.reduced().to_tuple(), (8, 7));
        assert_eq!(r.to_string(), "16/14");
    }

    #[test]
    fn test_sign_is_discarded() {
        assert_eq!(Ratio::from_signed(-3, 2).to_tuple(), (3, 2));
        assert_eq!(Ratio::from_signed(3, -2).to_tuple(), (3, 2));
        assert_eq!(Ratio::from_signed(i128::MIN, 1).antecedent(), 1u128 << 127);
    }

    #[test]
    fn test_from_f64_is_exact() {
        assert_eq!(Ratio::from_f64(1.5).unwrap().to_tuple(), (3, 2));
        assert_eq!(Ratio::from_f64(4.0).unwrap().to_tuple(), (4, 1));
        assert_eq!(Ratio::from_f64(0.0).unwrap().to_tuple(), (0, 1));
        assert_eq!(
            Ratio::from_f64(2.0_f64.powf(1.0 / 12.0)).unwrap().to_tuple(),
            (4_771_397_596_969_315, 4_503_599_627_370_496)
        );
        assert_eq!(Ratio::from_f64(2f64.powi(100)).unwrap().to_tuple(), (1 << 100, 1));
        assert!(matches!(
            Ratio::from_f64(f64::NAN),
            Err(TonalError::NonFinite(_))
        ));
        assert!(Ratio::from_f64(1e300).is_err());
        assert!(Ratio::from_f64(1e-300).is_err());
    }

    #[test]
    fn test_ed() {
        assert_eq!(Ratio::ed(12, 12).unwrap(), Ratio::OCTAVE);
        assert!((Ratio::ed(12, 7).unwrap().to_cents().value() - 700.0).abs() < 1e-9);
        assert!(Ratio::ed(0, 1).is_err());
    }

    #[test]
    fn test_superparticular() {
        let fifth = Ratio::new(3, 2);
        assert_eq!(
            Ratio::superparticular(347, fifth, Superpart::Upper)
                .unwrap()
                .to_tuple(),
            (1044, 694)
        );
        assert_eq!(
            Ratio::superparticular(346, fifth, Superpart::Lower)
                .unwrap()
                .to_tuple(),
            (1038, 694)
        );
        assert_eq!(
            Ratio::superpartient(23, 3, Ratio::UNISON, Superpart::Upper)
                .unwrap()
                .to_tuple(),
            (26, 23)
        );
    }

    #[test]
    fn test_superparticular_of_float_target_stays_exact() {
        let semitone = Ratio::ed(12, 1).unwrap();
        let step = Ratio::superparticular(17_000, semitone, Superpart::Upper).unwrap();
        assert_eq!(
            step.to_tuple(),
            (
                17_001 * 4_771_397_596_969_315,
                17_000 * 4_503_599_627_370_496
            )
        );
        assert!(step > semitone);
        assert!((step.cent_diff(&semitone).value() - 0.101_832).abs() < 1e-5);
    }

    #[test]
    fn test_equave_reduce() {
        assert_eq!(
            Ratio::new(48, 14).equave_reduce(Ratio::new(3, 1)).unwrap(),
            Ratio::new(8, 7)
        );
        assert_eq!(
            Ratio::new(1, 9).equave_reduce(Ratio::OCTAVE).unwrap(),
            Ratio::new(16, 9)
        );
        assert_eq!(
            Ratio::OCTAVE.equave_reduce(Ratio::OCTAVE).unwrap(),
            Ratio::UNISON
        );
        assert!(Ratio::new(3, 2).equave_reduce(Ratio::UNISON).is_err());
    }

    #[test]
    fn test_grid_transformations() {
        let fifth = Ratio::new(3, 2);
        assert_eq!(fifth.scale(32, 32).unwrap().to_tuple(), (96, 64));
        assert_eq!(fifth.translate(3, 3).unwrap(), Ratio::new(6, 5));
        assert_eq!(fifth.mediant(&Ratio::new(4, 3)).unwrap().to_tuple(), (7, 5));
        assert_eq!(fifth.invert().to_tuple(), (2, 3));
        assert_eq!(fifth.shear(1, 3).unwrap().to_tuple(), (14, 11));
        assert_eq!(fifth.shear(1, 1).unwrap().to_tuple(), (8, 5));
        assert!(Ratio::new(u128::MAX, 1).scale(2, 1).is_err());
    }

    #[test]
    fn test_reflections() {
        let fifth = Ratio::new(3, 2);
        assert_eq!(fifth.mirror(&Ratio::UNISON).unwrap(), Ratio::new(2, 3));
        assert_eq!(Ratio::new(4, 3).mirror(&Ratio::UNISON).unwrap(), Ratio::new(3, 4));
        assert_eq!(fifth.negative().unwrap(), Ratio::UNISON);
        assert_eq!(Ratio::new(7, 4).negative().unwrap().to_tuple(), (6, 7));
    }

    #[test]
    fn test_angles() {
        let fifth = Ratio::new(3, 2);
        assert!((fifth.planar_degrees() - 33.69).abs() < 5e-3);
        assert!((fifth.planar_radians() - 0.588).abs() < 1e-3);
        assert!((fifth.period_degrees(&Ratio::OCTAVE).unwrap() - 210.59).abs() < 5e-3);
        assert!((fifth.period_radians(&Ratio::OCTAVE).unwrap() - 3.675).abs() < 1e-3);
        assert!(fifth.period_degrees(&Ratio::new(1, 2)).is_err());
    }

    #[test]
    fn test_to_log() {
        let log = Ratio::new(3, 2).to_log(3.0).unwrap();
        assert!((log.logarithm() - 0.369_070_246_428_542_5).abs() < 1e-12);
        assert!(Ratio::new(3, 2).to_log(1.0).is_err());
    }

    #[test]
    fn test_prime_structure() {
        let r = Ratio::new(31, 30);
        assert_eq!(r.prime_divisions(), (vec![(31, 1)], vec![(2, 1), (3, 1), (5, 1)]));
        assert_eq!(r.max_prime(), Some(31));
        assert_eq!(r.min_prime(), Some(2));
        assert!(!r.within_max_prime(Some(7)));
        assert!(r.within_max_prime(Some(31)));
        assert!(r.within_max_prime(None));

        // 6/3 is 2/1
        assert_eq!(Ratio::new(6, 3).max_prime(), Some(2));
        assert_eq!(Ratio::UNISON.max_prime(), None);
        assert!(Ratio::UNISON.within_max_prime(Some(2)));
        assert!(!Ratio::new(3, 0).within_max_prime(None));
    }

    #[test]
    fn test_prime_limit_of_wide_terms() {
        // 2^(1/12) carries the primes 8335577 and 8806363
        let semitone = Ratio::ed(12, 1).unwrap();
        let step = Ratio::superparticular(17_000, semitone, Superpart::Upper).unwrap();
        assert!(!step.within_max_prime(Some(89)));
        assert!(step.within_max_prime(Some(8_806_363)));
        assert!(!step.within_max_prime(Some(8_806_362)));
        assert_eq!(step.max_prime(), Some(8_806_363));
    }

    #[test]
    fn test_prime_vector() {
        assert_eq!(Ratio::new(3, 2).prime_vector().unwrap(), Some(vec![-1, 1]));
        assert_eq!(Ratio::new(60, 1).prime_vector().unwrap(), Some(vec![2, 1, 1]));
        assert_eq!(Ratio::new(1, 60).prime_vector().unwrap(), Some(vec![-2, -1, -1]));
        assert_eq!(Ratio::new(81, 80).prime_vector().unwrap(), Some(vec![-4, 4, -1]));
        assert_eq!(Ratio::new(7, 6).prime_vector().unwrap(), Some(vec![-1, -1, 0, 1]));
        assert_eq!(Ratio::UNISON.prime_vector().unwrap(), None);
        assert!(Ratio::ed(12, 1).unwrap().prime_vector().is_err());
    }

    #[test]
    fn test_heights() {
        let fifth = Ratio::new(3, 2);
        assert_eq!(fifth.benedetti_height(), BigUint::from(6u32));
        assert!((fifth.tenney_height() - 2.584_962_500_721_156).abs() < 1e-12);
        assert_eq!(fifth.weil_height(), 3);
        assert!((fifth.log_weil_height() - 1.584_962_500_721_156).abs() < 1e-12);
        assert_eq!(Ratio::new(14, 9).wilson_height(), 13);
        assert_eq!(Ratio::new(28, 18).wilson_height(), 13);

        let wide = Ratio::new(u128::MAX, u128::MAX - 1);
        assert_eq!(
            wide.benedetti_height(),
            BigUint::from(u128::MAX) * BigUint::from(u128::MAX - 1)
        );
        assert!((wide.tenney_height() - 256.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse() {
        assert_eq!("3/2".parse::<Ratio>().unwrap().to_tuple(), (3, 2));
        assert_eq!(" 5:4 ".parse::<Ratio>().unwrap().to_tuple(), (5, 4));
        assert_eq!("7".parse::<Ratio>().unwrap().to_tuple(), (7, 1));
        assert_eq!("1.25".parse::<Ratio>().unwrap().to_tuple(), (5, 4));
        assert_eq!("1\\12".parse::<Ratio>().unwrap(), Ratio::ed(12, 1).unwrap());
        assert_eq!(
            "81129638414606681695789005144064/1".parse::<Ratio>().unwrap().to_tuple(),
            (81_129_638_414_606_681_695_789_005_144_064, 1)
        );
        assert!(matches!(
            "three halves".parse::<Ratio>(),
            Err(TonalError::Parse { .. })
        ));
        assert!("3/-2".parse::<Ratio>().is_err());
    }

    #[test]
    fn test_to_ratio() {
        assert_eq!(to_ratio(3u64).unwrap(), Ratio::new(3, 1));
        assert_eq!(to_ratio(-3i32).unwrap(), Ratio::new(3, 1));
        assert_eq!(to_ratio(1.5).unwrap(), Ratio::new(3, 2));
        assert_eq!(to_ratio((6u64, 4u64)).unwrap().to_tuple(), (6, 4));
        assert_eq!(to_ratio(Ratio::new(5, 4)).unwrap(), Ratio::new(5, 4));
        assert!(to_ratio(f64::INFINITY).is_err());
    }
}
