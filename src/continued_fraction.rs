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

//! Simple continued fractions of exact ratios.
//!
//! The expansion is taken with Euclid's algorithm on the reduced terms, so a
//! rational target terminates exactly instead of trailing off into float
//! noise, and a float target (whose exact value is `m / 2^k`) expands to the
//! continued fraction of the double itself.

use crate::error::{Result, TonalError};
use crate::ratio::Ratio;

/// Default number of partial quotients kept by the approximation engine.
pub const CONVERGENT_LIMIT: usize = 10;

/// The first `limit` partial quotients `[a0; a1, a2, ...]` of a ratio.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContinuedFraction {
    target: Ratio,
    quotients: Vec<u128>,
    complete: bool,
}

impl ContinuedFraction {
    /// Expand `target`, keeping at most `limit` partial quotients.
    pub fn new(target: &Ratio, limit: usize) -> Result<Self> {
        if target.is_infinite() {
            return Err(TonalError::InvalidTarget {
                ratio: target.to_string(),
                reason: "an infinite ratio has no continued fraction",
            });
        }

        let reduced = target.reduced();
        let (mut p, mut q) = reduced.to_tuple();
        let mut quotients = Vec::new();
        while q != 0 && quotients.len() < limit {
            let a = p / q;
            quotients.push(a);
            (p, q) = (q, p - a * q);
        }

        Ok(Self {
            target: reduced,
            quotients,
            complete: q == 0,
        })
    }

    /// Expand the exact value of a double.
    pub fn from_f64(value: f64, limit: usize) -> Result<Self> {
        Self::new(&Ratio::from_f64(value)?, limit)
    }

    /// The ratio being expanded, in lowest terms.
    pub fn target(&self) -> Ratio {
        self.target
    }

    /// Partial quotients, `a0` first.
    pub fn quotients(&self) -> &[u128] {
        &self.quotients
    }

    /// Whether the whole expansion fit within the limit, i.e. the last
    /// convergent is the target itself.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Convergents `p_k / q_k`, coarsest first.
    pub fn convergents(&self) -> Convergents<'_> {
        Convergents {
            quotients: self.quotients.iter(),
            previous: (0, 1),
            current: (1, 0),
        }
    }
}

/// Iterator over the convergents of a [`ContinuedFraction`].
#[derive(Clone, Debug)]
pub struct Convergents<'a> {
    quotients: std::slice::Iter<'a, u128>,
    previous: (u128, u128),
    current: (u128, u128),
}

impl Iterator for Convergents<'_> {
    type Item = Ratio;

    fn next(&mut self) -> Option<Ratio> {
        let &a = self.quotients.next()?;
        // convergents never outgrow the reduced terms of the target
        let next = (
            a * self.current.0 + self.previous.0,
            a * self.current.1 + self.previous.1,
        );
        self.previous = self.current;
        self.current = next;
        Some(Ratio::new(next.0, next.1))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.quotients.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuples(cf: &ContinuedFraction) -> Vec<(u128, u128)> {
        cf.convergents().map(|r| r.to_tuple()).collect()
    }

    #[test]
    fn test_rational_expansion_terminates() {
        let cf = ContinuedFraction::new(&Ratio::new(15, 13), 10).unwrap();
        assert_eq!(cf.quotients(), &[1, 6, 2]);
        assert!(cf.is_complete());
        assert_eq!(tuples(&cf), vec![(1, 1), (7, 6), (15, 13)]);
    }

    #[test]
    fn test_expansion_uses_reduced_terms() {
        let cf = ContinuedFraction::new(&Ratio::new(6, 4), 10).unwrap();
        assert_eq!(cf.quotients(), &[1, 2]);
        assert_eq!(cf.target().to_tuple(), (3, 2));
    }

    #[test]
    fn test_trivial_ratios() {
        assert_eq!(tuples(&ContinuedFraction::new(&Ratio::UNISON, 10).unwrap()), vec![(1, 1)]);
        assert_eq!(tuples(&ContinuedFraction::new(&Ratio::OCTAVE, 10).unwrap()), vec![(2, 1)]);
        assert!(ContinuedFraction::new(&Ratio::new(1, 0), 10).is_err());
    }

    #[test]
    fn test_semitone_convergents() {
        let semitone = Ratio::ed(12, 1).unwrap();
        let cf = ContinuedFraction::new(&semitone, 10).unwrap();
        assert_eq!(cf.quotients(), &[1, 16, 1, 4, 2, 7, 1, 1, 2, 2]);
        assert!(!cf.is_complete());
        assert_eq!(
            tuples(&cf),
            vec![
                (1, 1),
                (17, 16),
                (18, 17),
                (89, 84),
                (196, 185),
                (1461, 1379),
                (1657, 1564),
                (3118, 2943),
                (7893, 7450),
                (18904, 17843),
            ]
        );
    }

    #[test]
    fn test_convergents_alternate_around_target() {
        let cf = ContinuedFraction::from_f64(std::f64::consts::PI, 6).unwrap();
        let target = cf.target();
        let convergents: Vec<Ratio> = cf.convergents().collect();
        for (k, convergent) in convergents.iter().enumerate() {
            if k % 2 == 0 {
                assert!(*convergent <= target);
            } else {
                assert!(*convergent >= target);
            }
        }
        assert_eq!(convergents[1].to_tuple(), (22, 7));
        assert_eq!(convergents[3].to_tuple(), (355, 113));
    }

    #[test]
    fn test_limit_caps_quotients() {
        let cf = ContinuedFraction::from_f64(std::f64::consts::E, 3).unwrap();
        assert_eq!(cf.quotients(), &[2, 1, 2]);
        assert_eq!(cf.convergents().count(), 3);
        assert!(ContinuedFraction::new(&Ratio::new(3, 2), 0)
            .unwrap()
            .quotients()
            .is_empty());
    }
}
