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

//! Searches for simple ratios close to a target.
//!
//! Each `by_*` method drives one candidate generator, keeps the candidates
//! that are within the cents tolerance of the target and whose largest prime
//! is within `max_prime`, and stops once `depth` of them have been accepted
//! or the generator runs dry. All of them return a fresh [`ApproximationSet`].
//!
//! ```
//! use tonal::{Ratio, TreePathParams};
//!
//! let semitone = Ratio::ed(12, 1).unwrap();
//! let set = semitone
//!     .approximate()
//!     .unwrap()
//!     .by_tree_path(&TreePathParams::default())
//!     .unwrap();
//! assert!(set.contains(&Ratio::new(18, 17)));
//! ```

use std::time::Instant;

use log::{debug, trace};

use crate::cents::{within_cents, Cents};
use crate::continued_fraction::ContinuedFraction;
use crate::error::{Result, TonalError};
use crate::fraction_tree::FractionTree;
use crate::ratio::{to_ratio, Ratio, RatioLike};

pub mod lattice;
pub mod params;
pub mod set;

pub use params::{
    ContinuedFractionParams, NeighborhoodParams, QuotientWalkParams, SuperparticularParams,
    TreePathParams,
};
pub use set::ApproximationSet;

/// The approximation engine for one target ratio.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Approximation {
    ratio: Ratio,
}

/// Acceptance test shared by every search.
struct Criteria {
    target: f64,
    tolerance: f64,
    max_prime: Option<u64>,
    depth: Option<usize>,
}

impl Criteria {
    fn new(target: &Ratio, tolerance: Cents, max_prime: Option<u64>, depth: Option<usize>) -> Self {
        Self {
            target: target.to_cents().value(),
            tolerance: tolerance.value(),
            max_prime,
            depth,
        }
    }

    fn accepts(&self, candidate: &Ratio) -> bool {
        // cents first, factorization is the expensive half
        let accepted = within_cents(candidate.to_cents().value(), self.target, self.tolerance)
            && candidate.within_max_prime(self.max_prime);
        trace!(
            "candidate {} ({}) {}",
            candidate,
            candidate.to_cents(),
            if accepted { "accepted" } else { "rejected" }
        );
        accepted
    }

    fn is_full(&self, set: &ApproximationSet) -> bool {
        self.depth.map_or(false, |depth| set.len() >= depth)
    }
}

impl Approximation {
    /// Engine for `ratio`, which must be neither zero nor infinite.
    pub fn new(ratio: impl Into<RatioLike>) -> Result<Self> {
        let ratio = to_ratio(ratio)?;
        if ratio.is_zero() {
            return Err(TonalError::InvalidTarget {
                ratio: ratio.to_string(),
                reason: "zero is infinitely far from every interval",
            });
        }
        if ratio.is_infinite() {
            return Err(TonalError::InvalidTarget {
                ratio: ratio.to_string(),
                reason: "an infinite ratio has no approximations",
            });
        }
        Ok(Self { ratio })
    }

    /// The target.
    pub fn ratio(&self) -> Ratio {
        self.ratio
    }

    /// Continued fraction convergents, coarsest first.
    pub fn by_continued_fraction(&self, params: &ContinuedFractionParams) -> Result<ApproximationSet> {
        params.validate()?;
        debug!("approximating {} by continued fraction: {:?}", self.ratio, params);

        let criteria = Criteria::new(&self.ratio, params.cents_tolerance, params.max_prime, params.depth);
        let expansion = ContinuedFraction::new(&self.ratio, params.conv_limit)?;
        Ok(self.collect("continued fraction", &criteria, expansion.convergents()))
    }

    /// Every intermediate fraction of the first `conv_limit` quotients.
    pub fn by_quotient_walk(&self, params: &QuotientWalkParams) -> Result<ApproximationSet> {
        params.validate()?;
        debug!("approximating {} by quotient walk: {:?}", self.ratio, params);

        let criteria = Criteria::new(&self.ratio, params.cents_tolerance, params.max_prime, params.depth);
        let walk = FractionTree::quotient_walk(&self.ratio, params.conv_limit)?;
        Ok(self.collect("quotient walk", &criteria, walk.map(|node| node.weight)))
    }

    /// Nodes on the fraction tree path from `1/1` down to the target.
    pub fn by_tree_path(&self, params: &TreePathParams) -> Result<ApproximationSet> {
        params.validate()?;
        debug!("approximating {} by tree path: {:?}", self.ratio, params);

        let criteria = Criteria::new(&self.ratio, params.cents_tolerance, params.max_prime, params.depth);
        let path = FractionTree::path_to(&self.ratio)?;
        Ok(self.collect("tree path", &criteria, path.map(|node| node.weight)))
    }

    /// The target scaled by `(n+1)/n` (or `n/(n+1)`) for `n = 1, 2, 3, ...`.
    ///
    /// Fails with [`TonalError::SearchExhausted`] if `max_iterations`
    /// candidates go by before `depth` of them are accepted.
    pub fn by_superparticular(&self, params: &SuperparticularParams) -> Result<ApproximationSet> {
        params.validate()?;
        debug!("approximating {} by superparticular: {:?}", self.ratio, params);

        let criteria = Criteria::new(&self.ratio, params.cents_tolerance, params.max_prime, params.depth);
        let mut set = ApproximationSet::new(self.ratio);
        let mut n = 0;
        while !criteria.is_full(&set) {
            if n == params.max_iterations {
                return Err(TonalError::SearchExhausted {
                    method: "superparticular",
                    iterations: n,
                    found: set.len(),
                    depth: params.depth.unwrap_or_default(),
                });
            }
            n += 1;
            let candidate = Ratio::superparticular(u128::from(n), self.ratio, params.superpart)?;
            if candidate != self.ratio && criteria.accepts(&candidate) {
                set.insert(candidate);
            }
        }

        debug!("superparticular: {} approximations after {} candidates", set.len(), n);
        Ok(set)
    }

    /// Lattice neighbors of the target's terms scaled by `1..=max_scale`, at
    /// distances `1..=max_boundary`.
    ///
    /// Fails with [`TonalError::DeadlineExceeded`] once `deadline` has passed.
    pub fn by_neighborhood(&self, params: &NeighborhoodParams) -> Result<ApproximationSet> {
        params.validate()?;
        debug!("approximating {} by neighborhood: {:?}", self.ratio, params);

        let started = Instant::now();
        let criteria = Criteria::new(&self.ratio, params.cents_tolerance, params.max_prime, params.depth);
        let mut set = ApproximationSet::new(self.ratio);

        'scales: for scale in 1..=params.max_scale {
            let vicinity = self.ratio.scale(u128::from(scale), u128::from(scale))?;
            for boundary in 1..=params.max_boundary {
                if let Some(deadline) = params.deadline {
                    if started.elapsed() >= deadline {
                        return Err(TonalError::DeadlineExceeded {
                            method: "neighborhood",
                            millis: deadline.as_millis(),
                        });
                    }
                }
                for candidate in lattice::neighbors(&vicinity, boundary)? {
                    if criteria.is_full(&set) {
                        break 'scales;
                    }
                    if candidate != self.ratio && criteria.accepts(&candidate) {
                        set.insert(candidate);
                    }
                }
            }
        }

        debug!(
            "neighborhood: {} approximations in {:?}",
            set.len(),
            started.elapsed()
        );
        Ok(set)
    }

    /// Every lattice point within `boundary` of the target scaled by `scale`,
    /// unfiltered and ascending by value.
    pub fn neighborhood(&self, scale: u64, boundary: u64) -> Result<Vec<Ratio>> {
        if scale == 0 {
            return Err(TonalError::invalid_parameter("scale", "must be at least 1"));
        }
        if boundary == 0 {
            return Err(TonalError::invalid_parameter("boundary", "must be at least 1"));
        }
        lattice::neighborhood(&self.ratio, scale, boundary)
    }

    /// The nine lattice points `away` steps around `vicinity`, itself included.
    pub fn neighbors(vicinity: impl Into<RatioLike>, away: u64) -> Result<[Ratio; 9]> {
        lattice::neighbors(&to_ratio(vicinity)?, away)
    }

    fn collect(
        &self,
        method: &str,
        criteria: &Criteria,
        candidates: impl Iterator<Item = Ratio>,
    ) -> ApproximationSet {
        let mut set = ApproximationSet::new(self.ratio);
        let mut seen = 0;
        for candidate in candidates {
            if criteria.is_full(&set) {
                break;
            }
            seen += 1;
            if criteria.accepts(&candidate) {
                set.insert(candidate);
            }
        }
        debug!("{}: {} approximations from {} candidates", method, set.len(), seen);
        set
    }
}
