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

//! The Stern-Brocot fraction tree.
//!
//! Every positive rational appears exactly once as the mediant of the two
//! ancestors that bracket it, starting from the bounds `0/1` and `1/0` with
//! `1/1` at the root. Two walks toward a target are offered:
//!
//! * [`FractionTree::quotient_walk`] steps through the intermediate fractions
//!   of the target's continued fraction, one quotient at a time, for a fixed
//!   number of quotients;
//! * [`FractionTree::path_to`] bisects from the root until it lands on the
//!   target, one tree level per node.
//!
//! Both are lazy, so callers can stop as soon as they have seen enough.

use std::cmp::Ordering;

use crate::continued_fraction::ContinuedFraction;
use crate::error::{Result, TonalError};
use crate::ratio::Ratio;

/// A node of the tree and the two ancestors it is the mediant of.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Node {
    /// The rational value of the node.
    pub weight: Ratio,
    /// The nearest ancestor below `weight`.
    pub lower: Ratio,
    /// The nearest ancestor above `weight`.
    pub upper: Ratio,
}

impl Node {
    fn between(weight: Ratio, a: Ratio, b: Ratio) -> Self {
        let (lower, upper) = if a <= b { (a, b) } else { (b, a) };
        Self {
            weight,
            lower,
            upper,
        }
    }
}

/// Entry point for walks on the Stern-Brocot tree.
pub struct FractionTree;

impl FractionTree {
    /// Longest path [`FractionTree::path_to`] will descend before giving up on
    /// reaching the target. Only pathological doubles such as `1 + 2^-52`
    /// have paths anywhere near this long.
    pub const MAX_PATH_LENGTH: usize = 1 << 16;

    /// Intermediate fractions of the first `limit` continued fraction
    /// quotients of `target`.
    pub fn quotient_walk(target: &Ratio, limit: usize) -> Result<QuotientWalk> {
        let expansion = ContinuedFraction::new(target, limit)?;
        Ok(QuotientWalk {
            quotients: expansion.quotients().to_vec(),
            index: 0,
            multiple: 0,
            before: (0, 1),
            last: (1, 0),
            left: (0, 1),
        })
    }

    /// Root-to-target bisection path toward `target`.
    pub fn path_to(target: &Ratio) -> Result<PathTo> {
        if !target.is_positive_finite() {
            return Err(TonalError::InvalidTarget {
                ratio: target.to_string(),
                reason: "only positive, finite ratios lie in the fraction tree",
            });
        }
        Ok(PathTo {
            target: target.reduced(),
            lower: Ratio::new(0, 1),
            upper: Ratio::new(1, 0),
            visited: 0,
            done: false,
        })
    }
}

/// Iterator returned by [`FractionTree::quotient_walk`].
///
/// For quotient `a_k` it yields `(p_{k-2} + j p_{k-1}) / (q_{k-2} + j q_{k-1})`
/// for `j = 1..=a_k`; the last of these is the convergent `p_k / q_k`.
#[derive(Clone, Debug)]
pub struct QuotientWalk {
    quotients: Vec<u128>,
    index: usize,
    multiple: u128,
    before: (u128, u128),
    last: (u128, u128),
    left: (u128, u128),
}

impl Iterator for QuotientWalk {
    type Item = Node;

    fn next(&mut self) -> Option<Node> {
        loop {
            let &quotient = self.quotients.get(self.index)?;
            if self.multiple < quotient {
                self.multiple += 1;
                // the walk never leaves the bracket of the target's reduced terms
                let weight = (
                    self.before.0 + self.multiple * self.last.0,
                    self.before.1 + self.multiple * self.last.1,
                );
                let node = Node::between(
                    Ratio::new(weight.0, weight.1),
                    Ratio::new(self.left.0, self.left.1),
                    Ratio::new(self.last.0, self.last.1),
                );
                self.left = weight;
                return Some(node);
            }

            let convergent = (
                self.before.0 + quotient * self.last.0,
                self.before.1 + quotient * self.last.1,
            );
            self.before = self.last;
            self.last = convergent;
            self.left = self.before;
            self.multiple = 0;
            self.index += 1;
        }
    }
}

/// Iterator returned by [`FractionTree::path_to`].
#[derive(Clone, Debug)]
pub struct PathTo {
    target: Ratio,
    lower: Ratio,
    upper: Ratio,
    visited: usize,
    done: bool,
}

impl Iterator for PathTo {
    type Item = Node;

    fn next(&mut self) -> Option<Node> {
        if self.done || self.visited >= FractionTree::MAX_PATH_LENGTH {
            return None;
        }
        // every node on the path has terms no larger than the target's
        let weight = Ratio::new(
            self.lower.antecedent() + self.upper.antecedent(),
            self.lower.consequent() + self.upper.consequent(),
        );
        let node = Node {
            weight,
            lower: self.lower,
            upper: self.upper,
        };

        match weight.cmp(&self.target) {
            Ordering::Less => self.lower = weight,
            Ordering::Greater => self.upper = weight,
            Ordering::Equal => self.done = true,
        }
        self.visited += 1;
        Some(node)
    }
}
