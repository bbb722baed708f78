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

//! Exact tuning mathematics and rational approximation of intervals.
//!
//! Intervals are [`Ratio`]s of two unsigned integers, kept exactly as they
//! were built and compared by their reduced value. They convert to
//! [`Cents`], [`Log2`] and equal-division [`Step`]s, and carry the usual
//! complexity measures (Benedetti, Tenney, Weil and Wilson heights).
//! [`ReducedRatio`] folds ratios into one equave, [`ExtendedRatio`] writes
//! chords as `4:5:6`, and [`Hertz`] ties ratios to frequencies.
//!
//! The [`Approximation`] engine searches for simple ratios within a cents
//! tolerance of any target, including irrational ones such as equal
//! temperament steps, by continued fraction convergents, by walking the
//! Stern-Brocot [`FractionTree`], by superparticular steps, or through the
//! integer lattice around scaled copies of the target.
//!
//! ```
//! use tonal::{QuotientWalkParams, Ratio};
//!
//! let semitone = Ratio::ed(12, 1)?;
//! let set = semitone.approximate()?.by_quotient_walk(&QuotientWalkParams {
//!     max_prime: Some(89),
//!     ..QuotientWalkParams::default()
//! })?;
//! assert_eq!(set.to_string(), "4771397596969315/4503599627370496: [18/17, 196/185, 89/84, 71/67, 53/50, 35/33, 17/16]");
//! # Ok::<(), tonal::TonalError>(())
//! ```

#![warn(missing_docs)]

pub mod approximation;
pub mod cents;
pub mod comma;
pub mod continued_fraction;
mod error;
pub mod extended_ratio;
pub mod fraction_tree;
pub mod hertz;
pub mod interval;
pub mod logarithm;
pub mod log2;
pub mod primes;
pub mod ratio;
pub mod reduced_ratio;
pub mod step;

pub use approximation::{
    Approximation, ApproximationSet, ContinuedFractionParams, NeighborhoodParams,
    QuotientWalkParams, SuperparticularParams, TreePathParams,
};
pub use cents::{within_cents, Cents, CENT_SCALE};
pub use comma::{Comma, COMMAS};
pub use continued_fraction::{ContinuedFraction, CONVERGENT_LIMIT};
pub use error::{Result, TonalError};
pub use extended_ratio::{Domain, ExtendedRatio};
pub use fraction_tree::{FractionTree, Node};
pub use hertz::Hertz;
pub use interval::Interval;
pub use logarithm::Log;
pub use log2::Log2;
pub use ratio::{to_ratio, Ratio, RatioLike, Superpart};
pub use reduced_ratio::ReducedRatio;
pub use step::Step;
