//! Search parameters for each approximation method.
//!
//! Every struct has public fields and a `Default`, so callers only spell out
//! what they change:
//!
//! ```
//! use tonal::{QuotientWalkParams, Ratio};
//!
//! let params = QuotientWalkParams {
//!     max_prime: Some(89),
//!     ..QuotientWalkParams::default()
//! };
//! let semitone = Ratio::ed(12, 1).unwrap();
//! let set = semitone.approximate().unwrap().by_quotient_walk(&params).unwrap();
//! assert_eq!(set.len(), 7);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cents::Cents;
use crate::continued_fraction::CONVERGENT_LIMIT;
use crate::error::{Result, TonalError};
use crate::ratio::Superpart;

/// Continued fraction search. Unbounded depth: the quotient limit ends it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContinuedFractionParams {
    /// Largest accepted distance from the target.
    pub cents_tolerance: Cents,
    /// Maximum number of accepted ratios; `None` for no limit.
    pub depth: Option<usize>,
    /// Largest prime allowed in an accepted ratio; `None` for no limit.
    pub max_prime: Option<u64>,
    /// Number of partial quotients (and so convergents) to generate.
    pub conv_limit: usize,
}

impl Default for ContinuedFractionParams {
    fn default() -> ContinuedFractionParams {
        ContinuedFractionParams {
            cents_tolerance: Cents::default_tolerance(),
            depth: None,
            max_prime: None,
            conv_limit: CONVERGENT_LIMIT,
        }
    }
}

/// Fraction tree walk guided by continued fraction quotients.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotientWalkParams {
    /// Largest accepted distance from the target.
    pub cents_tolerance: Cents,
    /// Maximum number of accepted ratios; `None` for no limit.
    pub depth: Option<usize>,
    /// Largest prime allowed in an accepted ratio; `None` for no limit.
    pub max_prime: Option<u64>,
    /// Number of partial quotients to walk through.
    pub conv_limit: usize,
}

impl Default for QuotientWalkParams {
    fn default() -> QuotientWalkParams {
        QuotientWalkParams {
            cents_tolerance: Cents::default_tolerance(),
            depth: Some(10),
            max_prime: None,
            conv_limit: CONVERGENT_LIMIT,
        }
    }
}

/// Fraction tree bisection from the root toward the target.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreePathParams {
    /// Largest accepted distance from the target.
    pub cents_tolerance: Cents,
    /// Maximum number of accepted ratios; `None` for no limit.
    pub depth: Option<usize>,
    /// Largest prime allowed in an accepted ratio; `None` for no limit.
    pub max_prime: Option<u64>,
}

impl Default for TreePathParams {
    fn default() -> TreePathParams {
        TreePathParams {
            cents_tolerance: Cents::default_tolerance(),
            depth: Some(10),
            max_prime: None,
        }
    }
}

/// Superparticulars `(n+1)/n` scaled by the target.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuperparticularParams {
    /// Largest accepted distance from the target.
    pub cents_tolerance: Cents,
    /// Must be set: the candidate sequence is infinite.
    pub depth: Option<usize>,
    /// Largest prime allowed in an accepted ratio; `None` for no limit.
    pub max_prime: Option<u64>,
    /// Whether the `+1` goes on the antecedent (`Upper`) or the consequent.
    pub superpart: Superpart,
    /// Candidates evaluated before the search gives up.
    pub max_iterations: u64,
}

impl Default for SuperparticularParams {
    fn default() -> SuperparticularParams {
        SuperparticularParams {
            cents_tolerance: Cents::default_tolerance(),
            depth: Some(20),
            max_prime: None,
            superpart: Superpart::Upper,
            max_iterations: 1_000_000,
        }
    }
}

/// Lattice neighbors of successively scaled copies of the target.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeighborhoodParams {
    /// Largest accepted distance from the target.
    pub cents_tolerance: Cents,
    /// Maximum number of accepted ratios; `None` for no limit.
    pub depth: Option<usize>,
    /// Largest prime allowed in an accepted ratio; `None` for no limit.
    pub max_prime: Option<u64>,
    /// Largest Chebyshev distance searched around each scaled target.
    pub max_boundary: u64,
    /// Largest factor the target's terms are scaled by.
    pub max_scale: u64,
    /// Wall-clock budget for the whole search.
    pub deadline: Option<Duration>,
}

impl Default for NeighborhoodParams {
    fn default() -> NeighborhoodParams {
        NeighborhoodParams {
            cents_tolerance: Cents::default_tolerance(),
            depth: Some(10),
            max_prime: None,
            max_boundary: 5,
            max_scale: 100,
            deadline: None,
        }
    }
}

fn validate_common(cents_tolerance: Cents, depth: Option<usize>, max_prime: Option<u64>) -> Result<()> {
    let tolerance = cents_tolerance.value();
    if tolerance.is_nan() || tolerance < 0.0 {
        return Err(TonalError::invalid_parameter(
            "cents_tolerance",
            format!("{} is not a non-negative number of cents", tolerance),
        ));
    }
    if depth == Some(0) {
        return Err(TonalError::invalid_parameter("depth", "must be at least 1"));
    }
    if let Some(p) = max_prime {
        if p < 2 {
            return Err(TonalError::invalid_parameter(
                "max_prime",
                format!("{} admits no prime at all", p),
            ));
        }
    }
    Ok(())
}

fn nonzero<T: Default + PartialEq>(name: &'static str, value: T) -> Result<()> {
    if value == T::default() {
        return Err(TonalError::invalid_parameter(name, "must be at least 1"));
    }
    Ok(())
}

impl ContinuedFractionParams {
    /// Reject out of range values before any search work.
    pub fn validate(&self) -> Result<()> {
        validate_common(self.cents_tolerance, self.depth, self.max_prime)?;
        nonzero("conv_limit", self.conv_limit)
    }
}

impl QuotientWalkParams {
    /// Reject out of range values before any search work.
    pub fn validate(&self) -> Result<()> {
        validate_common(self.cents_tolerance, self.depth, self.max_prime)?;
        nonzero("conv_limit", self.conv_limit)
    }
}

impl TreePathParams {
    /// Reject out of range values before any search work.
    pub fn validate(&self) -> Result<()> {
        validate_common(self.cents_tolerance, self.depth, self.max_prime)
    }
}

impl SuperparticularParams {
    /// Reject out of range values before any search work.
    pub fn validate(&self) -> Result<()> {
        validate_common(self.cents_tolerance, self.depth, self.max_prime)?;
        if self.depth.is_none() {
            return Err(TonalError::UnboundedSearch {
                method: "superparticular",
            });
        }
        nonzero("max_iterations", self.max_iterations)
    }
}

impl NeighborhoodParams {
    /// Reject out of range values before any search work.
    pub fn validate(&self) -> Result<()> {
        validate_common(self.cents_tolerance, self.depth, self.max_prime)?;
        nonzero("max_boundary", self.max_boundary)?;
        nonzero("max_scale", self.max_scale)
    }
}
