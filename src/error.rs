//! Error type shared by every fallible operation in the crate.

/// Errors raised while constructing ratios or running approximation searches.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TonalError {
    /// The ratio handed to the approximation engine cannot be approximated.
    #[error("cannot approximate {ratio}: {reason}")]
    InvalidTarget {
        /// The offending ratio as text.
        ratio: String,
        /// Why it was refused.
        reason: &'static str,
    },

    /// A search parameter is outside of its valid range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Field name of the parameter.
        name: &'static str,
        /// What was wrong with its value.
        reason: String,
    },

    /// The search has no intrinsic end and no depth was given to stop it.
    #[error("{method} search needs a finite depth: its candidate sequence never ends")]
    UnboundedSearch {
        /// The search method.
        method: &'static str,
    },

    /// The safety cap on candidate evaluations was reached before the depth was.
    #[error("{method} search gave up after {iterations} candidates with {found} of {depth} results")]
    SearchExhausted {
        /// The search method.
        method: &'static str,
        /// Candidates evaluated.
        iterations: u64,
        /// Candidates accepted.
        found: usize,
        /// Candidates wanted.
        depth: usize,
    },

    /// The caller supplied deadline passed while the search was still running.
    #[error("{method} search exceeded its deadline of {millis}ms")]
    DeadlineExceeded {
        /// The search method.
        method: &'static str,
        /// The deadline that passed.
        millis: u128,
    },

    /// An antecedent or consequent no longer fits in 128 bits.
    #[error("ratio arithmetic overflowed: {0}")]
    Overflow(String),

    /// A float that has no exact rational value (NaN or infinite).
    #[error("{0} has no rational value")]
    NonFinite(f64),

    /// Text that could not be parsed as a ratio.
    #[error("could not parse {input:?} as a ratio: {reason}")]
    Parse {
        /// The text as given.
        input: String,
        /// What did not parse.
        reason: String,
    },

    /// No comma with this name in the comma table.
    #[error("unknown comma {0:?}")]
    UnknownComma(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TonalError>;

impl TonalError {
    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        TonalError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    pub(crate) fn overflow(what: impl std::fmt::Display) -> Self {
        TonalError::Overflow(what.to_string())
    }
}
