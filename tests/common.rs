#![allow(dead_code)]

use tonal::{Approximation, ApproximationSet, Ratio};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Step 1 of 12-EDO, `2^(1/12)`.
pub fn semitone() -> Ratio {
    Ratio::ed(12, 1).unwrap()
}

pub fn engine(ratio: Ratio) -> Approximation {
    Approximation::new(ratio).unwrap()
}

/// Stored terms of the entries, in reading order.
pub fn tuples(set: &ApproximationSet) -> Vec<(u128, u128)> {
    set.iter().map(|r| r.to_tuple()).collect()
}

/// Absolute cents between `ratio` and `target`.
pub fn distance(ratio: &Ratio, target: &Ratio) -> f64 {
    (ratio.to_cents().value() - target.to_cents().value()).abs()
}
