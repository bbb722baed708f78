//! Ratios as points `(antecedent, consequent)` of the integer lattice.

use std::collections::BTreeSet;

use crate::error::{Result, TonalError};
use crate::ratio::Ratio;

/// Offsets in reading order: the point itself, the four axis moves, then the
/// four diagonals.
const OFFSETS: [(i8, i8); 9] = [
    (0, 0),
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// The point and its eight king-move neighbors `away` steps off.
///
/// A coordinate pushed below zero is mirrored back (`|x|`), the same way
/// [`Ratio::from_signed`] discards signs.
pub fn neighbors(vicinity: &Ratio, away: u64) -> Result<[Ratio; 9]> {
    let (x, y) = vicinity.to_tuple();
    let away = u128::from(away);

    let mut points = [*vicinity; 9];
    for (point, (dx, dy)) in points.iter_mut().zip(OFFSETS) {
        *point = Ratio::new(step(x, dx, away)?, step(y, dy, away)?);
    }
    Ok(points)
}

/// `|coordinate + direction * away|`.
fn step(coordinate: u128, direction: i8, away: u128) -> Result<u128> {
    match direction {
        1 => coordinate
            .checked_add(away)
            .ok_or_else(|| TonalError::overflow(format!("{} + {}", coordinate, away))),
        -1 => Ok(coordinate.abs_diff(away)),
        _ => Ok(coordinate),
    }
}

/// Distinct neighbors of `ratio` scaled by `scale`, at every distance from 1
/// to `boundary`, ascending by value.
pub fn neighborhood(ratio: &Ratio, scale: u64, boundary: u64) -> Result<Vec<Ratio>> {
    let scale = u128::from(scale);
    let vicinity = ratio.scale(scale, scale)?;
    let mut points = BTreeSet::new();
    for away in 1..=boundary {
        points.extend(neighbors(&vicinity, away)?);
    }
    Ok(points.into_iter().collect())
}
