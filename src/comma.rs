//! A compiled-in table of named commas.

use crate::error::{Result, TonalError};
use crate::ratio::Ratio;

/// A small interval with a conventional name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Comma {
    /// Conventional name, lower snake case.
    pub name: &'static str,
    /// The comma itself, in lowest terms.
    pub ratio: Ratio,
}

const fn comma(name: &'static str, antecedent: u128, consequent: u128) -> Comma {
    Comma {
        name,
        ratio: Ratio::new(antecedent, consequent),
    }
}

/// Named commas, smallest first.
pub const COMMAS: [Comma; 16] = [
    comma("ragisma", 4375, 4374),
    comma("breedsma", 2401, 2400),
    comma("schisma", 32805, 32768),
    comma("hemifamity", 5120, 5103),
    comma("marvel", 225, 224),
    comma("kleisma", 15625, 15552),
    comma("diaschisma", 2048, 2025),
    comma("syntonic", 81, 80),
    comma("pythagorean", 531441, 524288),
    comma("archytas", 64, 63),
    comma("magic", 3125, 3072),
    comma("enharmonic_diesis", 128, 125),
    comma("septimal_quarter_tone", 36, 35),
    comma("porcupine", 250, 243),
    comma("greater_diesis", 648, 625),
    comma("mavila", 135, 128),
];

impl Comma {
    /// Look a comma up by name, e.g. `"syntonic"`.
    pub fn by_name(name: &str) -> Result<Comma> {
        COMMAS
            .iter()
            .find(|comma| comma.name == name)
            .copied()
            .ok_or_else(|| TonalError::UnknownComma(name.to_string()))
    }

    /// The whole table, smallest comma first.
    pub fn all() -> &'static [Comma] {
        &COMMAS
    }
}
