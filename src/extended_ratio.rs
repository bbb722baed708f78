//! Chords as extended ratios: `4:5:6` for the harmonic major triad, or the
//! undertone series read as `6:5:4` for its subharmonic mirror.

use std::fmt;
use std::str::FromStr;

use num_integer::Integer;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TonalError};
use crate::interval::Interval;
use crate::ratio::Ratio;

/// Which series the numbers of an [`ExtendedRatio`] count in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// Partials of a common fundamental; `4:5:6` is `1/1 5/4 3/2`.
    #[default]
    Harmonic,
    /// Undertones of a common guide tone; `6:5:4` is `1/6 1/5 1/4`.
    Subharmonic,
}

/// A chord whose pitches are whole members of one harmonic or subharmonic
/// series.
///
/// Members are kept low to high: harmonic partials ascend, subharmonic
/// undertones descend.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExtendedRatio {
    domain: Domain,
    members: Vec<u128>,
}

impl ExtendedRatio {
    /// A chord of harmonic partials, in any order.
    pub fn harmonic(partials: &[u128]) -> Result<Self> {
        Self::from_members(Domain::Harmonic, partials)
    }

    /// A chord of subharmonic undertones, in any order.
    pub fn subharmonic(undertones: &[u128]) -> Result<Self> {
        Self::from_members(Domain::Subharmonic, undertones)
    }

    /// The smallest chord in `domain` whose pitches, relative to each other,
    /// are `ratios`.
    pub fn from_ratios(ratios: &[Ratio], domain: Domain) -> Result<Self> {
        if let Some(bad) = ratios.iter().find(|r| !r.is_positive_finite()) {
            return Err(TonalError::InvalidTarget {
                ratio: bad.to_string(),
                reason: "only positive, finite ratios belong to a series",
            });
        }
        let reduced: Vec<Ratio> = ratios.iter().map(Ratio::reduced).collect();

        // a partial n is n/1 against the fundamental, an undertone u is 1/u
        let members = match domain {
            Domain::Harmonic => {
                let common = reduced.iter().fold(1u128, |l, r| l.lcm(&r.consequent()));
                scale_terms(&reduced, common, |r| (r.antecedent(), r.consequent()))?
            }
            Domain::Subharmonic => {
                let common = reduced.iter().fold(1u128, |l, r| l.lcm(&r.antecedent()));
                scale_terms(&reduced, common, |r| (r.consequent(), r.antecedent()))?
            }
        };
        Self::from_members(domain, &members)
    }

    fn from_members(domain: Domain, members: &[u128]) -> Result<Self> {
        if members.is_empty() {
            return Err(TonalError::invalid_parameter(
                "members",
                "an extended ratio needs at least one member",
            ));
        }
        if members.contains(&0) {
            return Err(TonalError::invalid_parameter(
                "members",
                "series members start at 1",
            ));
        }
        let mut members = members.to_vec();
        match domain {
            Domain::Harmonic => members.sort_unstable(),
            Domain::Subharmonic => members.sort_unstable_by(|a, b| b.cmp(a)),
        }
        Ok(Self { domain, members })
    }

    /// The series the members count in.
    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Partials or undertones, lowest pitch first.
    pub fn members(&self) -> &[u128] {
        &self.members
    }

    /// Every pitch relative to the lowest, optionally octave reduced.
    pub fn ratios(&self, reduced: bool) -> Result<Vec<Ratio>> {
        let first = self.members[0];
        self.members
            .iter()
            .map(|&member| {
                let ratio = match self.domain {
                    Domain::Harmonic => Ratio::new(member, first),
                    Domain::Subharmonic => Ratio::new(first, member),
                };
                if reduced {
                    ratio.equave_reduce(Ratio::OCTAVE)
                } else {
                    Ok(ratio)
                }
            })
            .collect()
    }

    /// The interval from pitch `from` up to pitch `to`, counted from the
    /// lowest. `None` when either index is out of range.
    pub fn interval_between(&self, from: usize, to: usize, reduced: bool) -> Result<Option<Interval>> {
        if from >= self.members.len() || to >= self.members.len() {
            return Ok(None);
        }
        let ratios = self.ratios(reduced)?;
        Interval::new(ratios[to], ratios[from]).map(Some)
    }

    /// The same chord written in `domain`.
    pub fn switch_domain(&self, domain: Domain) -> Result<Self> {
        if domain == self.domain {
            return Ok(self.clone());
        }
        Self::from_ratios(&self.ratios(false)?, domain)
    }
}

/// `common * lower / upper` for each `(upper, lower)` pair, checked.
fn scale_terms(ratios: &[Ratio], common: u128, terms: impl Fn(&Ratio) -> (u128, u128)) -> Result<Vec<u128>> {
    ratios
        .iter()
        .map(|ratio| {
            let (upper, lower) = terms(ratio);
            (common / lower)
                .checked_mul(upper)
                .ok_or_else(|| TonalError::overflow(format!("{} * {}", common / lower, upper)))
        })
        .collect()
}

impl fmt::Display for ExtendedRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut members = self.members.iter();
        if let Some(first) = members.next() {
            write!(f, "{}", first)?;
        }
        for member in members {
            write!(f, ":{}", member)?;
        }
        Ok(())
    }
}

impl FromStr for ExtendedRatio {
    type Err = TonalError;

    /// Parses harmonic chords written `4:5:6`.
    fn from_str(s: &str) -> Result<Self> {
        let members = s
            .split(':')
            .map(|member| {
                member.trim().parse::<u128>().map_err(|_| TonalError::Parse {
                    input: s.to_string(),
                    reason: "chord members must be positive integers".to_string(),
                })
            })
            .collect::<Result<Vec<u128>>>()?;
        Self::harmonic(&members)
    }
}
