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

//! The collection every approximation search returns.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::ratio::Ratio;

/// Distinct approximations of one target ratio.
///
/// Members are unique by reduced value: inserting `1044/694` after `522/347`
/// is a no-op, and the first representative inserted is kept. Entries read
/// in ascending value order unless the set came out of
/// [`ApproximationSet::sort_by`], in which case they read in key order.
///
/// A re-keyed set does not keep its key: later inserts are appended after the
/// sorted entries, and calling `sort_by` again restores a full key order.
#[derive(Clone, Debug, Serialize)]
pub struct ApproximationSet {
    ratio: Ratio,
    #[serde(skip)]
    members: BTreeSet<Ratio>,
    #[serde(rename = "approximations")]
    order: Vec<Ratio>,
    #[serde(skip)]
    keyed: bool,
}

impl ApproximationSet {
    /// An empty set of approximations of `ratio`.
    pub fn new(ratio: Ratio) -> Self {
        Self {
            ratio,
            members: BTreeSet::new(),
            order: Vec::new(),
            keyed: false,
        }
    }

    /// Add `approximation`, returning `false` if an equal ratio was already present.
    ///
    /// In a set from [`ApproximationSet::sort_by`] the new entry goes last in
    /// reading order, whatever its key.
    pub fn insert(&mut self, approximation: Ratio) -> bool {
        if !self.members.insert(approximation) {
            return false;
        }
        if self.keyed {
            self.order.push(approximation);
        } else {
            let at = self.order.partition_point(|r| *r < approximation);
            self.order.insert(at, approximation);
        }
        true
    }

    /// The ratio being approximated.
    pub fn ratio(&self) -> Ratio {
        self.ratio
    }

    /// Number of distinct approximations.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no approximation was accepted.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether a ratio of equal value is a member.
    pub fn contains(&self, ratio: &Ratio) -> bool {
        self.members.contains(ratio)
    }

    /// Entries in reading order.
    pub fn entries(&self) -> &[Ratio] {
        &self.order
    }

    /// Entries in reading order, copied.
    pub fn to_vec(&self) -> Vec<Ratio> {
        self.order.clone()
    }

    /// Entries in reading order.
    pub fn iter(&self) -> std::slice::Iter<'_, Ratio> {
        self.order.iter()
    }

    /// Smallest member by value, whatever the reading order.
    pub fn min(&self) -> Option<Ratio> {
        self.members.iter().next().copied()
    }

    /// Largest member by value, whatever the reading order.
    pub fn max(&self) -> Option<Ratio> {
        self.members.iter().next_back().copied()
    }

    /// A new set with the same members, read in ascending order of `key`.
    ///
    /// Ties keep ascending value order. Keys that do not compare (NaN) are
    /// treated as ties. `self` is left as it was.
    pub fn sort_by<K, F>(&self, mut key: F) -> ApproximationSet
    where
        K: PartialOrd,
        F: FnMut(&Ratio) -> K,
    {
        let mut keyed: Vec<(K, Ratio)> = self.members.iter().map(|r| (key(r), *r)).collect();
        keyed.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

        ApproximationSet {
            ratio: self.ratio,
            members: self.members.clone(),
            order: keyed.into_iter().map(|(_, r)| r).collect(),
            keyed: true,
        }
    }

    /// Largest prime of each entry, in reading order.
    pub fn max_primes(&self) -> Vec<Option<u128>> {
        self.order.iter().map(Ratio::max_prime).collect()
    }

    /// Smallest prime of each entry, in reading order.
    pub fn min_primes(&self) -> Vec<Option<u128>> {
        self.order.iter().map(Ratio::min_prime).collect()
    }
}

impl<'a> IntoIterator for &'a ApproximationSet {
    type Item = &'a Ratio;
    type IntoIter = std::slice::Iter<'a, Ratio>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}

impl fmt::Display for ApproximationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: [", self.ratio)?;
        for (i, ratio) in self.order.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", ratio)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_of(ratios: &[(u128, u128)]) -> ApproximationSet {
        let mut set = ApproximationSet::new(Ratio::new(3, 2));
        for &(a, b) in ratios {
            set.insert(Ratio::new(a, b));
        }
        set
    }

    #[test]
    fn test_insert_keeps_value_order() {
        let set = set_of(&[(7, 5), (3, 2), (10, 7), (8, 5)]);
        let tuples: Vec<(u128, u128)> = set.iter().map(|r| r.to_tuple()).collect();
        assert_eq!(tuples, vec![(7, 5), (10, 7), (3, 2), (8, 5)]);
        assert_eq!(set.min(), Some(Ratio::new(7, 5)));
        assert_eq!(set.max(), Some(Ratio::new(8, 5)));
    }

    #[test]
    fn test_insert_dedups_by_value() {
        let mut set = set_of(&[(522, 347)]);
        assert!(!set.insert(Ratio::new(1044, 694)));
        assert_eq!(set.len(), 1);
        assert_eq!(set.entries()[0].to_tuple(), (522, 347));
        assert!(set.contains(&Ratio::new(1044, 694)));
    }

    #[test]
    fn test_sort_by_returns_new_set() {
        let set = set_of(&[(5, 4), (81, 64), (6, 5)]);
        let before = set.to_vec();
        let by_height = set.sort_by(|r| r.benedetti_height());
        assert_eq!(set.to_vec(), before);
        let tuples: Vec<(u128, u128)> = by_height.iter().map(|r| r.to_tuple()).collect();
        assert_eq!(tuples, vec![(5, 4), (6, 5), (81, 64)]);
        assert_eq!(by_height.len(), set.len());
        assert_eq!(by_height.min(), set.min());
    }

    #[test]
    fn test_sort_by_ties_and_nan() {
        let set = set_of(&[(9, 8), (10, 9), (16, 15)]);
        let flat = set.sort_by(|_| f64::NAN);
        assert_eq!(flat.to_vec(), set.to_vec());
        let tied = set.sort_by(|_| 0);
        assert_eq!(tied.to_vec(), set.to_vec());
    }

    #[test]
    fn test_keyed_set_appends() {
        let mut keyed = set_of(&[(5, 4), (81, 64)]).sort_by(|r| r.weil_height());
        keyed.insert(Ratio::new(9, 8));
        // 9/8 has the smallest Weil height but still goes last
        let tuples: Vec<(u128, u128)> = keyed.iter().map(|r| r.to_tuple()).collect();
        assert_eq!(tuples, vec![(5, 4), (81, 64), (9, 8)]);

        let resorted = keyed.sort_by(|r| r.weil_height());
        let tuples: Vec<(u128, u128)> = resorted.iter().map(|r| r.to_tuple()).collect();
        assert_eq!(tuples, vec![(5, 4), (9, 8), (81, 64)]);
    }

    #[test]
    fn test_display_and_json() {
        let set = set_of(&[(7, 5), (3, 2)]);
        assert_eq!(set.to_string(), "3/2: [7/5, 3/2]");
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["approximations"][0]["antecedent"], 7);
        assert!(json.get("members").is_none());
    }

    #[test]
    fn test_primes_follow_reading_order() {
        let set = set_of(&[(1, 1), (15, 14)]);
        assert_eq!(set.max_primes(), vec![None, Some(7)]);
        assert_eq!(set.min_primes(), vec![None, Some(2)]);
    }
}
