//! Basin label scheme.
//!
//! Basins are numbered in discovery order and named with bijective base-26
//! lowercase labels: a … z, aa, ab, … az, ba, … zz, aaa, …
use serde::{Deserialize, Serialize};

use crate::error::{Result, WatershedError};
use crate::grid::BasinId;

/// Number of single-letter labels.
pub const ALPHABET_LEN: usize = 26;

/// What to do once the single-letter alphabet runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelPolicy {
    /// Continue with multi-letter labels (aa, ab, …).
    #[default]
    Extended,
    /// Single letters only; the 27th basin is an error.
    Alphabet,
}

impl LabelPolicy {
    /// Maximum number of basins this policy can name, if bounded.
    pub fn limit(self) -> Option<usize> {
        match self {
            LabelPolicy::Extended => None,
            LabelPolicy::Alphabet => Some(ALPHABET_LEN),
        }
    }
}

/// Label for the basin at `index` (0 → "a").
pub fn basin_label(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        n -= 1;
        letters.push(b'a' + (n % ALPHABET_LEN) as u8);
        n /= ALPHABET_LEN;
    }
    letters.reverse();
    letters.into_iter().map(char::from).collect()
}

impl BasinId {
    pub fn label(self) -> String {
        basin_label(self.0)
    }
}

/// Hands out basin ids for one resolver run.
#[derive(Debug)]
pub struct LabelAllocator {
    next: usize,
    policy: LabelPolicy,
}

impl LabelAllocator {
    pub fn new(policy: LabelPolicy) -> Self {
        Self::resume(policy, 0)
    }

    /// Continue numbering after `next - 1`, e.g. on a partially resolved
    /// grid. The policy limit still counts every id, not just new ones.
    pub fn resume(policy: LabelPolicy, next: usize) -> Self {
        Self { next, policy }
    }

    /// Claim the next basin id.
    pub fn next_basin(&mut self) -> Result<BasinId> {
        if let Some(limit) = self.policy.limit() {
            if self.next >= limit {
                return Err(WatershedError::TooManyBasins { limit });
            }
        }
        let id = BasinId(self.next);
        self.next += 1;
        Ok(id)
    }

    /// Next id to be handed out; equals the total issued including any
    /// ids the allocator resumed after.
    pub fn issued(&self) -> usize {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_letters_cover_the_alphabet() {
        assert_eq!(basin_label(0), "a");
        assert_eq!(basin_label(1), "b");
        assert_eq!(basin_label(25), "z");
    }

    #[test]
    fn labels_roll_over_to_multiple_letters() {
        assert_eq!(basin_label(26), "aa");
        assert_eq!(basin_label(27), "ab");
        assert_eq!(basin_label(51), "az");
        assert_eq!(basin_label(52), "ba");
        assert_eq!(basin_label(701), "zz");
        assert_eq!(basin_label(702), "aaa");
    }

    #[test]
    fn labels_are_unique() {
        let labels: std::collections::HashSet<String> = (0..2000).map(basin_label).collect();
        assert_eq!(labels.len(), 2000);
    }

    #[test]
    fn alphabet_policy_stops_after_26() {
        let mut alloc = LabelAllocator::new(LabelPolicy::Alphabet);
        for i in 0..ALPHABET_LEN {
            assert_eq!(alloc.next_basin().unwrap(), BasinId(i));
        }
        assert!(matches!(
            alloc.next_basin(),
            Err(WatershedError::TooManyBasins { limit: 26 })
        ));
        assert_eq!(alloc.issued(), 26);
    }

    #[test]
    fn extended_policy_is_unbounded() {
        let mut alloc = LabelAllocator::new(LabelPolicy::Extended);
        for _ in 0..100 {
            alloc.next_basin().unwrap();
        }
        assert_eq!(alloc.next_basin().unwrap().label(), "cw");
    }

    #[test]
    fn resumed_allocator_counts_earlier_ids_against_the_limit() {
        let mut alloc = LabelAllocator::resume(LabelPolicy::Extended, 26);
        assert_eq!(alloc.next_basin().unwrap(), BasinId(26));

        let mut strict = LabelAllocator::resume(LabelPolicy::Alphabet, 25);
        assert_eq!(strict.next_basin().unwrap(), BasinId(25));
        assert!(strict.next_basin().is_err());
    }
}
