//! Reference oracles for differential testing.
//!
//! Simple, obviously-correct rank computations that do not double anything:
//! after the round with window `k`, every suffix's rank is the dense rank of
//! its first `2k` characters among all suffixes.

use proptest::prelude::*;
use sastep::{trace, trace_with, Phase, Rank, Step};

use super::common::dense_options;
use super::{repetitive_strategy, unicode_strategy};

// =============================================================================
// ORACLE IMPLEMENTATIONS
// =============================================================================

/// Dense rank of each suffix's first `len` characters. O(n² log n).
pub fn oracle_prefix_ranks(input: &str, len: usize) -> Vec<Rank> {
    let chars: Vec<char> = input.chars().collect();
    let prefix = |i: usize| &chars[i..chars.len().min(i + len)];

    let mut distinct: Vec<&[char]> = (0..chars.len()).map(prefix).collect();
    distinct.sort_unstable();
    distinct.dedup();

    (0..chars.len())
        .map(|i| distinct.binary_search(&prefix(i)).unwrap_or(0) as Rank)
        .collect()
}

/// Rank array each round produced, keyed by its window.
fn round_ranks(t: &sastep::Trace) -> Vec<(usize, Vec<Rank>)> {
    let mut rounds: Vec<(usize, Vec<Rank>)> = t
        .steps()
        .iter()
        .filter(|s| s.phase() == Phase::RanksUpdated)
        .map(|s| (s.k(), s.ranks().to_vec()))
        .collect();

    if let Some(last) = t.steps().last().filter(|s| s.phase() == Phase::PairsSorted) {
        rounds.push((last.k(), t.final_ranks().to_vec()));
    }
    rounds
}

// =============================================================================
// DIFFERENTIAL PROPERTIES
// =============================================================================

proptest! {
    /// Oracle: each round ranks suffixes by their 2k-character prefixes.
    #[test]
    fn prop_rounds_match_prefix_oracle(input in repetitive_strategy()) {
        let t = trace(&input).unwrap();
        for (k, ranks) in round_ranks(&t) {
            prop_assert_eq!(ranks, oracle_prefix_ranks(&input, 2 * k), "k={}", k);
        }
    }

    /// Oracle: same for multi-byte input.
    #[test]
    fn prop_unicode_rounds_match_prefix_oracle(input in unicode_strategy()) {
        let t = trace(&input).unwrap();
        for (k, ranks) in round_ranks(&t) {
            prop_assert_eq!(ranks, oracle_prefix_ranks(&input, 2 * k), "k={}", k);
        }
    }

    /// Oracle: dense seeding ranks single characters.
    #[test]
    fn prop_dense_seed_matches_oracle(input in unicode_strategy()) {
        let t = trace_with(&input, &dense_options()).unwrap();
        prop_assert_eq!(t.steps()[0].ranks(), &oracle_prefix_ranks(&input, 1)[..]);
    }

    /// Oracle: ordinal seeding keeps code points.
    #[test]
    fn prop_ordinal_seed_is_code_points(input in unicode_strategy()) {
        let t = trace(&input).unwrap();
        let expected: Vec<Rank> = input.chars().map(|c| c as Rank).collect();
        prop_assert_eq!(t.steps()[0].ranks(), &expected[..]);
    }
}

// =============================================================================
// ORACLE SANITY
// =============================================================================

#[test]
fn test_oracle_prefix_ranks() {
    assert_eq!(oracle_prefix_ranks("banana", 1), vec![1, 0, 2, 0, 2, 0]);
    assert_eq!(oracle_prefix_ranks("aaa", 2), vec![1, 1, 0]);
    assert_eq!(oracle_prefix_ranks("aaa", 4), vec![2, 1, 0]);
}

#[test]
fn test_round_ranks_covers_terminal_round() {
    let t = trace("ba").unwrap();
    let rounds = round_ranks(&t);
    assert_eq!(rounds, vec![(1, vec![1, 0])]);
    assert!(t.steps().iter().all(|s: &Step| s.phase() != Phase::RanksUpdated));
}
