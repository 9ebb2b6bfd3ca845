//! Structural properties of individual snapshots.

use proptest::prelude::*;
use sastep::{trace, Phase, Rank, SENTINEL};

use super::common::{char_suffix, ended_by_shortcut, full_rounds};
use super::{repetitive_strategy, unicode_strategy};

proptest! {
    /// Property: windows go 1, 2, 4, ... and stay below n.
    #[test]
    fn prop_k_doubles(input in repetitive_strategy()) {
        let n = input.chars().count();
        let ks = trace(&input).unwrap().k_values();
        for (round, &k) in ks.iter().enumerate() {
            prop_assert_eq!(k, 1usize << round);
            prop_assert!(k < n);
        }
    }

    /// Property: 1 + 3 per full round + 2 for a terminal round.
    #[test]
    fn prop_snapshot_count(input in repetitive_strategy()) {
        let t = trace(&input).unwrap();
        let terminal = if ended_by_shortcut(&t) { 2 } else { 0 };
        prop_assert_eq!(t.len(), 1 + 3 * full_rounds(&t) + terminal);
    }

    /// Property: the phase sequence is init, then whole rounds.
    #[test]
    fn prop_phase_sequence(input in repetitive_strategy()) {
        let t = trace(&input).unwrap();
        let steps = t.steps();
        prop_assert_eq!(steps[0].phase(), Phase::Initialization);
        for (offset, step) in steps[1..].iter().enumerate() {
            let expected = match offset % 3 {
                0 => Phase::PairsGenerated,
                1 => Phase::PairsSorted,
                _ => Phase::RanksUpdated,
            };
            prop_assert_eq!(step.phase(), expected);
        }
    }

    /// Property: tracing twice serializes identically.
    #[test]
    fn prop_idempotent(input in unicode_strategy()) {
        let first = serde_json::to_string(&trace(&input).unwrap()).unwrap();
        let second = serde_json::to_string(&trace(&input).unwrap()).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Property: every pair record points at its own suffix and ranks.
    #[test]
    fn prop_pair_records_consistent(input in unicode_strategy()) {
        let t = trace(&input).unwrap();
        for step in t.steps() {
            let Some(pairs) = step.pairs() else { continue };
            let ranks = step.ranks();
            let k = step.k();
            // ranks-updated carries the new ranks; its pairs came from the old ones
            if step.phase() == Phase::RanksUpdated {
                continue;
            }
            for (i, record) in pairs.iter().enumerate() {
                prop_assert_eq!(record.index, i);
                prop_assert_eq!(&*record.suffix, char_suffix(&input, i));
                let second: Rank = ranks.get(i + k).copied().unwrap_or(SENTINEL);
                prop_assert_eq!(record.pair.first(), ranks[i]);
                prop_assert_eq!(record.pair.second(), second);
            }
        }
    }

    /// Property: sorting is stable and a permutation of the generated pairs.
    #[test]
    fn prop_sort_stable_permutation(input in repetitive_strategy()) {
        let t = trace(&input).unwrap();
        for step in t.steps() {
            let (Some(pairs), Some(sorted)) = (step.pairs(), step.sorted_pairs()) else {
                continue;
            };
            prop_assert_eq!(pairs.len(), sorted.len());

            let mut seen = vec![false; pairs.len()];
            for record in sorted {
                prop_assert!(!seen[record.index]);
                seen[record.index] = true;
                prop_assert_eq!(&pairs[record.index], record);
            }

            for w in sorted.windows(2) {
                prop_assert!(w[0].pair <= w[1].pair);
                if w[0].pair == w[1].pair {
                    prop_assert!(w[0].index < w[1].index);
                }
            }
        }
    }
}
