// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Prefix doubling with a snapshot at every phase.
//!
//! # Algorithm Overview
//!
//! ```text
//! Input: "banana"  (n = 6)
//!
//! Round 0: rank each suffix by its first character
//!          b=98 a=97 n=110 a=97 n=110 a=97
//!
//! Round k: pair each suffix with the rank k positions ahead
//!          (rank[i], rank[i+k] or -1), stable-sort the pairs,
//!          then renumber: equal pairs share a rank, the next
//!          distinct pair gets rank + 1
//!
//!          After round k, ranks order suffixes by their first 2k chars.
//!
//! Stop:    every suffix has its own rank (max rank = n-1),
//!          or the window reached n
//! ```
//!
//! Each round emits `PairsGenerated`, `PairsSorted` and, unless it was the
//! final round, `RanksUpdated`.
//!
//! # Complexity
//!
//! - Time: O(n log² n) comparisons (log n rounds of an O(n log n) sort)
//! - Space: O(n²) for the trace, since every round keeps its pairs and each
//!   pair carries its suffix text. Suffix strings are shared across rounds.
//!
//! # Stability
//!
//! The pair sort MUST be stable. Ties keep the relative order they had in
//! index order, which the renumbering relies on. `slice::sort_by_key` is a
//! stable sort; `sort_unstable_by_key` would be a correctness bug here.

use std::sync::Arc;

use tracing::{debug, trace as trace_event};

use crate::error::TraceError;
use crate::trace::{Trace, TraceBuilder};
use crate::types::{
    PairRecord, Rank, RankPair, SeedRanking, Step, Termination, TraceOptions, SENTINEL,
};
use crate::verify::contracts::{
    check_k_doubled, check_pairs_in_index_order, check_ranks_dense, check_ranks_follow_sorted,
    check_sorted_pairs_stable,
};

/// Trace suffix array construction with raw code point seeding.
///
/// # Example
///
/// ```
/// let trace = sastep::trace("banana").unwrap();
/// assert_eq!(trace.suffix_array(), vec![5, 3, 1, 0, 4, 2]);
/// ```
pub fn trace(input: &str) -> Result<Trace, TraceError> {
    trace_with(input, &TraceOptions::default())
}

/// Trace suffix array construction.
///
/// Returns every snapshot from initialization until the suffixes are fully
/// ordered. Fails on empty input rather than producing a degenerate trace.
pub fn trace_with(input: &str, options: &TraceOptions) -> Result<Trace, TraceError> {
    if input.is_empty() {
        return Err(TraceError::EmptyInput);
    }

    let chars: Vec<char> = input.chars().collect();
    let n = chars.len();
    let suffixes = suffix_strings(input);

    let mut builder = TraceBuilder::new(input);
    let mut ranks: Arc<[Rank]> = seed_ranks(&chars, options.seed).into();
    builder.push(Step::Initialization {
        ranks: Arc::clone(&ranks),
    });
    debug!(n, seed = ?options.seed, "seeded initial ranks");

    let mut termination = Termination::SingleCharacter;
    let mut previous_k = None;
    let mut k = 1;

    while k < n {
        // INVARIANT: K_DOUBLES
        check_k_doubled(previous_k, k, n);

        // a. pair generation
        let pairs: Arc<[PairRecord]> = generate_pairs(&ranks, k, &suffixes).into();
        // INVARIANT: PAIRS_INDEX_ORDER
        check_pairs_in_index_order(&pairs, n);
        builder.push(Step::PairsGenerated {
            k,
            ranks: Arc::clone(&ranks),
            pairs: Arc::clone(&pairs),
        });

        // b. stable sort
        let sorted: Arc<[PairRecord]> = sort_pairs(&pairs).into();
        // INVARIANT: SORT_STABLE
        check_sorted_pairs_stable(&sorted);
        builder.push(Step::PairsSorted {
            k,
            ranks: Arc::clone(&ranks),
            pairs: Arc::clone(&pairs),
            sorted_pairs: Arc::clone(&sorted),
        });

        // c. renumber
        let (next, max_rank) = assign_ranks(&sorted);
        // INVARIANT: RANKS_DENSE
        check_ranks_dense(&next);
        // INVARIANT: RANKS_FOLLOW_SORT
        check_ranks_follow_sorted(&sorted, &next);
        debug!(k, max_rank, distinct = max_rank + 1, n, "doubling round");

        // d. all suffixes distinguished: stop without a ranks-updated step
        if max_rank as usize == n - 1 {
            return Ok(builder.finish(next, Termination::AllRanksDistinct { k }));
        }

        // e. adopt the new ranks
        ranks = next.into();
        builder.push(Step::RanksUpdated {
            k,
            ranks: Arc::clone(&ranks),
            pairs,
            sorted_pairs: sorted,
        });
        termination = Termination::WindowExhausted { k };
        previous_k = Some(k);
        k *= 2;
    }

    trace_event!(k, n, "window exhausted");
    Ok(builder.finish(ranks.to_vec(), termination))
}

/// Round-0 ranks: one per character.
fn seed_ranks(chars: &[char], seed: SeedRanking) -> Vec<Rank> {
    match seed {
        SeedRanking::Ordinal => chars.iter().map(|&c| u32::from(c) as Rank).collect(),
        SeedRanking::Dense => {
            let mut alphabet = chars.to_vec();
            alphabet.sort_unstable();
            alphabet.dedup();
            chars
                .iter()
                .map(|&c| alphabet.partition_point(|&a| a < c) as Rank)
                .collect()
        }
    }
}

/// Display text of every suffix, computed once per trace.
///
/// Slices on character boundaries, so suffix `i` starts at the i-th character.
fn suffix_strings(input: &str) -> Vec<Arc<str>> {
    input
        .char_indices()
        .map(|(offset, _)| Arc::from(&input[offset..]))
        .collect()
}

/// Pairs `(rank[i], rank[i + k])` for every `i`, in index order.
fn generate_pairs(ranks: &[Rank], k: usize, suffixes: &[Arc<str>]) -> Vec<PairRecord> {
    let n = ranks.len();
    (0..n)
        .map(|i| {
            let ahead = if i + k < n { ranks[i + k] } else { SENTINEL };
            PairRecord {
                pair: RankPair(ranks[i], ahead),
                index: i,
                suffix: Arc::clone(&suffixes[i]),
            }
        })
        .collect()
}

/// Stable sort keyed only on the pair value.
fn sort_pairs(pairs: &[PairRecord]) -> Vec<PairRecord> {
    let mut sorted = pairs.to_vec();
    sorted.sort_by_key(|record| record.pair);
    sorted
}

/// Renumber sorted pairs into a fresh rank array. Returns the array and the max rank.
fn assign_ranks(sorted: &[PairRecord]) -> (Vec<Rank>, Rank) {
    let mut next = vec![0; sorted.len()];
    let mut current: Rank = 0;
    for (pos, record) in sorted.iter().enumerate() {
        if pos > 0 && record.pair != sorted[pos - 1].pair {
            current += 1;
        }
        next[record.index] = current;
    }
    (next, current)
}
