// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Kani model checking proofs for one prefix-doubling round.
//!
//! This standalone crate extracts pair generation, the stable sort and rank
//! renumbering, with the display suffixes stripped, and proves them over
//! every rank array up to `MAX_N` entries.
//!
//! Run with: `cargo kani`
//!
//! ## Verified Properties
//!
//! 1. **Sentinel placement**: the second half is `-1` exactly when `i + k >= n`
//! 2. **Dense ranks**: renumbered ranks cover `0..=max` with `max <= n - 1`
//! 3. **Order**: smaller pairs get smaller ranks, equal pairs equal ranks
//! 4. **Stability**: equal pairs keep ascending index order after sorting

pub type Rank = i32;

/// Look-ahead rank for positions past the end of the string
pub const SENTINEL: Rank = -1;

/// Largest input the proofs enumerate
pub const MAX_N: usize = 4;

// ============================================================================
// ONE ROUND (mirrors src/doubling.rs)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub pair: (Rank, Rank),
    pub index: usize,
}

pub fn generate_pairs(ranks: &[Rank], k: usize) -> Vec<Record> {
    let n = ranks.len();
    (0..n)
        .map(|i| Record {
            pair: (ranks[i], if i + k < n { ranks[i + k] } else { SENTINEL }),
            index: i,
        })
        .collect()
}

/// Insertion sort: stable, and cheap for the model checker to unroll.
pub fn sort_pairs(pairs: &[Record]) -> Vec<Record> {
    let mut sorted = pairs.to_vec();
    for i in 1..sorted.len() {
        let mut j = i;
        while j > 0 && sorted[j - 1].pair > sorted[j].pair {
            sorted.swap(j - 1, j);
            j -= 1;
        }
    }
    sorted
}

pub fn assign_ranks(sorted: &[Record]) -> (Vec<Rank>, Rank) {
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

// ============================================================================
// KANI MODEL CHECKING PROOFS
// ============================================================================

#[cfg(kani)]
mod kani_proofs {
    use super::*;

    /// Symbolic rank array of length 1..=MAX_N with small non-negative ranks.
    fn any_ranks() -> Vec<Rank> {
        let n: usize = kani::any_where(|&n| n >= 1 && n <= MAX_N);
        let mut ranks = Vec::with_capacity(n);
        for _ in 0..n {
            ranks.push(kani::any_where(|&r: &Rank| r >= 0 && r < MAX_N as Rank));
        }
        ranks
    }

    fn any_window(n: usize) -> usize {
        kani::any_where(|&k: &usize| k >= 1 && k < n.max(2))
    }

    #[kani::proof]
    #[kani::unwind(6)]
    fn verify_sentinel_placement() {
        let ranks = any_ranks();
        let k = any_window(ranks.len());
        let pairs = generate_pairs(&ranks, k);

        for (i, record) in pairs.iter().enumerate() {
            kani::assert(record.index == i, "pairs are generated in index order");
            kani::assert(record.pair.0 == ranks[i], "first half is the current rank");
            kani::assert(
                (record.pair.1 == SENTINEL) == (i + k >= ranks.len()),
                "sentinel exactly when the look-ahead falls off the end",
            );
        }
    }

    #[kani::proof]
    #[kani::unwind(6)]
    fn verify_ranks_dense() {
        let ranks = any_ranks();
        let k = any_window(ranks.len());
        let sorted = sort_pairs(&generate_pairs(&ranks, k));
        let (next, max) = assign_ranks(&sorted);

        kani::assert(next.len() == ranks.len(), "one rank per suffix");
        kani::assert(max >= 0 && (max as usize) < ranks.len(), "max rank below n");
        for &r in &next {
            kani::assert(r >= 0 && r <= max, "every rank within 0..=max");
        }
        for r in 0..=max {
            kani::assert(next.contains(&r), "no gaps in rank space");
        }
    }

    #[kani::proof]
    #[kani::unwind(6)]
    fn verify_ranks_follow_pair_order() {
        let ranks = any_ranks();
        let k = any_window(ranks.len());
        let pairs = generate_pairs(&ranks, k);
        let (next, _) = assign_ranks(&sort_pairs(&pairs));

        let i: usize = kani::any_where(|&i| i < pairs.len());
        let j: usize = kani::any_where(|&j| j < pairs.len());
        kani::assert(
            (pairs[i].pair < pairs[j].pair) == (next[i] < next[j]),
            "rank order matches pair order",
        );
        kani::assert(
            (pairs[i].pair == pairs[j].pair) == (next[i] == next[j]),
            "equal pairs share a rank",
        );
    }

    #[kani::proof]
    #[kani::unwind(6)]
    fn verify_sort_stable() {
        let ranks = any_ranks();
        let k = any_window(ranks.len());
        let sorted = sort_pairs(&generate_pairs(&ranks, k));

        for w in sorted.windows(2) {
            kani::assert(w[0].pair <= w[1].pair, "sorted by pair");
            if w[0].pair == w[1].pair {
                kani::assert(w[0].index < w[1].index, "ties keep index order");
            }
        }
    }
}
