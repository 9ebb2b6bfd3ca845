// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts for the doubling loop.
//!
//! Debug-mode assertions called by the tracer between phases. They are:
//!
//! 1. **Zero-cost in release builds** (`debug_assert!`)
//! 2. **Fatal in debug and test builds**: a violation is a defect in the
//!    tracer, never a user error
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract Function           | Invariant                                         |
//! |-----------------------------|---------------------------------------------------|
//! | `check_k_doubled`           | `k` runs `1, 2, 4, ...` and stays below `n`       |
//! | `check_pairs_in_index_order`| pairs generated for indices `0..n` in order       |
//! | `check_sorted_pairs_stable` | sorted by key, ties keep ascending index order    |
//! | `check_ranks_dense`         | ranks in `[0, n-1]` with no gaps                  |
//! | `check_ranks_follow_sorted` | ranks non-decreasing along sorted pair position   |

use crate::types::{PairRecord, Rank};

// ============================================================================
// ROUND CONTRACTS
// ============================================================================

/// Check that the window doubled since the previous round and is still below `n`.
///
/// # Panics (debug builds only)
/// Panics if `k` is not the first window (1) or twice the previous one.
#[inline]
pub fn check_k_doubled(previous_k: Option<usize>, k: usize, n: usize) {
    match previous_k {
        None => debug_assert_eq!(
            k, 1,
            "Contract violation: first doubling round must use k=1, got k={}",
            k
        ),
        Some(prev) => debug_assert_eq!(
            k,
            prev * 2,
            "Contract violation: k={} did not double previous k={}",
            k,
            prev
        ),
    }
    debug_assert!(
        k < n,
        "Contract violation: round computed for k={} >= n={}",
        k,
        n
    );
}

// ============================================================================
// PAIR CONTRACTS
// ============================================================================

/// Check that pairs were generated for every index, in index order.
///
/// # Panics (debug builds only)
/// Panics if `pairs[i].index != i` for some `i`.
#[inline]
pub fn check_pairs_in_index_order(pairs: &[PairRecord], n: usize) {
    debug_assert_eq!(
        pairs.len(),
        n,
        "Contract violation: {} pairs generated for n={}",
        pairs.len(),
        n
    );
    for (i, record) in pairs.iter().enumerate() {
        debug_assert_eq!(
            record.index, i,
            "Contract violation: pairs[{}].index = {} (generation must follow index order)",
            i, record.index
        );
    }
}

/// Check that pairs are sorted by key and the sort was stable.
///
/// Stability is what lets ties keep the order established by the previous
/// round. Pairs are generated in index order, so inside a group of equal keys
/// the indices must still be ascending.
///
/// # Panics (debug builds only)
/// Panics if any adjacent pair is out of order or a tie group is reordered.
#[inline]
pub fn check_sorted_pairs_stable(sorted: &[PairRecord]) {
    for w in sorted.windows(2) {
        let (prev, curr) = (&w[0], &w[1]);
        debug_assert!(
            prev.pair <= curr.pair,
            "Contract violation: sorted pairs out of order: {} (index {}) before {} (index {})",
            prev.pair,
            prev.index,
            curr.pair,
            curr.index
        );
        if prev.pair == curr.pair {
            debug_assert!(
                prev.index < curr.index,
                "Contract violation: unstable sort: tie {} has index {} before {}",
                curr.pair,
                prev.index,
                curr.index
            );
        }
    }
}

// ============================================================================
// RANK CONTRACTS
// ============================================================================

/// Check that ranks lie in `[0, n-1]` and cover `0..=max` with no gaps.
///
/// # Panics (debug builds only)
/// Panics on an out-of-range rank or a gap in the rank set.
#[inline]
pub fn check_ranks_dense(ranks: &[Rank]) {
    let n = ranks.len();
    let mut seen = vec![false; n];
    for (i, &rank) in ranks.iter().enumerate() {
        debug_assert!(
            rank >= 0 && (rank as usize) < n,
            "Contract violation: rank[{}] = {} outside [0, {}]",
            i,
            rank,
            n.saturating_sub(1)
        );
        if rank >= 0 && (rank as usize) < n {
            seen[rank as usize] = true;
        }
    }
    let max = ranks.iter().copied().max().unwrap_or(0).max(0) as usize;
    for (rank, present) in seen.iter().enumerate().take(max + 1) {
        debug_assert!(
            *present,
            "Contract violation: rank {} missing below max rank {}",
            rank,
            max
        );
    }
}

/// Check that ranks are non-decreasing along sorted pair position, and step
/// exactly when the pair changes.
///
/// # Panics (debug builds only)
/// Panics if a rank decreases, skips a value, or changes within a tie.
#[inline]
pub fn check_ranks_follow_sorted(sorted: &[PairRecord], ranks: &[Rank]) {
    for w in sorted.windows(2) {
        let (prev, curr) = (&w[0], &w[1]);
        let expected = if prev.pair == curr.pair {
            ranks[prev.index]
        } else {
            ranks[prev.index] + 1
        };
        debug_assert_eq!(
            ranks[curr.index], expected,
            "Contract violation: rank[{}] = {} after rank[{}] = {} (pairs {} then {})",
            curr.index, ranks[curr.index], prev.index, ranks[prev.index], prev.pair, curr.pair
        );
    }
}
