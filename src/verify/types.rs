// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Invariant violations found when re-checking a finished trace.

use crate::types::{Phase, Rank};
use std::fmt;

/// Error type for invariant violations.
///
/// `step` fields are zero-based positions in the trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantError {
    /// The trace was built from a different string.
    InputMismatch { expected: String, actual: String },
    /// The first snapshot is not an initialization.
    MissingInitialization,
    /// A phase appeared out of sequence.
    UnexpectedPhase {
        step: usize,
        expected: &'static [Phase],
        found: Phase,
    },
    /// A round's `k` is not double the previous round's.
    KNotDoubled {
        step: usize,
        previous: usize,
        found: usize,
    },
    /// Phases of one round disagree on `k`.
    KChangedMidRound { step: usize, round_k: usize, found: usize },
    /// A round ended before its sorted (or updated) snapshot.
    TruncatedRound { step: usize },
    /// A round's snapshots carry a different rank array than the round started with.
    RanksChangedMidRound { step: usize },
    /// A round was computed with `k >= n`.
    WindowOutOfRange { step: usize, k: usize, n: usize },
    /// A rank array has the wrong length.
    RankLengthMismatch { step: usize, len: usize, n: usize },
    /// An assigned rank is outside `[0, n-1]`.
    RankOutOfRange { step: usize, index: usize, rank: Rank },
    /// Assigned ranks skip a value below the max rank.
    RankGap { step: usize, missing: usize },
    /// A round does not have exactly one pair per suffix.
    PairCountMismatch { step: usize, len: usize, n: usize },
    /// Pair records are not in index order.
    PairIndexOrder { step: usize, position: usize, index: usize },
    /// A pair's value does not match `(rank[i], rank[i+k])`.
    PairValueMismatch { step: usize, index: usize },
    /// A pair's display suffix differs from `S[index..]`.
    SuffixMismatch { step: usize, index: usize },
    /// Sorted pairs are out of key order.
    UnsortedPairs { step: usize, position: usize },
    /// Ties in sorted pairs lost their index order.
    UnstableSort { step: usize, position: usize },
    /// Sorted pairs are not a permutation of the round's pairs.
    SortedPairsNotPermutation { step: usize },
    /// Ranks after an update do not follow the sorted pairs.
    RanksDisagreeWithSort { step: usize, index: usize },
    /// Snapshot count does not match the round structure.
    SnapshotCountMismatch { expected: usize, actual: usize },
    /// The termination reason does not match the last round.
    TerminationMismatch { reason: String },
    /// Final ranks do not order suffixes lexicographically.
    WrongFinalOrder { position: usize },
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantError::InputMismatch { expected, actual } => {
                write!(f, "trace built from '{}', expected '{}'", actual, expected)
            }
            InvariantError::MissingInitialization => {
                write!(f, "first step is not an initialization")
            }
            InvariantError::UnexpectedPhase {
                step,
                expected,
                found,
            } => {
                let names: Vec<&str> = expected.iter().map(|p| p.as_str()).collect();
                write!(
                    f,
                    "step {}: expected {}, found {}",
                    step,
                    names.join(" or "),
                    found
                )
            }
            InvariantError::KNotDoubled {
                step,
                previous,
                found,
            } => {
                write!(
                    f,
                    "step {}: k={} does not double previous k={}",
                    step, found, previous
                )
            }
            InvariantError::KChangedMidRound {
                step,
                round_k,
                found,
            } => {
                write!(f, "step {}: k={} inside round k={}", step, found, round_k)
            }
            InvariantError::TruncatedRound { step } => {
                write!(f, "step {}: round ends early", step)
            }
            InvariantError::RanksChangedMidRound { step } => {
                write!(f, "step {}: ranks changed inside a round", step)
            }
            InvariantError::WindowOutOfRange { step, k, n } => {
                write!(f, "step {}: round computed for k={} >= n={}", step, k, n)
            }
            InvariantError::RankLengthMismatch { step, len, n } => {
                write!(f, "step {}: {} ranks for n={}", step, len, n)
            }
            InvariantError::RankOutOfRange { step, index, rank } => {
                write!(f, "step {}: rank[{}] = {} out of range", step, index, rank)
            }
            InvariantError::RankGap { step, missing } => {
                write!(f, "step {}: rank {} missing below max rank", step, missing)
            }
            InvariantError::PairCountMismatch { step, len, n } => {
                write!(f, "step {}: {} pairs for n={}", step, len, n)
            }
            InvariantError::PairIndexOrder {
                step,
                position,
                index,
            } => {
                write!(
                    f,
                    "step {}: pairs[{}] has index {} (not index order)",
                    step, position, index
                )
            }
            InvariantError::PairValueMismatch { step, index } => {
                write!(f, "step {}: pair for index {} disagrees with ranks", step, index)
            }
            InvariantError::SuffixMismatch { step, index } => {
                write!(f, "step {}: suffix for index {} is not S[{}..]", step, index, index)
            }
            InvariantError::UnsortedPairs { step, position } => {
                write!(f, "step {}: sorted pairs out of order at {}", step, position)
            }
            InvariantError::UnstableSort { step, position } => {
                write!(f, "step {}: tie reordered at sorted position {}", step, position)
            }
            InvariantError::SortedPairsNotPermutation { step } => {
                write!(f, "step {}: sorted pairs are not a permutation of pairs", step)
            }
            InvariantError::RanksDisagreeWithSort { step, index } => {
                write!(
                    f,
                    "step {}: rank of index {} does not follow sorted pairs",
                    step, index
                )
            }
            InvariantError::SnapshotCountMismatch { expected, actual } => {
                write!(f, "{} snapshots, expected {}", actual, expected)
            }
            InvariantError::TerminationMismatch { reason } => {
                write!(f, "termination mismatch: {}", reason)
            }
            InvariantError::WrongFinalOrder { position } => {
                write!(
                    f,
                    "final ranks misorder suffixes at suffix array position {}",
                    position
                )
            }
        }
    }
}

impl std::error::Error for InvariantError {}
