// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Core data types for rank-doubling traces.
//!
//! A trace is a list of [`Step`]s. Each step is one phase of one doubling
//! round, and carries only the data that exists at that phase: there are no
//! pairs before the first round, and no sorted pairs before the pairs are
//! sorted. The enum shape makes "sorted pairs without pairs" unrepresentable.
//!
//! ```text
//! Initialization ─▶ PairsGenerated(k=1) ─▶ PairsSorted(k=1) ─▶ RanksUpdated(k=1)
//!                 ─▶ PairsGenerated(k=2) ─▶ PairsSorted(k=2) ─▶ ...
//! ```
//!
//! The wire form flattens every variant into the same record shape
//! (`phase`, `k`, `ranks`, `pairs`, `sortedPairs`, `description`), with
//! absent fields encoded as `null`.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Rank of a suffix at the current window length.
///
/// Unicode scalar values top out at `0x10FFFF`, so raw code points fit.
pub type Rank = i32;

/// Rank of the position past the end of the string. Sorts before every real rank.
pub const SENTINEL: Rank = -1;

/// The comparison key of one suffix in one round: `(rank[i], rank[i + k])`.
///
/// Ordering is lexicographic on the two components, which is exactly the
/// derived `Ord` of a two-field tuple struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RankPair(pub Rank, pub Rank);

impl RankPair {
    pub fn first(self) -> Rank {
        self.0
    }

    pub fn second(self) -> Rank {
        self.1
    }

    /// True when the look-ahead position fell past the end of the string.
    pub fn is_terminal(self) -> bool {
        self.1 == SENTINEL
    }
}

impl fmt::Display for RankPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

/// One suffix's pair in one doubling round.
///
/// `suffix` is display data only. It never takes part in comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairRecord {
    pub pair: RankPair,
    pub index: usize,
    pub suffix: Arc<str>,
}

/// Phase tag of a [`Step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    Initialization,
    PairsGenerated,
    PairsSorted,
    RanksUpdated,
}

impl Phase {
    /// Wire name, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Initialization => "initialization",
            Phase::PairsGenerated => "pairs-generated",
            Phase::PairsSorted => "pairs-sorted",
            Phase::RanksUpdated => "ranks-updated",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable snapshot of the algorithm.
///
/// Pair lists are shared between the snapshots of a round: `pairs` is always
/// in index order `0..n`, `sorted_pairs` is the stable sort of the same records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Round 0: ranks seeded from single characters.
    Initialization { ranks: Arc<[Rank]> },
    /// Pairs built for window `k`, in index order.
    PairsGenerated {
        k: usize,
        ranks: Arc<[Rank]>,
        pairs: Arc<[PairRecord]>,
    },
    /// Pairs stably sorted by their rank pair.
    PairsSorted {
        k: usize,
        ranks: Arc<[Rank]>,
        pairs: Arc<[PairRecord]>,
        sorted_pairs: Arc<[PairRecord]>,
    },
    /// New ranks adopted for the next round. `ranks` is the new array.
    RanksUpdated {
        k: usize,
        ranks: Arc<[Rank]>,
        pairs: Arc<[PairRecord]>,
        sorted_pairs: Arc<[PairRecord]>,
    },
}

impl Step {
    pub fn phase(&self) -> Phase {
        match self {
            Step::Initialization { .. } => Phase::Initialization,
            Step::PairsGenerated { .. } => Phase::PairsGenerated,
            Step::PairsSorted { .. } => Phase::PairsSorted,
            Step::RanksUpdated { .. } => Phase::RanksUpdated,
        }
    }

    /// Window length of the round. `0` for initialization.
    pub fn k(&self) -> usize {
        match self {
            Step::Initialization { .. } => 0,
            Step::PairsGenerated { k, .. }
            | Step::PairsSorted { k, .. }
            | Step::RanksUpdated { k, .. } => *k,
        }
    }

    pub fn ranks(&self) -> &[Rank] {
        match self {
            Step::Initialization { ranks }
            | Step::PairsGenerated { ranks, .. }
            | Step::PairsSorted { ranks, .. }
            | Step::RanksUpdated { ranks, .. } => ranks,
        }
    }

    pub fn pairs(&self) -> Option<&[PairRecord]> {
        match self {
            Step::Initialization { .. } => None,
            Step::PairsGenerated { pairs, .. }
            | Step::PairsSorted { pairs, .. }
            | Step::RanksUpdated { pairs, .. } => Some(pairs),
        }
    }

    pub fn sorted_pairs(&self) -> Option<&[PairRecord]> {
        match self {
            Step::Initialization { .. } | Step::PairsGenerated { .. } => None,
            Step::PairsSorted { sorted_pairs, .. } | Step::RanksUpdated { sorted_pairs, .. } => {
                Some(sorted_pairs)
            }
        }
    }

    /// Human-readable description of what the phase represents.
    pub fn description(&self) -> String {
        match self {
            Step::Initialization { .. } => "initial ranks assigned from single characters".into(),
            Step::PairsGenerated { k, .. } => format!("pairs generated for k={}", k),
            Step::PairsSorted { .. } => "pairs sorted".into(),
            Step::RanksUpdated { .. } => "ranks updated".into(),
        }
    }

    /// Flat record used for serialization.
    pub fn to_record(&self) -> StepRecord<'_> {
        StepRecord {
            phase: self.phase(),
            k: self.k(),
            ranks: self.ranks(),
            pairs: self.pairs(),
            sorted_pairs: self.sorted_pairs(),
            description: self.description(),
        }
    }
}

impl Serialize for Step {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_record().serialize(serializer)
    }
}

/// Wire shape of a [`Step`]. Every variant maps onto the same fields.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRecord<'a> {
    pub phase: Phase,
    pub k: usize,
    pub ranks: &'a [Rank],
    pub pairs: Option<&'a [PairRecord]>,
    pub sorted_pairs: Option<&'a [PairRecord]>,
    pub description: String,
}

/// How round-0 ranks are derived from characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedRanking {
    /// Raw code point of each character. Gaps in rank space are allowed.
    #[default]
    Ordinal,
    /// Distinct code points compressed to `0..d`, preserving order.
    Dense,
}

/// Options for [`crate::trace_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceOptions {
    pub seed: SeedRanking,
}

/// Why the doubling loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "reason")]
pub enum Termination {
    /// `n = 1`: no round was computed.
    SingleCharacter,
    /// The round at window `k` gave every suffix a distinct rank.
    AllRanksDistinct { k: usize },
    /// The window reached `n`. `k` is the last window computed.
    WindowExhausted { k: usize },
}
