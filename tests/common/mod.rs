//! Shared test utilities and fixtures.

#![allow(dead_code)]

use sastep::{Phase, Step, Termination, Trace};

// Re-export canonical oracles from sastep::testing
pub use sastep::testing::{char_suffix, dense_options, naive_suffix_array};

// ============================================================================
// FIXTURES
// ============================================================================

/// Inputs with known shapes: single char, all equal, periodic, classic examples.
pub const SAMPLE_INPUTS: &[&str] = &[
    "a",
    "é",
    "ab",
    "ba",
    "aaa",
    "aaaaaaaa",
    "banana",
    "mississippi",
    "abracadabra",
    "abababab",
    "zyxwvutsrq",
    "héllo wörld",
    "日本語のテキスト",
];

// ============================================================================
// HELPERS
// ============================================================================

/// Phase sequence of a trace.
pub fn phases(trace: &Trace) -> Vec<Phase> {
    trace.steps().iter().map(Step::phase).collect()
}

/// Number of rounds that emitted a `ranks-updated` step.
pub fn full_rounds(trace: &Trace) -> usize {
    phases(trace)
        .iter()
        .filter(|&&p| p == Phase::RanksUpdated)
        .count()
}

/// True if the last round stopped after sorting.
pub fn ended_by_shortcut(trace: &Trace) -> bool {
    trace.steps().last().map(Step::phase) == Some(Phase::PairsSorted)
}

/// Assert every rank array produced by renumbering is gap-free in `[0, n-1]`.
///
/// Final ranks count only when a round produced them. A single character
/// keeps its seed rank, which may be a raw code point.
pub fn assert_updated_ranks_dense(trace: &Trace) {
    let renumbered_final = match trace.termination() {
        Termination::AllRanksDistinct { .. } => Some(trace.final_ranks()),
        Termination::SingleCharacter | Termination::WindowExhausted { .. } => None,
    };
    let updated = trace
        .steps()
        .iter()
        .filter(|s| s.phase() == Phase::RanksUpdated)
        .map(Step::ranks)
        .chain(renumbered_final);

    for ranks in updated {
        let n = ranks.len();
        let max = *ranks.iter().max().expect("non-empty ranks");
        assert!(max >= 0 && (max as usize) < n, "max rank {} for n={}", max, n);
        for r in 0..=max {
            assert!(ranks.contains(&r), "rank {} missing in {:?}", r, ranks);
        }
        assert!(ranks.iter().all(|&r| r >= 0), "negative rank in {:?}", ranks);
    }
}
