// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! After-the-fact verification of a finished trace.
//!
//! [`verify_trace`] replays the round structure of a trace against the input
//! it claims to describe. It recomputes nothing from the tracer's internals:
//! pair values come from the snapshot's own ranks, renumbering is redone from
//! the sorted pairs, and the final order is checked against a plain
//! lexicographic comparison of the suffix strings.

use serde::Serialize;

use super::types::InvariantError;
use crate::trace::Trace;
use crate::types::{PairRecord, Phase, Rank, RankPair, Step, Termination, SENTINEL};

/// Summary of a trace that passed verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport {
    /// Input length in characters.
    pub n: usize,
    pub steps: usize,
    pub k_values: Vec<usize>,
    pub termination: Termination,
    pub suffix_array: Vec<usize>,
}

/// Re-check every structural and ordering property of `trace` against `input`.
pub fn verify_trace(input: &str, trace: &Trace) -> Result<VerificationReport, InvariantError> {
    if trace.input() != input {
        return Err(InvariantError::InputMismatch {
            expected: input.to_string(),
            actual: trace.input().to_string(),
        });
    }

    let offsets: Vec<usize> = input.char_indices().map(|(offset, _)| offset).collect();
    let n = offsets.len();
    let suffix = |i: usize| &input[offsets[i]..];
    let steps = trace.steps();

    let first = steps.first().ok_or(InvariantError::MissingInitialization)?;
    if first.phase() != Phase::Initialization {
        return Err(InvariantError::MissingInitialization);
    }
    check_rank_len(0, first.ranks(), n)?;

    let mut working: &[Rank] = first.ranks();
    let mut previous_k: Option<usize> = None;
    let mut full_rounds = 0;
    let mut terminal: Option<(usize, Vec<Rank>)> = None;
    let mut pos = 1;

    while pos < steps.len() {
        // pairs-generated
        let generated = &steps[pos];
        expect_phase(pos, generated, &[Phase::PairsGenerated])?;
        let k = generated.k();
        let expected_k = previous_k.map_or(1, |prev| prev * 2);
        if k != expected_k {
            return Err(InvariantError::KNotDoubled {
                step: pos,
                previous: previous_k.unwrap_or(0),
                found: k,
            });
        }
        if k >= n {
            return Err(InvariantError::WindowOutOfRange { step: pos, k, n });
        }
        if generated.ranks() != working {
            return Err(InvariantError::RanksChangedMidRound { step: pos });
        }
        let pairs = generated.pairs().unwrap_or_default();
        check_pairs(pos, pairs, working, k, input, &offsets)?;

        // pairs-sorted
        let sorted_step = steps
            .get(pos + 1)
            .ok_or(InvariantError::TruncatedRound { step: pos })?;
        expect_phase(pos + 1, sorted_step, &[Phase::PairsSorted])?;
        expect_same_round(pos + 1, sorted_step, k, working, pairs)?;
        let sorted = sorted_step.sorted_pairs().unwrap_or_default();
        check_sorted(pos + 1, pairs, sorted)?;

        let (next, max_rank) = renumber(sorted);
        if max_rank as usize == n - 1 {
            if pos + 2 != steps.len() {
                return Err(InvariantError::TerminationMismatch {
                    reason: format!("round k={} ordered every suffix but the trace continues", k),
                });
            }
            terminal = Some((k, next));
            break;
        }

        // ranks-updated
        let updated = steps
            .get(pos + 2)
            .ok_or(InvariantError::TruncatedRound { step: pos + 1 })?;
        expect_phase(pos + 2, updated, &[Phase::RanksUpdated])?;
        if updated.k() != k {
            return Err(InvariantError::KChangedMidRound {
                step: pos + 2,
                round_k: k,
                found: updated.k(),
            });
        }
        if updated.pairs() != Some(pairs) || updated.sorted_pairs() != Some(sorted) {
            return Err(InvariantError::RanksChangedMidRound { step: pos + 2 });
        }
        check_rank_len(pos + 2, updated.ranks(), n)?;
        check_dense(pos + 2, updated.ranks())?;
        if let Some(index) = (0..n).find(|&i| updated.ranks()[i] != next[i]) {
            return Err(InvariantError::RanksDisagreeWithSort {
                step: pos + 2,
                index,
            });
        }

        working = updated.ranks();
        previous_k = Some(k);
        full_rounds += 1;
        pos += 3;
    }

    let (expected_termination, expected_final) = match terminal {
        Some((k, ranks)) => (Termination::AllRanksDistinct { k }, ranks),
        None => {
            let next_k = previous_k.map_or(1, |k| k * 2);
            if next_k < n {
                return Err(InvariantError::TerminationMismatch {
                    reason: format!("trace stops before k={} reaches n={}", next_k, n),
                });
            }
            let reason = match previous_k {
                None => Termination::SingleCharacter,
                Some(k) => Termination::WindowExhausted { k },
            };
            (reason, working.to_vec())
        }
    };

    let terminal_steps = if terminal_round(expected_termination) { 2 } else { 0 };
    let expected_len = 1 + 3 * full_rounds + terminal_steps;
    if steps.len() != expected_len {
        return Err(InvariantError::SnapshotCountMismatch {
            expected: expected_len,
            actual: steps.len(),
        });
    }
    if trace.termination() != expected_termination {
        return Err(InvariantError::TerminationMismatch {
            reason: format!(
                "recorded {:?}, replay gives {:?}",
                trace.termination(),
                expected_termination
            ),
        });
    }
    if trace.final_ranks() != expected_final.as_slice() {
        return Err(InvariantError::TerminationMismatch {
            reason: "final ranks differ from the last round".to_string(),
        });
    }

    let suffix_array = trace.suffix_array();
    let ranks = trace.final_ranks();
    for position in 1..suffix_array.len() {
        let (prev, curr) = (suffix_array[position - 1], suffix_array[position]);
        if ranks[prev] >= ranks[curr] || suffix(prev) >= suffix(curr) {
            return Err(InvariantError::WrongFinalOrder { position });
        }
    }

    Ok(VerificationReport {
        n,
        steps: steps.len(),
        k_values: trace.k_values(),
        termination: expected_termination,
        suffix_array,
    })
}

fn terminal_round(termination: Termination) -> bool {
    matches!(termination, Termination::AllRanksDistinct { .. })
}

fn expect_phase(
    step: usize,
    found: &Step,
    expected: &'static [Phase],
) -> Result<(), InvariantError> {
    if expected.contains(&found.phase()) {
        Ok(())
    } else {
        Err(InvariantError::UnexpectedPhase {
            step,
            expected,
            found: found.phase(),
        })
    }
}

fn expect_same_round(
    step: usize,
    found: &Step,
    k: usize,
    ranks: &[Rank],
    pairs: &[PairRecord],
) -> Result<(), InvariantError> {
    if found.k() != k {
        return Err(InvariantError::KChangedMidRound {
            step,
            round_k: k,
            found: found.k(),
        });
    }
    if found.ranks() != ranks || found.pairs() != Some(pairs) {
        return Err(InvariantError::RanksChangedMidRound { step });
    }
    Ok(())
}

fn check_rank_len(step: usize, ranks: &[Rank], n: usize) -> Result<(), InvariantError> {
    if ranks.len() == n {
        Ok(())
    } else {
        Err(InvariantError::RankLengthMismatch {
            step,
            len: ranks.len(),
            n,
        })
    }
}

fn check_dense(step: usize, ranks: &[Rank]) -> Result<(), InvariantError> {
    let n = ranks.len();
    let mut seen = vec![false; n];
    for (index, &rank) in ranks.iter().enumerate() {
        if rank < 0 || rank as usize >= n {
            return Err(InvariantError::RankOutOfRange { step, index, rank });
        }
        seen[rank as usize] = true;
    }
    let max = ranks.iter().copied().max().unwrap_or(0) as usize;
    match seen.iter().take(max + 1).position(|present| !present) {
        Some(missing) => Err(InvariantError::RankGap { step, missing }),
        None => Ok(()),
    }
}

fn check_pairs(
    step: usize,
    pairs: &[PairRecord],
    ranks: &[Rank],
    k: usize,
    input: &str,
    offsets: &[usize],
) -> Result<(), InvariantError> {
    let n = ranks.len();
    if pairs.len() != n {
        return Err(InvariantError::PairCountMismatch {
            step,
            len: pairs.len(),
            n,
        });
    }
    for (position, record) in pairs.iter().enumerate() {
        if record.index != position {
            return Err(InvariantError::PairIndexOrder {
                step,
                position,
                index: record.index,
            });
        }
        let i = record.index;
        let ahead = if i + k < n { ranks[i + k] } else { SENTINEL };
        if record.pair != RankPair(ranks[i], ahead) {
            return Err(InvariantError::PairValueMismatch { step, index: i });
        }
        if *record.suffix != input[offsets[i]..] {
            return Err(InvariantError::SuffixMismatch { step, index: i });
        }
    }
    Ok(())
}

fn check_sorted(
    step: usize,
    pairs: &[PairRecord],
    sorted: &[PairRecord],
) -> Result<(), InvariantError> {
    let mut used = vec![false; pairs.len()];
    if sorted.len() != pairs.len() {
        return Err(InvariantError::SortedPairsNotPermutation { step });
    }
    for record in sorted {
        match pairs.get(record.index) {
            Some(original) if original == record && !used[record.index] => {
                used[record.index] = true;
            }
            _ => return Err(InvariantError::SortedPairsNotPermutation { step }),
        }
    }
    for position in 1..sorted.len() {
        let (prev, curr) = (&sorted[position - 1], &sorted[position]);
        if prev.pair > curr.pair {
            return Err(InvariantError::UnsortedPairs { step, position });
        }
        if prev.pair == curr.pair && prev.index > curr.index {
            return Err(InvariantError::UnstableSort { step, position });
        }
    }
    Ok(())
}

/// Renumbering rule, restated independently of the tracer.
fn renumber(sorted: &[PairRecord]) -> (Vec<Rank>, Rank) {
    let mut ranks = vec![0; sorted.len()];
    let mut max = 0;
    for position in 1..sorted.len() {
        if sorted[position].pair != sorted[position - 1].pair {
            max += 1;
        }
        ranks[sorted[position].index] = max;
    }
    (ranks, max)
}
