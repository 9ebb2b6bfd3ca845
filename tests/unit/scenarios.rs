//! Worked examples with every snapshot pinned down.

use super::common::{
    assert_updated_ranks_dense, dense_options, ended_by_shortcut, full_rounds, phases,
    SAMPLE_INPUTS,
};
use sastep::{trace, trace_with, Phase, RankPair, Step, Termination, TraceError, SENTINEL};

fn indices(records: &[sastep::PairRecord]) -> Vec<usize> {
    records.iter().map(|r| r.index).collect()
}

fn keys(records: &[sastep::PairRecord]) -> Vec<RankPair> {
    records.iter().map(|r| r.pair).collect()
}

// ============================================================================
// SINGLE CHARACTER
// ============================================================================

#[test]
fn single_character_has_one_snapshot() {
    let t = trace_with("a", &dense_options()).unwrap();
    assert_eq!(t.len(), 1);

    let step = &t.steps()[0];
    assert_eq!(step.phase(), Phase::Initialization);
    assert_eq!(step.k(), 0);
    assert_eq!(step.ranks(), &[0]);
    assert!(step.pairs().is_none());
    assert!(step.sorted_pairs().is_none());

    assert_eq!(t.termination(), Termination::SingleCharacter);
    assert_eq!(t.suffix_array(), vec![0]);
}

#[test]
fn single_character_ordinal_rank_is_code_point() {
    let t = trace("a").unwrap();
    assert_eq!(t.steps()[0].ranks(), &[97]);
    assert_eq!(t.final_ranks(), &[97]);
}

#[test]
fn renumbered_ranks_dense_for_every_fixture() {
    // Includes single characters, whose seed ranks are never renumbered
    for input in SAMPLE_INPUTS {
        assert_updated_ranks_dense(&trace(input).unwrap());
        assert_updated_ranks_dense(&trace_with(input, &dense_options()).unwrap());
    }
}

// ============================================================================
// TWO DISTINCT CHARACTERS
// ============================================================================

#[test]
fn ba_dense_matches_textbook_numbering() {
    let t = trace_with("ba", &dense_options()).unwrap();
    assert_eq!(
        phases(&t),
        vec![Phase::Initialization, Phase::PairsGenerated, Phase::PairsSorted]
    );
    assert_eq!(t.steps()[0].ranks(), &[1, 0]);

    let generated = &t.steps()[1];
    assert_eq!(generated.k(), 1);
    assert_eq!(
        keys(generated.pairs().unwrap()),
        vec![RankPair(1, 0), RankPair(0, SENTINEL)]
    );
    assert_eq!(indices(generated.pairs().unwrap()), vec![0, 1]);

    let sorted = &t.steps()[2];
    assert_eq!(
        keys(sorted.sorted_pairs().unwrap()),
        vec![RankPair(0, SENTINEL), RankPair(1, 0)]
    );
    assert_eq!(indices(sorted.sorted_pairs().unwrap()), vec![1, 0]);

    // Terminal round: no ranks-updated step, final ranks still available
    assert_eq!(t.final_ranks(), &[1, 0]);
    assert_eq!(t.termination(), Termination::AllRanksDistinct { k: 1 });
}

#[test]
fn ba_ordinal_uses_raw_code_points() {
    let t = trace("ba").unwrap();
    assert_eq!(t.steps()[0].ranks(), &[98, 97]);
    assert_eq!(
        keys(t.steps()[1].pairs().unwrap()),
        vec![RankPair(98, 97), RankPair(97, SENTINEL)]
    );
    assert_eq!(t.final_ranks(), &[1, 0]);
}

// ============================================================================
// ALL-EQUAL CHARACTERS
// ============================================================================

#[test]
fn aaa_refines_through_two_rounds() {
    let t = trace_with("aaa", &dense_options()).unwrap();
    assert_eq!(t.steps()[0].ranks(), &[0, 0, 0]);

    // k = 1
    assert_eq!(
        keys(t.steps()[1].pairs().unwrap()),
        vec![RankPair(0, 0), RankPair(0, 0), RankPair(0, SENTINEL)]
    );
    assert_eq!(indices(t.steps()[2].sorted_pairs().unwrap()), vec![2, 0, 1]);
    assert_eq!(t.steps()[3].phase(), Phase::RanksUpdated);
    assert_eq!(t.steps()[3].ranks(), &[1, 1, 0]);

    // k = 2
    let generated = &t.steps()[4];
    assert_eq!(generated.k(), 2);
    assert_eq!(generated.ranks(), &[1, 1, 0]);
    assert_eq!(
        keys(generated.pairs().unwrap()),
        vec![RankPair(1, 0), RankPair(1, SENTINEL), RankPair(0, SENTINEL)]
    );
    assert_eq!(indices(t.steps()[5].sorted_pairs().unwrap()), vec![2, 1, 0]);

    assert_eq!(t.len(), 6);
    assert_eq!(t.final_ranks(), &[2, 1, 0]);
    assert_eq!(t.k_values(), vec![1, 2]);
}

#[test]
fn all_equal_never_computes_k_at_or_beyond_n() {
    for n in 2..=17 {
        let input = "z".repeat(n);
        let t = trace(&input).unwrap();
        assert!(t.k_values().iter().all(|&k| k < n), "n={}", n);
        assert_eq!(t.suffix_array(), (0..n).rev().collect::<Vec<_>>());
    }
}

// ============================================================================
// GENERAL SHAPE
// ============================================================================

#[test]
fn empty_input_is_an_error() {
    assert_eq!(trace(""), Err(TraceError::EmptyInput));
    assert_eq!(trace_with("", &dense_options()), Err(TraceError::EmptyInput));
}

#[test]
fn snapshot_count_matches_round_structure() {
    for input in SAMPLE_INPUTS {
        let t = trace(input).unwrap();
        let terminal = if ended_by_shortcut(&t) { 2 } else { 0 };
        assert_eq!(t.len(), 1 + 3 * full_rounds(&t) + terminal, "input {:?}", input);
    }
}

#[test]
fn terminal_round_has_no_ranks_updated() {
    let t = trace("banana").unwrap();
    let Termination::AllRanksDistinct { k } = t.termination() else {
        panic!("banana should stop by distinct ranks");
    };
    let last_round: Vec<Phase> = t
        .steps()
        .iter()
        .filter(|s| s.k() == k)
        .map(Step::phase)
        .collect();
    assert_eq!(last_round, vec![Phase::PairsGenerated, Phase::PairsSorted]);
}

#[test]
fn rounds_share_pair_records_between_phases() {
    let t = trace("mississippi").unwrap();
    for w in t.steps().windows(2) {
        if w[0].phase() == Phase::PairsGenerated {
            assert_eq!(w[0].pairs(), w[1].pairs());
        }
    }
}
