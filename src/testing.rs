// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical oracles so tests don't each grow their own.

#![doc(hidden)]

use crate::types::{SeedRanking, TraceOptions};

/// Suffix of `input` starting at character `index`.
pub fn char_suffix(input: &str, index: usize) -> &str {
    match input.char_indices().nth(index) {
        Some((offset, _)) => &input[offset..],
        None => "",
    }
}

/// Suffix array by sorting the suffix strings directly. O(n² log n).
pub fn naive_suffix_array(input: &str) -> Vec<usize> {
    let n = input.chars().count();
    let mut sa: Vec<usize> = (0..n).collect();
    sa.sort_by(|&a, &b| char_suffix(input, a).cmp(char_suffix(input, b)));
    sa
}

/// Options with dense round-0 ranks, the numbering textbooks use.
pub fn dense_options() -> TraceOptions {
    TraceOptions {
        seed: SeedRanking::Dense,
    }
}
