// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The finished trace and its append-only builder.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::types::{Phase, Rank, Step, Termination};

/// Append-only snapshot list. Only the tracer builds one; consumers see the
/// [`Trace`] once it is complete.
#[derive(Debug)]
pub(crate) struct TraceBuilder {
    input: String,
    steps: Vec<Step>,
}

impl TraceBuilder {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
            steps: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    pub(crate) fn finish(self, final_ranks: Vec<Rank>, termination: Termination) -> Trace {
        Trace {
            input: self.input,
            steps: self.steps,
            final_ranks,
            termination,
        }
    }
}

/// Complete, immutable record of one suffix array construction.
///
/// Serializes as `{"steps": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    input: String,
    steps: Vec<Step>,
    final_ranks: Vec<Rank>,
    termination: Termination,
}

impl Trace {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }

    /// Number of snapshots.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false: every trace starts with an initialization snapshot.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    /// Ranks that fully order the suffixes.
    ///
    /// When the last round distinguished every suffix, these ranks never
    /// appear in a snapshot: the loop stops before a `ranks-updated` step.
    pub fn final_ranks(&self) -> &[Rank] {
        &self.final_ranks
    }

    /// Suffix start indices in ascending suffix order.
    pub fn suffix_array(&self) -> Vec<usize> {
        let mut sa: Vec<usize> = (0..self.final_ranks.len()).collect();
        sa.sort_by_key(|&i| self.final_ranks[i]);
        sa
    }

    /// Window length of each doubling round, in order.
    pub fn k_values(&self) -> Vec<usize> {
        self.steps
            .iter()
            .filter(|step| step.phase() == Phase::PairsGenerated)
            .map(Step::k)
            .collect()
    }

    /// Number of doubling rounds computed, including a terminal one.
    pub fn rounds(&self) -> usize {
        self.k_values().len()
    }
}

impl Serialize for Trace {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Trace", 1)?;
        state.serialize_field("steps", &self.steps)?;
        state.end()
    }
}
