// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the tracer.
//!
//! Any non-empty string must trace without panicking, and the resulting trace
//! must survive full replay verification under both seedings.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sastep::{trace_with, verify_trace, SeedRanking, TraceError, TraceOptions};

#[derive(Debug, Arbitrary)]
struct Input {
    text: String,
    dense: bool,
}

fuzz_target!(|input: Input| {
    // Long inputs make the O(n²) final-order check dominate
    if input.text.chars().count() > 512 {
        return;
    }

    let options = TraceOptions {
        seed: if input.dense {
            SeedRanking::Dense
        } else {
            SeedRanking::Ordinal
        },
    };

    match trace_with(&input.text, &options) {
        Ok(trace) => {
            assert!(!input.text.is_empty());
            if let Err(e) = verify_trace(&input.text, &trace) {
                panic!("trace of {:?} failed verification: {}", input.text, e);
            }
        }
        Err(TraceError::EmptyInput) => assert!(input.text.is_empty()),
    }
});
