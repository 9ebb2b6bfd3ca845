// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The verification layer: runtime contracts and trace replay.
//!
//! Two complementary approaches to catching bugs:
//!
//! 1. **Runtime contracts** that panic in debug builds when the doubling loop
//!    breaks an invariant. Zero-cost in release, but catch bugs while tests run.
//!
//! 2. **Trace replay** (`verify_trace`) that re-checks a finished trace from the
//!    outside and reports the first violation as a value.
//!
//! Use both. The contracts catch algorithmic errors at the point they happen.
//! The replay catches anything that slips through, including traces that were
//! edited or deserialized from somewhere else.

pub mod contracts;
mod report;
mod types;

pub use report::{verify_trace, VerificationReport};
pub use types::*;
