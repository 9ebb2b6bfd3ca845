// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Many independent traces at once.
//!
//! A single trace is strictly sequential: each round needs the fully sorted
//! ranks of the one before. Separate inputs share nothing, so a batch is
//! embarrassingly parallel. With the `parallel` feature, Rayon spreads inputs
//! over its pool; without it, inputs are traced one after another. Output
//! order always matches input order.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "parallel")]
use indicatif::ProgressBar;

use crate::boundary::{handle_with, CalculateRequest, Reply};
use crate::doubling::trace_with;
use crate::error::TraceError;
use crate::trace::Trace;
use crate::types::TraceOptions;

/// Trace every input. Result `i` belongs to input `i`.
#[cfg(feature = "parallel")]
pub fn trace_batch<S>(inputs: &[S], options: &TraceOptions) -> Vec<Result<Trace, TraceError>>
where
    S: AsRef<str> + Sync,
{
    inputs
        .par_iter()
        .map(|input| trace_with(input.as_ref(), options))
        .collect()
}

/// Trace every input. Result `i` belongs to input `i`.
#[cfg(not(feature = "parallel"))]
pub fn trace_batch<S>(inputs: &[S], options: &TraceOptions) -> Vec<Result<Trace, TraceError>>
where
    S: AsRef<str> + Sync,
{
    inputs
        .iter()
        .map(|input| trace_with(input.as_ref(), options))
        .collect()
}

/// Run every request through the boundary. Reply `i` belongs to request `i`.
#[cfg(feature = "parallel")]
pub fn handle_batch(requests: &[CalculateRequest], options: &TraceOptions) -> Vec<Reply> {
    requests
        .par_iter()
        .map(|request| handle_with(request, options))
        .collect()
}

/// Run every request through the boundary. Reply `i` belongs to request `i`.
#[cfg(not(feature = "parallel"))]
pub fn handle_batch(requests: &[CalculateRequest], options: &TraceOptions) -> Vec<Reply> {
    requests
        .iter()
        .map(|request| handle_with(request, options))
        .collect()
}

/// [`handle_batch`] with a tick on `progress` per finished request.
#[cfg(feature = "parallel")]
pub fn handle_batch_with_progress(
    requests: &[CalculateRequest],
    options: &TraceOptions,
    progress: &ProgressBar,
) -> Vec<Reply> {
    requests
        .par_iter()
        .map(|request| {
            let reply = handle_with(request, options);
            progress.inc(1);
            reply
        })
        .collect()
}
