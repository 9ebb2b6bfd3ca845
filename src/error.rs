// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Errors returned by the tracer and the request boundary.

use std::fmt;

/// Error from [`crate::trace`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceError {
    /// The initial rank array and loop bounds need `n >= 1`.
    EmptyInput,
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceError::EmptyInput => write!(f, "cannot trace an empty string"),
        }
    }
}

impl std::error::Error for TraceError {}

/// Client error at the request boundary. Never reaches the tracer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryError {
    /// The `input` field was absent or empty.
    MissingInput,
    /// The request body was not a valid request object.
    MalformedRequest(String),
}

impl fmt::Display for BoundaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryError::MissingInput => write!(f, "input string is required"),
            BoundaryError::MalformedRequest(reason) => {
                write!(f, "malformed request: {}", reason)
            }
        }
    }
}

impl std::error::Error for BoundaryError {}

impl From<TraceError> for BoundaryError {
    fn from(err: TraceError) -> Self {
        match err {
            TraceError::EmptyInput => BoundaryError::MissingInput,
        }
    }
}
