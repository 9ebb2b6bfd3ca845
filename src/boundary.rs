// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The `calculate` request/response contract.
//!
//! Transport-agnostic: a request value (or its JSON text) goes in, a status
//! code and a response body come out. The CLI feeds it stdin, the WASM export
//! feeds it a JS string; a web server would feed it a POST body.
//!
//! ```text
//! {"input": "banana"}  ─▶  200 {"steps": [...]}
//! {"input": ""}        ─▶  400 {"error": "input string is required"}
//! {}                   ─▶  400 {"error": "input string is required"}
//! not json             ─▶  400 {"error": "malformed request: ..."}
//! ```
//!
//! Missing or empty input is rejected here, before the tracer runs.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::doubling::trace_with;
use crate::error::BoundaryError;
use crate::trace::Trace;
use crate::types::TraceOptions;

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;

/// Request carrying the candidate input string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculateRequest {
    #[serde(default)]
    pub input: Option<String>,
}

impl CalculateRequest {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: Some(input.into()),
        }
    }
}

/// Response body: the trace under `steps`, or an error message under `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Steps(Trace),
    Error { error: String },
}

/// Status code plus body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: ResponseBody,
}

impl Reply {
    fn ok(trace: Trace) -> Self {
        Self {
            status: STATUS_OK,
            body: ResponseBody::Steps(trace),
        }
    }

    fn client_error(err: &BoundaryError) -> Self {
        Self {
            status: STATUS_BAD_REQUEST,
            body: ResponseBody::Error {
                error: err.to_string(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }

    pub fn trace(&self) -> Option<&Trace> {
        match &self.body {
            ResponseBody::Steps(trace) => Some(trace),
            ResponseBody::Error { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.body {
            ResponseBody::Steps(_) => None,
            ResponseBody::Error { error } => Some(error),
        }
    }

    /// Body as compact JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.body)
    }

    /// Body as indented JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.body)
    }
}

/// Handle a request with default options.
pub fn handle(request: &CalculateRequest) -> Reply {
    handle_with(request, &TraceOptions::default())
}

/// Validate the request, then trace.
pub fn handle_with(request: &CalculateRequest, options: &TraceOptions) -> Reply {
    let input = match request.input.as_deref() {
        Some(input) if !input.is_empty() => input,
        _ => {
            warn!("rejected request without input");
            return Reply::client_error(&BoundaryError::MissingInput);
        }
    };

    match trace_with(input, options) {
        Ok(trace) => {
            info!(
                n = input.chars().count(),
                steps = trace.len(),
                "calculated trace"
            );
            Reply::ok(trace)
        }
        Err(err) => Reply::client_error(&BoundaryError::from(err)),
    }
}

/// Parse a JSON request body and handle it with default options.
pub fn handle_json(body: &str) -> Reply {
    handle_json_with(body, &TraceOptions::default())
}

/// Parse a JSON request body and handle it.
///
/// The body must be a JSON object. Serde would otherwise accept a sequence
/// for a struct, so `[]` would read as a request without input.
pub fn handle_json_with(body: &str, options: &TraceOptions) -> Reply {
    match parse_request(body) {
        Ok(request) => handle_with(&request, options),
        Err(reason) => {
            warn!(error = %reason, "rejected malformed request");
            Reply::client_error(&BoundaryError::MalformedRequest(reason))
        }
    }
}

fn parse_request(body: &str) -> Result<CalculateRequest, String> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| e.to_string())?;
    if !value.is_object() {
        return Err("expected a JSON object".to_string());
    }
    serde_json::from_value(value).map_err(|e| e.to_string())
}
