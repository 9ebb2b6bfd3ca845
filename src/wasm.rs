// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! WebAssembly bindings for the step visualizer.
//!
//! Lets a browser front end trace in-process instead of posting to a server.
//! The resolved value has the same shape as the `calculate` response body:
//! `{ steps: [...] }`. Client errors reject with the error message.

use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::prelude::*;

use crate::boundary::{handle_with, CalculateRequest, ResponseBody};
use crate::types::{SeedRanking, TraceOptions};

/// Trace `input` with raw code point seeding.
#[wasm_bindgen]
pub fn calculate(input: &str) -> Result<JsValue, JsValue> {
    calculate_with_seed(input, false)
}

/// Trace `input`, optionally with dense round-0 ranks.
#[wasm_bindgen(js_name = calculateWithSeed)]
pub fn calculate_with_seed(input: &str, dense: bool) -> Result<JsValue, JsValue> {
    let options = TraceOptions {
        seed: if dense {
            SeedRanking::Dense
        } else {
            SeedRanking::Ordinal
        },
    };
    let reply = handle_with(&CalculateRequest::new(input), &options);
    match reply.body {
        ResponseBody::Error { error } => Err(JsValue::from_str(&error)),
        body => {
            // Plain objects, not ES Maps, so `result.steps` works in JS
            let serializer = Serializer::json_compatible();
            body.serialize(&serializer).map_err(JsValue::from)
        }
    }
}
