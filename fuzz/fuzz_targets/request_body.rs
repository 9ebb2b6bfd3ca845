// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for request parsing at the calculate boundary.
//!
//! Arbitrary bytes go in as a request body. The boundary must answer with
//! 200 or 400, never panic, and always produce serializable JSON.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sastep::boundary::{STATUS_BAD_REQUEST, STATUS_OK};
use sastep::handle_json;

fuzz_target!(|data: &[u8]| {
    let Ok(body) = std::str::from_utf8(data) else {
        return;
    };
    if body.len() > 2048 {
        return;
    }

    let reply = handle_json(body);
    assert!(reply.status == STATUS_OK || reply.status == STATUS_BAD_REQUEST);
    assert_eq!(reply.is_success(), reply.trace().is_some());
    assert_eq!(reply.is_success(), reply.error().is_none());

    let json = reply.to_json().expect("reply body serializes");
    assert!(json.starts_with('{'));
});
