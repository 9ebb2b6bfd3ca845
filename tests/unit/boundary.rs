//! Request validation and response bodies at the calculate boundary.

use sastep::boundary::{handle_json_with, handle_with, STATUS_BAD_REQUEST, STATUS_OK};
use sastep::{handle, handle_json, CalculateRequest, ResponseBody, SeedRanking, TraceOptions};

const REQUIRED: &str = "input string is required";

#[test]
fn accepts_non_empty_input() {
    let reply = handle(&CalculateRequest::new("banana"));
    assert_eq!(reply.status, STATUS_OK);
    assert!(reply.is_success());

    let trace = reply.trace().expect("success carries a trace");
    assert_eq!(trace.input(), "banana");
    assert_eq!(trace.suffix_array(), vec![5, 3, 1, 0, 4, 2]);
}

#[test]
fn rejects_absent_null_and_empty_input() {
    for body in [r#"{}"#, r#"{"input": null}"#, r#"{"input": ""}"#] {
        let reply = handle_json(body);
        assert_eq!(reply.status, STATUS_BAD_REQUEST, "body {}", body);
        assert_eq!(reply.error(), Some(REQUIRED), "body {}", body);
    }
}

#[test]
fn default_request_is_missing_input() {
    let reply = handle(&CalculateRequest::default());
    assert_eq!(
        reply.body,
        ResponseBody::Error {
            error: REQUIRED.to_string()
        }
    );
}

#[test]
fn rejects_wrong_shapes() {
    for body in ["", "[]", r#"{"input": ["a"]}"#, r#"{"input": true}"#, "{"] {
        let reply = handle_json(body);
        assert_eq!(reply.status, STATUS_BAD_REQUEST, "body {:?}", body);
        assert!(reply.trace().is_none());
    }
}

#[test]
fn array_body_is_malformed_not_missing_input() {
    let reply = handle_json("[]");
    assert_eq!(reply.status, STATUS_BAD_REQUEST);
    let error = reply.error().unwrap();
    assert!(error.starts_with("malformed request"), "{}", error);
    assert_ne!(error, REQUIRED);
}

#[test]
fn whitespace_is_a_valid_input() {
    let reply = handle_json(r#"{"input": " "}"#);
    assert!(reply.is_success());
    assert_eq!(reply.trace().unwrap().len(), 1);
}

#[test]
fn options_pass_through_to_the_tracer() {
    let dense = TraceOptions {
        seed: SeedRanking::Dense,
    };
    let reply = handle_with(&CalculateRequest::new("ba"), &dense);
    assert_eq!(reply.trace().unwrap().steps()[0].ranks(), &[1, 0]);

    let reply = handle_json_with(r#"{"input": "ba"}"#, &TraceOptions::default());
    assert_eq!(reply.trace().unwrap().steps()[0].ranks(), &[98, 97]);
}

#[test]
fn error_body_is_a_single_field() {
    let reply = handle_json("{}");
    let value: serde_json::Value = serde_json::from_str(&reply.to_json().unwrap()).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 1);
    assert_eq!(object["error"], REQUIRED);
}

#[test]
fn requests_round_trip_through_serde() {
    let request: CalculateRequest = serde_json::from_str(r#"{"input":"abc"}"#).unwrap();
    assert_eq!(request, CalculateRequest::new("abc"));
    assert_eq!(
        serde_json::to_string(&request).unwrap(),
        r#"{"input":"abc"}"#
    );
}
