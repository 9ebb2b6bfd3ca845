//! Batch tracing through the library and the `batch` subcommand.

use std::fs;
use std::process::Command;

use serde_json::Value;
use tempfile::TempDir;

use sastep::{handle_batch, trace, trace_batch, CalculateRequest, TraceError, TraceOptions};

use super::common::{dense_options, naive_suffix_array, SAMPLE_INPUTS};

#[test]
fn test_trace_batch_preserves_order() {
    let results = trace_batch(SAMPLE_INPUTS, &TraceOptions::default());
    assert_eq!(results.len(), SAMPLE_INPUTS.len());
    for (input, result) in SAMPLE_INPUTS.iter().zip(&results) {
        let t = result.as_ref().unwrap();
        assert_eq!(t.input(), *input);
        assert_eq!(t.suffix_array(), naive_suffix_array(input));
    }
}

#[test]
fn test_trace_batch_matches_single_traces() {
    let results = trace_batch(SAMPLE_INPUTS, &dense_options());
    for (input, result) in SAMPLE_INPUTS.iter().zip(results) {
        let single = sastep::trace_with(input, &dense_options()).unwrap();
        assert_eq!(result.unwrap(), single);
    }
}

#[test]
fn test_trace_batch_reports_empty_inputs_in_place() {
    let inputs = vec!["ab".to_string(), String::new(), "ba".to_string()];
    let results = trace_batch(&inputs, &TraceOptions::default());
    assert!(results[0].is_ok());
    assert_eq!(results[1], Err(TraceError::EmptyInput));
    assert_eq!(results[2].as_ref().unwrap(), &trace("ba").unwrap());
}

#[test]
fn test_handle_batch_mixes_successes_and_rejections() {
    let requests = vec![
        CalculateRequest::new("banana"),
        CalculateRequest::default(),
        CalculateRequest::new(""),
    ];
    let replies = handle_batch(&requests, &TraceOptions::default());
    let statuses: Vec<u16> = replies.iter().map(|r| r.status).collect();
    assert_eq!(statuses, vec![200, 400, 400]);
}

#[test]
fn test_batch_command_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("inputs.txt");
    let output_path = dir.path().join("out.json");
    fs::write(&input_path, "banana\n\nabc\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_sastep"))
        .env("NO_COLOR", "1")
        .args([
            "batch",
            input_path.to_str().unwrap(),
            "--output",
            output_path.to_str().unwrap(),
        ])
        .output()
        .expect("failed to run sastep");
    assert!(output.status.success());

    let bodies: Value = serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
    let bodies = bodies.as_array().unwrap();
    assert_eq!(bodies.len(), 3);
    assert!(bodies[0]["steps"].is_array());
    assert_eq!(bodies[1]["error"], "input string is required");
    assert!(bodies[2]["steps"].is_array());
}

#[test]
fn test_batch_command_missing_file() {
    let dir = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_sastep"))
        .env("NO_COLOR", "1")
        .args(["batch", dir.path().join("absent.txt").to_str().unwrap()])
        .output()
        .expect("failed to run sastep");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read"));
}
