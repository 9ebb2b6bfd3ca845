//! Custom cargo commands for the sastep crate.
//!
//! Usage:
//!   cargo xtask verify    - Run full verification suite
//!   cargo xtask test      - Run all tests
//!   cargo xtask check     - Quick check (check + test + clippy)
//!   cargo xtask kani      - Run Kani proofs for the doubling round
//!   cargo xtask fuzz      - Fuzz one target for a bounded time
//!   cargo xtask bench     - Run benchmarks

use anyhow::{bail, Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Contracts table header that must survive refactors
const CONTRACTS_MARKER: &str = "INVARIANTS (DO NOT REMOVE";

/// Minimum `// INVARIANT:` call sites in the tracer
const MIN_INVARIANT_MARKERS: usize = 5;

const DEFAULT_FUZZ_TARGET: &str = "trace_input";
const DEFAULT_FUZZ_SECONDS: u32 = 60;

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let task = args.next();
    match task.as_deref() {
        Some("verify") => verify()?,
        Some("test") => test()?,
        Some("check") => check()?,
        Some("kani") => kani()?,
        Some("fuzz") => fuzz(args.next().as_deref(), args.next().as_deref())?,
        Some("bench") => bench()?,
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  verify                Run full verification suite (markers + tests + clippy + wasm build)
  test                  Run all Rust tests, with and without default features
  check                 Quick check (cargo check + test + clippy)
  kani                  Run Kani proofs in kani-proofs/
  fuzz [TARGET] [SECS]  Fuzz TARGET (default {target}) for SECS seconds (default {secs})
  bench                 Run benchmarks
"#,
        target = DEFAULT_FUZZ_TARGET,
        secs = DEFAULT_FUZZ_SECONDS
    );
}

/// Full verification suite
fn verify() -> Result<()> {
    println!("==========================================");
    println!("sastep Verification Suite");
    println!("==========================================\n");

    println!("[1/5] Checking invariant markers...");
    check_invariant_markers()?;
    println!("✓ Invariant markers present\n");

    println!("[2/5] Running Rust tests...");
    run_cargo(&["test", "--quiet"])?;
    println!("✓ All Rust tests passed\n");

    println!("[3/5] Running tests without default features...");
    run_cargo(&["test", "--quiet", "--no-default-features"])?;
    println!("✓ Sequential build passed\n");

    println!("[4/5] Running clippy...");
    run_cargo(&["clippy", "--quiet", "--all-features", "--", "-D", "warnings"])?;
    println!("✓ Clippy passed\n");

    println!("[5/5] Checking WASM feature...");
    run_cargo(&["check", "--quiet", "--lib", "--features", "wasm"])?;
    println!("✓ WASM export builds\n");

    println!("==========================================");
    println!("✓ ALL VERIFICATION CHECKS PASSED");
    println!("==========================================");

    Ok(())
}

/// Run all tests
fn test() -> Result<()> {
    run_cargo(&["test"])?;
    run_cargo(&["test", "--no-default-features"])
}

/// Quick check
fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/3] cargo check...");
    run_cargo(&["check"])?;

    println!("[2/3] cargo test...");
    run_cargo(&["test", "--quiet"])?;

    println!("[3/3] cargo clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

/// Run Kani proofs
fn kani() -> Result<()> {
    let dir = project_root()?.join("kani-proofs");
    run_in(&dir, "cargo", &["kani"]).context("Is cargo-kani installed?")
}

/// Fuzz a single target
fn fuzz(target: Option<&str>, seconds: Option<&str>) -> Result<()> {
    let target = target.unwrap_or(DEFAULT_FUZZ_TARGET);
    let seconds = match seconds {
        Some(s) => s
            .parse::<u32>()
            .with_context(|| format!("Invalid fuzz duration: {}", s))?,
        None => DEFAULT_FUZZ_SECONDS,
    };
    let max_time = format!("-max_total_time={}", seconds);

    let root = project_root()?;
    run_in(
        &root,
        "cargo",
        &["+nightly", "fuzz", "run", target, "--", &max_time],
    )
    .context("Is cargo-fuzz installed?")
}

/// Run benchmarks
fn bench() -> Result<()> {
    run_cargo(&["bench"])
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("Failed to read current directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn run_in(dir: &Path, program: &str, args: &[&str]) -> Result<()> {
    let status = Command::new(program)
        .args(args)
        .current_dir(dir)
        .status()
        .with_context(|| format!("Failed to run {} {:?}", program, args))?;

    if !status.success() {
        bail!("{} {:?} failed", program, args);
    }

    Ok(())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    run_in(&project_root()?, "cargo", args)
}

fn check_invariant_markers() -> Result<()> {
    let root = project_root()?;

    let contracts = std::fs::read_to_string(root.join("src/verify/contracts.rs"))
        .context("Failed to read src/verify/contracts.rs")?;
    if !contracts.contains(CONTRACTS_MARKER) {
        bail!("Contracts table is gone from src/verify/contracts.rs");
    }

    let doubling = std::fs::read_to_string(root.join("src/doubling.rs"))
        .context("Failed to read src/doubling.rs")?;
    let count = doubling.matches("// INVARIANT:").count();

    if count < MIN_INVARIANT_MARKERS {
        bail!(
            "Expected at least {} INVARIANT markers in src/doubling.rs, found {}. \
             Someone may have removed contract checks!",
            MIN_INVARIANT_MARKERS,
            count
        );
    }

    Ok(())
}
