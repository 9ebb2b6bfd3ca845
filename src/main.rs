use std::fs;
use std::io::{self, Read, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(feature = "parallel")]
use indicatif::{ProgressBar, ProgressStyle};

use sastep::boundary::handle_json_with;
use sastep::{trace_with, verify_trace, CalculateRequest, Reply, ResponseBody, TraceOptions};

mod cli;
use cli::display;
use cli::{Cli, Commands};

fn main() {
    init_tracing();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{}", display::error_line(&format!("{:#}", e)));
        std::process::exit(1);
    }
}

/// Initialize tracing with an env-driven filter (default WARN), on stderr so
/// JSON on stdout stays clean.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_level(true)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn run(cli: Cli) -> Result<()> {
    let options = TraceOptions {
        seed: cli.seed.into(),
    };
    debug!(?options, "parsed command line");

    match cli.command {
        Commands::Trace { input, pretty } => run_trace(&input, &options, pretty),
        Commands::Show { input, step } => run_show(&input, &options, step),
        Commands::Calculate { pretty } => run_calculate(&options, pretty),
        Commands::Batch { file, output } => run_batch(&file, output.as_deref(), &options),
        Commands::Verify { input } => run_verify(&input, &options),
    }
}

fn write_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", text).context("Failed to write stdout")?;
    Ok(())
}

fn run_trace(input: &str, options: &TraceOptions, pretty: bool) -> Result<()> {
    let trace = trace_with(input, options)?;
    let json = if pretty {
        serde_json::to_string_pretty(&trace)?
    } else {
        serde_json::to_string(&trace)?
    };
    write_stdout(&json)
}

fn run_show(input: &str, options: &TraceOptions, step: Option<usize>) -> Result<()> {
    let trace = trace_with(input, options)?;
    match step {
        Some(position) => {
            if position == 0 || position > trace.len() {
                bail!(
                    "step {} out of range (trace has {} steps)",
                    position,
                    trace.len()
                );
            }
            display::render_step(
                &trace.steps()[position - 1],
                position,
                trace.len(),
                trace.input(),
            );
        }
        None => display::render_trace(&trace),
    }
    Ok(())
}

/// Read a request body from stdin and answer it. A client error still prints
/// its body, then exits non-zero.
fn run_calculate(options: &TraceOptions, pretty: bool) -> Result<()> {
    let mut raw = String::new();
    io::stdin()
        .read_to_string(&mut raw)
        .context("Failed to read request from stdin")?;

    let reply = handle_json_with(&raw, options);
    let json = if pretty {
        reply.to_json_pretty()?
    } else {
        reply.to_json()?
    };
    write_stdout(&json)?;

    if !reply.is_success() {
        bail!("request rejected with status {}", reply.status);
    }
    Ok(())
}

fn run_batch(file: &str, output: Option<&str>, options: &TraceOptions) -> Result<()> {
    let content =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file))?;
    let requests: Vec<CalculateRequest> = content.lines().map(CalculateRequest::new).collect();

    let replies = batch_replies(&requests, options);
    let failed = replies.iter().filter(|r| !r.is_success()).count();
    info!(count = replies.len(), failed, "batch complete");

    let bodies: Vec<&ResponseBody> = replies.iter().map(|r| &r.body).collect();
    let json = serde_json::to_string_pretty(&bodies)?;

    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write {}", path))?;
            eprintln!(
                "✓ wrote {} responses to {} ({} rejected)",
                replies.len(),
                path,
                failed
            );
            Ok(())
        }
        None => write_stdout(&json),
    }
}

#[cfg(feature = "parallel")]
fn batch_replies(requests: &[CalculateRequest], options: &TraceOptions) -> Vec<Reply> {
    let progress = ProgressBar::new(requests.len() as u64);
    if let Ok(style) =
        ProgressStyle::with_template("{spinner:.cyan} {prefix:<10} [{bar:40.cyan/dim}] {pos}/{len}")
    {
        progress.set_style(style.progress_chars("━━╸"));
    }
    progress.set_prefix("Tracing");

    let replies = sastep::batch::handle_batch_with_progress(requests, options, &progress);
    progress.finish_and_clear();
    replies
}

#[cfg(not(feature = "parallel"))]
fn batch_replies(requests: &[CalculateRequest], options: &TraceOptions) -> Vec<Reply> {
    sastep::handle_batch(requests, options)
}

fn run_verify(input: &str, options: &TraceOptions) -> Result<()> {
    let trace = trace_with(input, options)?;
    let report = verify_trace(input, &trace).context("Trace failed verification")?;
    display::render_report(&report);
    Ok(())
}
