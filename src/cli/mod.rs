// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the sastep command-line interface.
//!
//! Five subcommands: `trace` prints the JSON trace, `show` renders it as
//! terminal tables, `calculate` answers a JSON request on stdin the way a
//! server endpoint would, `batch` traces one input per line of a file, and
//! `verify` replays a trace against every invariant.

pub mod display;

use clap::{Parser, Subcommand, ValueEnum};
use sastep::SeedRanking;

#[derive(Parser)]
#[command(
    name = "sastep",
    about = "Step-by-step prefix-doubling suffix array traces",
    version
)]
pub struct Cli {
    /// How round-0 ranks are derived from characters
    #[arg(long, value_enum, global = true, default_value = "ordinal")]
    pub seed: SeedArg,

    #[command(subcommand)]
    pub command: Commands,
}

/// Seed ranking choice on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SeedArg {
    /// Raw code point of each character
    Ordinal,
    /// Distinct characters numbered 0, 1, 2, ...
    Dense,
}

impl From<SeedArg> for SeedRanking {
    fn from(arg: SeedArg) -> Self {
        match arg {
            SeedArg::Ordinal => SeedRanking::Ordinal,
            SeedArg::Dense => SeedRanking::Dense,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the trace of INPUT as JSON ({"steps": [...]})
    Trace {
        /// String to build the suffix array for
        input: String,

        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Render the trace of INPUT as terminal tables
    Show {
        /// String to build the suffix array for
        input: String,

        /// Render only this step (1-based)
        #[arg(short, long)]
        step: Option<usize>,
    },

    /// Answer a {"input": "..."} request read from stdin
    Calculate {
        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Trace every line of FILE and emit a JSON array of responses
    Batch {
        /// File with one input string per line
        file: String,

        /// Write the JSON array here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Trace INPUT and re-check every invariant of the result
    Verify {
        /// String to build the suffix array for
        input: String,
    },
}
