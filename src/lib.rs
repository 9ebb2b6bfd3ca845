//! Step-by-step traces of suffix array construction by prefix doubling.
//!
//! Instead of just returning a suffix array, this crate records every state the
//! rank-doubling algorithm passes through, so each phase can be replayed,
//! rendered, or checked.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │  boundary   │────▶│  doubling    │────▶│   trace     │
//! │ (request ⇄  │     │ (trace,      │     │ (Trace,     │
//! │  reply)     │     │  trace_with) │     │  steps)     │
//! └─────────────┘     └──────────────┘     └─────────────┘
//!        │                   │                    │
//!        ▼                   ▼                    ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                      verify                         │
//! │  (contracts during the loop, verify_trace after)    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Phases
//!
//! | Phase             | `k`   | Carries                              |
//! |-------------------|-------|--------------------------------------|
//! | `initialization`  | 0     | ranks seeded from characters         |
//! | `pairs-generated` | round | ranks, pairs in index order          |
//! | `pairs-sorted`    | round | ranks, pairs, stably sorted pairs    |
//! | `ranks-updated`   | round | new ranks, pairs, sorted pairs       |
//!
//! The round that makes every rank distinct stops after `pairs-sorted`.
//!
//! # Usage
//!
//! ```
//! use sastep::{trace, Phase};
//!
//! let trace = trace("banana").unwrap();
//! assert_eq!(trace.steps()[0].phase(), Phase::Initialization);
//! assert_eq!(trace.suffix_array(), vec![5, 3, 1, 0, 4, 2]);
//!
//! let json = serde_json::to_string(&trace).unwrap();
//! assert!(json.starts_with(r#"{"steps":["#));
//! ```

// Module declarations
pub mod batch;
pub mod boundary;
mod doubling;
mod error;
pub mod testing;
mod trace;
mod types;
pub mod verify;

#[cfg(feature = "wasm")]
mod wasm;

// Re-exports for public API
pub use batch::{handle_batch, trace_batch};
pub use boundary::{handle, handle_json, CalculateRequest, Reply, ResponseBody};
pub use doubling::{trace, trace_with};
pub use error::{BoundaryError, TraceError};
pub use trace::Trace;
pub use types::{
    PairRecord, Phase, Rank, RankPair, SeedRanking, Step, StepRecord, Termination, TraceOptions,
    SENTINEL,
};
pub use verify::{verify_trace, InvariantError, VerificationReport};
