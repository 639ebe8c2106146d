//! # verity-pipeline
//!
//! The fact-check pipeline: research a claim against live web evidence,
//! synthesize a verdict with an LLM, and serve repeats from the semantic
//! vault.
//!
//! Flow for a text-only claim:
//!
//! 1. [`service::AnalyzeService`] consults the vault; a hit short-circuits
//!    everything below
//! 2. [`agent::FactCheckAgent`] searches the web and prompts the model
//! 3. the raw completion is parsed into a verdict (with a fallback for
//!    unparseable output)
//! 4. the fresh verdict is stored back into the vault (log-and-skip on
//!    failure)
//!
//! Claims with an image URL always bypass the vault in both directions.

#![deny(unsafe_code)]

pub mod agent;
pub mod errors;
pub mod prompt;
pub mod service;

pub use agent::FactCheckAgent;
pub use errors::{PipelineError, Result};
pub use service::{AnalyzeOutcome, AnalyzeService, FeedVerdict};
