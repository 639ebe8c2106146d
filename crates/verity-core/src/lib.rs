//! # verity-core
//!
//! Foundation types for the Verity fact-checker.
//!
//! This crate provides the shared vocabulary that all other Verity crates
//! depend on:
//!
//! - **Claim ids**: [`ids::ClaimId`], the deterministic content-hash cache key
//! - **Verdicts**: [`verdict::Verdict`] and [`verdict::Mood`] open string
//!   enums, and [`verdict::VerdictRecord`] as the unit of fact-check output
//! - **LLM output parsing**: [`json::extract_json_object`] and
//!   [`json::parse_verdict_response`] for recovering structured verdicts from
//!   chatty model responses

#![deny(unsafe_code)]

pub mod ids;
pub mod json;
pub mod verdict;

pub use ids::ClaimId;
pub use verdict::{Mood, Verdict, VerdictRecord};
