//! # verity-embeddings
//!
//! Text embedding for the Verity semantic vault.
//!
//! The [`service::Embedder`] trait maps text into a fixed-dimension vector
//! space; the vault compares those vectors by cosine similarity. Two
//! implementations ship here:
//!
//! - [`remote::HttpEmbedder`] — client for an OpenAI-compatible
//!   `/v1/embeddings` backend (the production path)
//! - [`service::MockEmbedder`] — deterministic hash-based vectors for tests
//!
//! Vectors from different embedding models are not comparable; the vault's
//! similarity threshold is calibrated per model.

#![deny(unsafe_code)]

pub mod errors;
pub mod normalize;
pub mod remote;
pub mod service;

pub use errors::{EmbeddingError, Result};
pub use remote::HttpEmbedder;
pub use service::{Embedder, MockEmbedder};
