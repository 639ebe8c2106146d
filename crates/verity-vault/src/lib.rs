//! # verity-vault
//!
//! The semantic verdict cache. A claim's verdict is stored under a
//! deterministic content-hash id together with the claim's embedding;
//! a later claim — even worded differently — reuses that verdict when its
//! embedding lands close enough to a stored one.
//!
//! Two layers:
//!
//! - [`index::VectorIndex`] — the nearest-neighbor store interface
//!   (top-k query + upsert), with [`index::SqliteVectorIndex`] as the
//!   bundled implementation (brute-force cosine over BLOB rows)
//! - [`vault::Vault`] — the cache itself: embeds, queries top-1, applies
//!   the similarity threshold, and distinguishes `Hit` / `Miss` /
//!   `Unavailable` so callers can tell an outage from a cold cache
//!
//! Vault failures are never fatal to the request flow: a degraded vault
//! means the pipeline recomputes, nothing more.

#![deny(unsafe_code)]

pub mod config;
pub mod errors;
pub mod index;
pub mod record;
pub mod vault;

pub use config::VaultConfig;
pub use errors::{Result, VaultError};
pub use index::{IndexEntry, IndexMatch, Metadata, SqliteVectorIndex, VectorIndex};
pub use record::VaultRecord;
pub use vault::{LookupOutcome, Vault};
