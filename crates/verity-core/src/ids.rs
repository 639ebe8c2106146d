//! Claim identifier derivation.
//!
//! A [`ClaimId`] is the stable cache key for a claim: the SHA-256 digest of
//! the exact claim text, hex-encoded. Identical text (byte-for-byte) always
//! derives the same id, so a repeated store for the same claim overwrites
//! rather than duplicates. Differently worded claims get distinct ids even
//! when semantically equivalent — reuse across wordings happens at retrieval
//! time via embedding similarity, not at storage time.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Deterministic identifier for a claim, derived from its text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimId(String);

impl ClaimId {
    /// Derive the id for a claim (SHA-256 of the text, hex-encoded).
    #[must_use]
    pub fn derive(claim: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(claim.as_bytes());
        let hex: String = hasher
            .finalize()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect();
        Self(hex)
    }

    /// Wrap an existing id string (e.g. one read back from the index).
    #[must_use]
    pub fn from_string(s: String) -> Self {
        Self(s)
    }

    /// Return the inner string as a slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume self and return the inner `String`.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ClaimId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
