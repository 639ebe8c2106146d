//! Vault configuration.

use serde::{Deserialize, Serialize};
use verity_settings::VaultSettings;

/// Default minimum similarity for a cache hit.
const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.85;

/// Tunables for the semantic cache.
///
/// The threshold is the precision/recall dial: lower values reuse verdicts
/// more aggressively and risk returning a stale verdict for an unrelated
/// claim; higher values rarely hit. It is calibrated for one embedding
/// model — swapping models (even at the same dimension count) invalidates
/// the calibration and warrants re-tuning.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VaultConfig {
    /// Minimum cosine similarity for a lookup to count as a hit.
    pub similarity_threshold: f32,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

impl VaultConfig {
    /// Create config from settings.
    #[must_use]
    pub fn from_settings(s: &VaultSettings) -> Self {
        Self {
            similarity_threshold: s.similarity_threshold,
        }
    }
}
