//! The semantic cache: threshold-gated lookup and upsert-keyed store.

use std::sync::Arc;

use tracing::{debug, warn};

use verity_core::{ClaimId, VerdictRecord};
use verity_embeddings::Embedder;

use crate::config::VaultConfig;
use crate::errors::Result;
use crate::index::{IndexEntry, VectorIndex};
use crate::record::VaultRecord;

/// Outcome of a cache lookup.
///
/// `Unavailable` is deliberately distinct from `Miss`: a miss means the
/// cache answered and had nothing close enough; unavailable means the
/// embedder or index could not answer at all. Callers degrade the same way
/// (recompute) but can log and alert differently.
#[derive(Clone, Debug)]
pub enum LookupOutcome {
    /// A stored verdict cleared the similarity threshold.
    Hit(VaultRecord),
    /// The cache answered; nothing was close enough.
    Miss,
    /// The cache could not answer (embedder or index failure).
    Unavailable(String),
}

impl LookupOutcome {
    /// Whether this outcome carries a cached record.
    #[must_use]
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit(_))
    }

    /// The cached record, if this is a hit.
    #[must_use]
    pub fn into_record(self) -> Option<VaultRecord> {
        match self {
            Self::Hit(record) => Some(record),
            Self::Miss | Self::Unavailable(_) => None,
        }
    }
}

/// The semantic verdict cache.
///
/// Holds no mutable state of its own — just handles to the embedder and the
/// index. Concurrent lookups need no coordination; concurrent stores to the
/// same claim race benignly (both writes carry a verdict for that claim,
/// last upsert wins).
pub struct Vault {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
    config: VaultConfig,
}

impl Vault {
    /// Create a vault over the given embedder and index.
    pub fn new(embedder: Arc<dyn Embedder>, index: Arc<dyn VectorIndex>, config: VaultConfig) -> Self {
        Self {
            embedder,
            index,
            config,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    /// Look up a cached verdict for a claim.
    ///
    /// Embeds the claim, asks the index for the single nearest stored vector,
    /// and accepts it only when the similarity clears the configured
    /// threshold. Read-only and idempotent.
    pub async fn lookup(&self, claim: &str) -> LookupOutcome {
        let vector = match self.embedder.embed_single(claim).await {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "vault lookup degraded: embedding failed");
                return LookupOutcome::Unavailable(e.to_string());
            }
        };

        let matches = match self.index.query(&vector, 1, true) {
            Ok(m) => m,
            Err(e) => {
                warn!(error = %e, "vault lookup degraded: index query failed");
                return LookupOutcome::Unavailable(e.to_string());
            }
        };

        let Some(top) = matches.into_iter().next() else {
            return LookupOutcome::Miss;
        };

        if top.score < self.config.similarity_threshold {
            debug!(score = top.score, threshold = self.config.similarity_threshold, "vault miss");
            return LookupOutcome::Miss;
        }

        let Some(metadata) = top.metadata else {
            warn!(id = %top.id, "vault entry missing metadata, treating as miss");
            return LookupOutcome::Miss;
        };

        debug!(id = %top.id, score = top.score, "vault hit");
        LookupOutcome::Hit(VaultRecord::from_metadata(&metadata))
    }

    /// Store a verdict for a claim.
    ///
    /// The id is derived from the claim text, so storing the exact same
    /// claim again replaces the old entry; a differently worded claim gets
    /// its own entry even when semantically equivalent.
    pub async fn store(&self, claim: &str, record: &VerdictRecord) -> Result<()> {
        let vector = self.embedder.embed_single(claim).await?;
        let id = ClaimId::derive(claim);
        let vault_record = VaultRecord::new(claim, record.clone());

        self.index.upsert(vec![IndexEntry {
            id: id.into_inner(),
            vector,
            metadata: vault_record.to_metadata(),
        }])?;
        debug!(claim_len = claim.len(), "stored verdict in vault");
        Ok(())
    }
}
