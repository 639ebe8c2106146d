//! Vault-aware analysis service — the pipeline caller the vault contracts
//! with.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use verity_core::{Mood, Verdict, VerdictRecord};
use verity_vault::{LookupOutcome, Vault};

use crate::agent::FactCheckAgent;
use crate::errors::Result;

/// Result of analyzing one claim.
#[derive(Clone, Debug)]
pub struct AnalyzeOutcome {
    /// The verdict, cached or fresh.
    pub record: VerdictRecord,
    /// Whether the vault served it.
    pub cached: bool,
}

/// One auto-verified trending item.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedVerdict {
    /// The claim text that was verified.
    pub claim: String,
    /// Categorical outcome.
    pub verdict: Verdict,
    /// UI sentiment tag.
    pub mood: Mood,
}

/// Orchestrates vault consultation around the fact-check pipeline.
///
/// Cache rules:
/// - text-only claims check the vault before the pipeline and store after it
/// - image-bearing claims always bypass the vault, both directions
/// - vault trouble (unavailable lookup, failed store) is logged and absorbed;
///   it never fails the request
pub struct AnalyzeService {
    agent: FactCheckAgent,
    vault: Option<Arc<Vault>>,
}

impl AnalyzeService {
    /// Create a service. Pass `None` to run without a cache.
    pub fn new(agent: FactCheckAgent, vault: Option<Arc<Vault>>) -> Self {
        Self { agent, vault }
    }

    /// Analyze a claim, optionally accompanied by an image URL.
    pub async fn analyze(&self, claim: &str, image_url: Option<&str>) -> Result<AnalyzeOutcome> {
        let vault = match image_url {
            // Image-bearing claims bypass the vault entirely: the cached
            // verdict keyed on text alone could contradict the image.
            Some(_) => None,
            None => self.vault.as_ref(),
        };

        if let Some(vault) = vault {
            match vault.lookup(claim).await {
                LookupOutcome::Hit(record) => {
                    info!("verdict served from vault");
                    return Ok(AnalyzeOutcome {
                        record: record.verdict_record(),
                        cached: true,
                    });
                }
                LookupOutcome::Miss => {}
                LookupOutcome::Unavailable(reason) => {
                    warn!(reason, "vault unavailable, recomputing");
                }
            }
        }

        let record = self.agent.run(claim).await?;

        if let Some(vault) = vault {
            if let Err(e) = vault.store(claim, &record).await {
                warn!(error = %e, "failed to cache verdict");
            }
        }

        Ok(AnalyzeOutcome {
            record,
            cached: false,
        })
    }

    /// Auto-verify a batch of trending items.
    ///
    /// Feed items go straight through the pipeline — no vault consultation —
    /// and a per-item pipeline failure degrades that item to `Unverified`
    /// rather than failing the batch.
    pub async fn verify_trending(&self, items: &[String]) -> Vec<FeedVerdict> {
        let mut verdicts = Vec::with_capacity(items.len());
        for item in items {
            let record = match self.agent.run(item).await {
                Ok(record) => record,
                Err(e) => {
                    warn!(error = %e, "feed item verification failed");
                    VerdictRecord::default()
                }
            };
            verdicts.push(FeedVerdict {
                claim: item.clone(),
                verdict: record.verdict,
                mood: record.mood,
            });
        }
        verdicts
    }
}
