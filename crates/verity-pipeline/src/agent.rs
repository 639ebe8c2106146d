//! The researcher → synthesizer agent.

use std::sync::Arc;

use tracing::{debug, warn};

use verity_collectors::{render_evidence, SearchProvider};
use verity_core::json::parse_verdict_response;
use verity_core::VerdictRecord;
use verity_llm::ChatProvider;

use crate::errors::Result;
use crate::prompt::build_fact_check_prompt;

/// Linear two-node pipeline: search the claim, then ask the model for a
/// verdict grounded in what came back.
pub struct FactCheckAgent {
    search: Arc<dyn SearchProvider>,
    llm: Arc<dyn ChatProvider>,
}

impl FactCheckAgent {
    /// Create an agent over the given search and LLM providers.
    pub fn new(search: Arc<dyn SearchProvider>, llm: Arc<dyn ChatProvider>) -> Self {
        Self { search, llm }
    }

    /// Run the full pipeline for one claim.
    ///
    /// A failed search is not fatal — the synthesizer is told the search
    /// failed and judges with what it has (typically `Unverified`). A failed
    /// LLM call is fatal to the run.
    pub async fn run(&self, claim: &str) -> Result<VerdictRecord> {
        debug!(claim_len = claim.len(), "researching claim");
        let evidence = match self.search.search(claim).await {
            Ok(results) => render_evidence(&results),
            Err(e) => {
                warn!(error = %e, "search failed, synthesizing without evidence");
                format!("Search failed: {e}")
            }
        };

        let prompt = build_fact_check_prompt(claim, &evidence);
        let raw = self.llm.complete(&prompt).await?;
        Ok(parse_verdict_response(&raw))
    }
}
