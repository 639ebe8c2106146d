//! Fact-checker prompt construction.

/// Build the synthesizer prompt for a claim and its gathered evidence.
///
/// The model is instructed to ground itself in the evidence block only and
/// answer with raw JSON. It will still sometimes wrap the object in prose or
/// fences; `verity_core::json` handles that on the way back.
#[must_use]
pub fn build_fact_check_prompt(claim: &str, evidence: &str) -> String {
    format!(
        r#"You are an expert fact-checker. Analyze this claim based *only* on the search results provided below.

Claim: "{claim}"
Search Results: "{evidence}"

Respond with a raw JSON object (no markdown, no backticks) with this structure:
{{
    "verdict": "Verified", "False", "Misleading", or "Unverified",
    "explanation": "A short, clear reason citing the sources.",
    "mood": "calm" (if true/neutral), "spikey" (if false/alarmist), or "thinking" (if inconclusive)
}}"#
    )
}
