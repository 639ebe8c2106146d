//! Recovery of structured verdicts from chatty LLM output.
//!
//! Models asked for "raw JSON" still wrap it in markdown fences, preambles,
//! or trailing commentary. [`extract_json_object`] slices out the outermost
//! `{` … `}` block after stripping fences; [`parse_verdict_response`] turns
//! a raw completion into a [`VerdictRecord`], falling back to
//! [`VerdictRecord::fallback`] when nothing parseable remains.

use crate::verdict::VerdictRecord;

/// Strip markdown code fences and slice out the outermost JSON object.
///
/// Returns `None` if the text contains no `{` … `}` span.
#[must_use]
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let clean = raw
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    let start = clean.find('{')?;
    let end = clean.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&clean[start..=end])
}

/// Parse a raw LLM completion into a [`VerdictRecord`].
///
/// Tries the extracted object first, then the cleaned text as a whole.
/// Missing fields take their defaults (`Unverified` / empty / `calm`); a
/// completely unparseable response yields [`VerdictRecord::fallback`].
#[must_use]
pub fn parse_verdict_response(raw: &str) -> VerdictRecord {
    if let Some(block) = extract_json_object(raw) {
        if let Ok(record) = serde_json::from_str::<VerdictRecord>(block) {
            return record;
        }
    }
    serde_json::from_str::<VerdictRecord>(raw.trim()).unwrap_or_else(|_| VerdictRecord::fallback())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::{Mood, Verdict};

    #[test]
    fn extract_plain_object() {
        let raw = r#"{"verdict":"False"}"#;
        assert_eq!(extract_json_object(raw), Some(raw));
    }

    #[test]
    fn extract_strips_markdown_fences() {
        let raw = "```json\n{\"verdict\":\"Verified\"}\n```";
        assert_eq!(extract_json_object(raw), Some("{\"verdict\":\"Verified\"}"));
    }

    #[test]
    fn extract_ignores_surrounding_prose() {
        let raw = "Sure! Here is the analysis:\n{\"verdict\":\"False\"}\nHope that helps.";
        assert_eq!(extract_json_object(raw), Some("{\"verdict\":\"False\"}"));
    }

    #[test]
    fn extract_spans_nested_braces() {
        let raw = "prefix {\"a\":{\"b\":1}} suffix";
        assert_eq!(extract_json_object(raw), Some("{\"a\":{\"b\":1}}"));
    }

    #[test]
    fn extract_none_without_braces() {
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object(""), None);
    }

    #[test]
    fn extract_none_when_braces_reversed() {
        assert_eq!(extract_json_object("} backwards {"), None);
    }

    #[test]
    fn parse_well_formed_response() {
        let raw = r#"{"verdict":"False","explanation":"Contradicted by NASA.","mood":"spikey"}"#;
        let record = parse_verdict_response(raw);
        assert_eq!(record.verdict, Verdict::False);
        assert_eq!(record.explanation, "Contradicted by NASA.");
        assert_eq!(record.mood, Mood::Spikey);
    }

    #[test]
    fn parse_chatty_response() {
        let raw = "Here's what I found:\n```json\n{\"verdict\": \"Verified\", \"explanation\": \"Confirmed by two outlets.\", \"mood\": \"calm\"}\n```\nLet me know if you need more.";
        let record = parse_verdict_response(raw);
        assert_eq!(record.verdict, Verdict::Verified);
        assert_eq!(record.mood, Mood::Calm);
    }

    #[test]
    fn parse_missing_fields_take_defaults() {
        let record = parse_verdict_response(r#"{"explanation":"thin evidence"}"#);
        assert_eq!(record.verdict, Verdict::Unverified);
        assert_eq!(record.mood, Mood::Calm);
        assert_eq!(record.explanation, "thin evidence");
    }

    #[test]
    fn parse_garbage_yields_fallback() {
        let record = parse_verdict_response("I cannot answer that.");
        assert_eq!(record, VerdictRecord::fallback());
    }

    #[test]
    fn parse_truncated_json_yields_fallback() {
        let record = parse_verdict_response(r#"{"verdict": "Fal"#);
        assert_eq!(record, VerdictRecord::fallback());
    }

    #[test]
    fn parse_unknown_labels_survive() {
        let raw = r#"{"verdict":"Satire","explanation":"","mood":"wry"}"#;
        let record = parse_verdict_response(raw);
        assert_eq!(record.verdict, Verdict::Other("Satire".into()));
        assert_eq!(record.mood, Mood::Other("wry".into()));
    }
}
