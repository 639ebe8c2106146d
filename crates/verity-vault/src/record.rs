//! The cached unit of work and its flat metadata form.

use serde_json::Value;
use verity_core::{Mood, Verdict, VerdictRecord};

use crate::index::Metadata;

/// A cached verdict: the claim text it was computed for, the verdict fields,
/// and when it was stored.
///
/// Immutable once stored — the only way to change one is a later store for
/// the exact same claim text, which overwrites it whole.
#[derive(Clone, Debug, PartialEq)]
pub struct VaultRecord {
    /// Original claim text (the content that was embedded).
    pub query: String,
    /// Categorical outcome.
    pub verdict: Verdict,
    /// Free-text reason.
    pub explanation: String,
    /// UI sentiment tag.
    pub mood: Mood,
    /// Seconds since epoch at time of storage.
    pub timestamp: f64,
}

impl VaultRecord {
    /// Build a record for `claim` from a freshly synthesized verdict,
    /// stamped with the current wall-clock time.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(claim: &str, verdict: VerdictRecord) -> Self {
        let timestamp = chrono::Utc::now().timestamp_millis() as f64 / 1000.0;
        Self {
            query: claim.to_string(),
            verdict: verdict.verdict,
            explanation: verdict.explanation,
            mood: verdict.mood,
            timestamp,
        }
    }

    /// Flatten into the string/number map the index accepts.
    #[must_use]
    pub fn to_metadata(&self) -> Metadata {
        let mut meta = Metadata::new();
        let _ = meta.insert("query".into(), Value::String(self.query.clone()));
        let _ = meta.insert(
            "verdict".into(),
            Value::String(self.verdict.as_str().to_string()),
        );
        let _ = meta.insert(
            "explanation".into(),
            Value::String(self.explanation.clone()),
        );
        let _ = meta.insert("mood".into(), Value::String(self.mood.as_str().to_string()));
        let _ = meta.insert(
            "timestamp".into(),
            serde_json::Number::from_f64(self.timestamp)
                .map_or(Value::Null, Value::Number),
        );
        meta
    }

    /// Rebuild from index metadata. Missing or mistyped fields take their
    /// defaults rather than failing the lookup.
    #[must_use]
    pub fn from_metadata(meta: &Metadata) -> Self {
        let get_str =
            |key: &str| -> String { meta.get(key).and_then(Value::as_str).unwrap_or("").into() };
        Self {
            query: get_str("query"),
            verdict: Verdict::from(
                meta.get("verdict")
                    .and_then(Value::as_str)
                    .unwrap_or("Unverified"),
            ),
            explanation: get_str("explanation"),
            mood: Mood::from(meta.get("mood").and_then(Value::as_str).unwrap_or("calm")),
            timestamp: meta
                .get("timestamp")
                .and_then(Value::as_f64)
                .unwrap_or(0.0),
        }
    }

    /// The verdict fields, without the claim/timestamp envelope.
    #[must_use]
    pub fn verdict_record(&self) -> VerdictRecord {
        VerdictRecord {
            verdict: self.verdict.clone(),
            explanation: self.explanation.clone(),
            mood: self.mood.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::cast_precision_loss)]
mod tests {
    use super::*;

    fn sample() -> VaultRecord {
        VaultRecord {
            query: "Is the earth flat?".into(),
            verdict: Verdict::False,
            explanation: "Satellite imagery shows otherwise.".into(),
            mood: Mood::Spikey,
            timestamp: 1_700_000_000.5,
        }
    }

    #[test]
    fn new_stamps_current_time() {
        let record = VaultRecord::new("claim", VerdictRecord::default());
        let now = chrono::Utc::now().timestamp() as f64;
        assert!((record.timestamp - now).abs() < 5.0);
        assert_eq!(record.query, "claim");
    }

    #[test]
    fn metadata_is_flat_scalars() {
        let meta = sample().to_metadata();
        for (key, value) in &meta {
            assert!(
                value.is_string() || value.is_number(),
                "{key} must be a flat scalar, got {value:?}"
            );
        }
        assert_eq!(meta["query"], "Is the earth flat?");
        assert_eq!(meta["verdict"], "False");
        assert_eq!(meta["mood"], "spikey");
    }

    #[test]
    fn metadata_roundtrip() {
        let record = sample();
        let back = VaultRecord::from_metadata(&record.to_metadata());
        assert_eq!(back, record);
    }

    #[test]
    fn roundtrip_preserves_unknown_labels() {
        let record = VaultRecord {
            verdict: Verdict::Other("Satire".into()),
            mood: Mood::Other("wry".into()),
            ..sample()
        };
        let back = VaultRecord::from_metadata(&record.to_metadata());
        assert_eq!(back.verdict, Verdict::Other("Satire".into()));
        assert_eq!(back.mood, Mood::Other("wry".into()));
    }

    #[test]
    fn from_metadata_defaults_for_missing_fields() {
        let record = VaultRecord::from_metadata(&Metadata::new());
        assert_eq!(record.verdict, Verdict::Unverified);
        assert_eq!(record.mood, Mood::Calm);
        assert_eq!(record.query, "");
        assert!(record.timestamp.abs() < f64::EPSILON);
    }

    #[test]
    fn from_metadata_tolerates_mistyped_fields() {
        let mut meta = Metadata::new();
        let _ = meta.insert("verdict".into(), Value::Bool(true));
        let _ = meta.insert("timestamp".into(), Value::String("yesterday".into()));
        let record = VaultRecord::from_metadata(&meta);
        assert_eq!(record.verdict, Verdict::Unverified);
        assert!(record.timestamp.abs() < f64::EPSILON);
    }

    #[test]
    fn verdict_record_projection() {
        let vr = sample().verdict_record();
        assert_eq!(vr.verdict, Verdict::False);
        assert_eq!(vr.mood, Mood::Spikey);
        assert_eq!(vr.explanation, "Satellite imagery shows otherwise.");
    }
}
