//! Verdict and mood classifications.
//!
//! Both [`Verdict`] and [`Mood`] are open string enums: the well-known values
//! get variants, but anything else the model emits is carried verbatim in
//! `Other` rather than rejected. New labels appearing upstream must survive a
//! store/lookup round trip unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical outcome of fact-checking a claim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Verdict {
    /// The claim is supported by the gathered evidence.
    Verified,
    /// The claim is contradicted by the gathered evidence.
    False,
    /// The claim mixes accurate and inaccurate elements.
    Misleading,
    /// The evidence was insufficient either way.
    Unverified,
    /// Any other label the model produced, stored verbatim.
    Other(String),
}

impl Verdict {
    /// The canonical string form of this verdict.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Verified => "Verified",
            Self::False => "False",
            Self::Misleading => "Misleading",
            Self::Unverified => "Unverified",
            Self::Other(s) => s,
        }
    }
}

impl Default for Verdict {
    fn default() -> Self {
        Self::Unverified
    }
}

impl From<String> for Verdict {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Verified" => Self::Verified,
            "False" => Self::False,
            "Misleading" => Self::Misleading,
            "Unverified" => Self::Unverified,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for Verdict {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<Verdict> for String {
    fn from(v: Verdict) -> Self {
        v.as_str().to_string()
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse sentiment tag attached to a verdict for the UI — not a factual
/// signal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Mood {
    /// Neutral or reassuring.
    Calm,
    /// Alarmist or debunking.
    Spikey,
    /// Inconclusive, still weighing evidence.
    Thinking,
    /// Any other tag the model produced, stored verbatim.
    Other(String),
}

impl Mood {
    /// The canonical string form of this mood.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Calm => "calm",
            Self::Spikey => "spikey",
            Self::Thinking => "thinking",
            Self::Other(s) => s,
        }
    }
}

impl Default for Mood {
    fn default() -> Self {
        Self::Calm
    }
}

impl From<String> for Mood {
    fn from(s: String) -> Self {
        match s.as_str() {
            "calm" => Self::Calm,
            "spikey" => Self::Spikey,
            "thinking" => Self::Thinking,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for Mood {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<Mood> for String {
    fn from(m: Mood) -> Self {
        m.as_str().to_string()
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The unit of fact-check output: what the synthesizer produces and what the
/// vault caches.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VerdictRecord {
    /// Categorical outcome.
    pub verdict: Verdict,
    /// Short free-text reason citing the evidence.
    pub explanation: String,
    /// UI sentiment tag.
    pub mood: Mood,
}

impl VerdictRecord {
    /// The record returned when the model's output cannot be parsed.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            verdict: Verdict::Unverified,
            explanation: "The model produced an analysis but its format was unclear.".into(),
            mood: Mood::Spikey,
        }
    }
}
