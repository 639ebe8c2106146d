//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase", default)]` so the user
//! file may be partial — missing fields get their compiled default during
//! deserialization.

use serde::{Deserialize, Serialize};

/// Root settings type for the Verity service.
///
/// Loaded from `~/.verity/settings.json` with defaults applied for missing
/// fields. Environment variables can override specific values.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VeritySettings {
    /// Application name.
    pub name: String,
    /// HTTP server network settings.
    pub server: ServerSettings,
    /// Semantic verdict cache settings.
    pub vault: VaultSettings,
    /// Embedding backend settings.
    pub embedding: EmbeddingSettings,
    /// LLM synthesizer settings.
    pub llm: LlmSettings,
    /// Web search (researcher evidence) settings.
    pub search: SearchSettings,
    /// Trending feed collector settings.
    pub feed: FeedSettings,
}

impl Default for VeritySettings {
    fn default() -> Self {
        Self {
            name: "verity".into(),
            server: ServerSettings::default(),
            vault: VaultSettings::default(),
            embedding: EmbeddingSettings::default(),
            llm: LlmSettings::default(),
            search: SearchSettings::default(),
            feed: FeedSettings::default(),
        }
    }
}

/// HTTP server settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerSettings {
    /// Host to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 5000,
        }
    }
}

/// Semantic verdict cache settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VaultSettings {
    /// Whether the vault is consulted at all.
    pub enabled: bool,
    /// Path to the `SQLite` index file (may contain `~`).
    pub db_path: String,
    /// Minimum cosine similarity for a cache hit.
    ///
    /// Lower values reuse verdicts more aggressively at the cost of
    /// false-positive hits for unrelated claims; higher values rarely hit.
    pub similarity_threshold: f32,
}

impl Default for VaultSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            db_path: "~/.verity/vault.db".into(),
            similarity_threshold: 0.85,
        }
    }
}

impl VaultSettings {
    /// Resolve the db path, expanding a leading `~/` to the home directory.
    #[must_use]
    pub fn resolved_db_path(&self) -> String {
        if self.db_path.starts_with("~/") {
            if let Ok(home) = std::env::var("HOME") {
                return format!("{}{}", home, &self.db_path[1..]);
            }
        }
        self.db_path.clone()
    }
}

/// Embedding backend settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmbeddingSettings {
    /// Base URL of the OpenAI-compatible embeddings endpoint.
    pub base_url: String,
    /// Model identifier sent with each request.
    pub model: String,
    /// Output vector dimensions for the configured model.
    pub dimensions: usize,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8089".into(),
            model: "all-MiniLM-L6-v2".into(),
            dimensions: 384,
            timeout_ms: 10_000,
        }
    }
}

/// LLM synthesizer settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LlmSettings {
    /// Base URL of the OpenAI-compatible chat completions API.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Environment variable holding the API key.
    pub api_key_env: String,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com/openai/v1".into(),
            model: "llama3-8b-8192".into(),
            temperature: 0.2,
            timeout_ms: 30_000,
            api_key_env: "GROQ_API_KEY".into(),
        }
    }
}

/// Web search settings for the researcher.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchSettings {
    /// Base URL of the Brave Search API.
    pub base_url: String,
    /// Maximum results gathered as evidence per claim.
    pub max_results: usize,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Environment variable holding the API key.
    pub api_key_env: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.search.brave.com".into(),
            max_results: 5,
            timeout_ms: 15_000,
            api_key_env: "BRAVE_API_KEY".into(),
        }
    }
}

/// Trending feed collector settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeedSettings {
    /// Query used when scanning for trending headlines.
    pub query: String,
    /// Results requested per source.
    pub page_size: usize,
    /// Items auto-verified per `/feed` request.
    pub max_items: usize,
    /// Base URL of the `NewsAPI` service.
    pub news_base_url: String,
    /// Environment variable holding the `NewsAPI` key.
    pub news_api_key_env: String,
    /// Base URL of the `YouTube` Data API.
    pub youtube_base_url: String,
    /// Environment variable holding the `YouTube` key.
    pub youtube_api_key_env: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            query: "fake news".into(),
            page_size: 5,
            max_items: 2,
            news_base_url: "https://newsapi.org".into(),
            news_api_key_env: "NEWS_API_KEY".into(),
            youtube_base_url: "https://www.googleapis.com".into(),
            youtube_api_key_env: "YOUTUBE_API_KEY".into(),
            timeout_ms: 15_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_wire_format() {
        let settings = VeritySettings::default();
        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(value["server"]["host"], "127.0.0.1");
        assert_eq!(value["vault"]["dbPath"], "~/.verity/vault.db");
        assert_eq!(value["embedding"]["baseUrl"], "http://127.0.0.1:8089");
        assert_eq!(value["llm"]["apiKeyEnv"], "GROQ_API_KEY");
        assert_eq!(value["feed"]["newsBaseUrl"], "https://newsapi.org");
    }

    #[test]
    fn partial_json_takes_defaults() {
        let json = r#"{"vault": {"similarityThreshold": 0.8}}"#;
        let settings: VeritySettings = serde_json::from_str(json).unwrap();
        assert!((settings.vault.similarity_threshold - 0.8).abs() < f32::EPSILON);
        assert!(settings.vault.enabled);
        assert_eq!(settings.server.port, 5000);
    }

    #[test]
    fn serde_roundtrip() {
        let settings = VeritySettings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let back: VeritySettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.llm.model, settings.llm.model);
        assert_eq!(back.embedding.dimensions, settings.embedding.dimensions);
    }

    #[test]
    fn resolved_db_path_expands_tilde() {
        let vault = VaultSettings::default();
        let resolved = vault.resolved_db_path();
        assert!(!resolved.starts_with('~'), "tilde should expand: {resolved}");
        assert!(resolved.ends_with("/.verity/vault.db"));
    }

    #[test]
    fn resolved_db_path_absolute_passthrough() {
        let vault = VaultSettings {
            db_path: "/var/lib/verity/vault.db".into(),
            ..VaultSettings::default()
        };
        assert_eq!(vault.resolved_db_path(), "/var/lib/verity/vault.db");
    }

    #[test]
    fn feed_defaults() {
        let feed = FeedSettings::default();
        assert_eq!(feed.query, "fake news");
        assert_eq!(feed.page_size, 5);
        assert_eq!(feed.max_items, 2);
    }
}
