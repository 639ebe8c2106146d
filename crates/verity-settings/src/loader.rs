//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`VeritySettings::default()`]
//! 2. If `~/.verity/settings.json` exists, deep-merge user values over defaults
//! 3. Apply environment variable overrides (highest priority)
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::Result;
use crate::types::VeritySettings;

/// Resolve the path to the settings file (`~/.verity/settings.json`).
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".verity").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<VeritySettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// If the file does not exist, returns defaults. If the file contains
/// invalid JSON, returns an error.
pub fn load_settings_from_path(path: &Path) -> Result<VeritySettings> {
    let defaults = serde_json::to_value(VeritySettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    let mut settings: VeritySettings = serde_json::from_value(merged)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Recursive deep merge of two JSON values.
///
/// - Objects are merged recursively (source overrides target per-key)
/// - Arrays and primitives are replaced entirely by source
/// - Null values in source are skipped (preserving target)
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply environment variable overrides to loaded settings.
///
/// Each env var has strict parsing rules:
/// - Integers and floats must be valid and within the specified range
/// - Booleans accept: `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`
/// - Invalid values are silently ignored (fall back to file/default)
pub fn apply_env_overrides(settings: &mut VeritySettings) {
    // ── Server ──────────────────────────────────────────────────────
    if let Some(v) = read_env_string("VERITY_HOST") {
        settings.server.host = v;
    }
    if let Some(v) = read_env_u16("VERITY_PORT", 1, 65535) {
        settings.server.port = v;
    }

    // ── Vault ───────────────────────────────────────────────────────
    if let Some(v) = read_env_bool("VERITY_VAULT_ENABLED") {
        settings.vault.enabled = v;
    }
    if let Some(v) = read_env_string("VERITY_VAULT_DB") {
        settings.vault.db_path = v;
    }
    if let Some(v) = read_env_f32("VERITY_VAULT_THRESHOLD", 0.0, 1.0) {
        settings.vault.similarity_threshold = v;
    }

    // ── Embedding backend ───────────────────────────────────────────
    if let Some(v) = read_env_string("VERITY_EMBEDDING_URL") {
        settings.embedding.base_url = v;
    }
    if let Some(v) = read_env_string("VERITY_EMBEDDING_MODEL") {
        settings.embedding.model = v;
    }
    if let Some(v) = read_env_usize("VERITY_EMBEDDING_DIMENSIONS", 1, 16_384) {
        settings.embedding.dimensions = v;
    }

    // ── LLM ─────────────────────────────────────────────────────────
    if let Some(v) = read_env_string("VERITY_LLM_URL") {
        settings.llm.base_url = v;
    }
    if let Some(v) = read_env_string("VERITY_LLM_MODEL") {
        settings.llm.model = v;
    }

    // ── Collectors ──────────────────────────────────────────────────
    if let Some(v) = read_env_string("VERITY_SEARCH_URL") {
        settings.search.base_url = v;
    }
    if let Some(v) = read_env_string("VERITY_FEED_QUERY") {
        settings.feed.query = v;
    }
    if let Some(v) = read_env_usize("VERITY_FEED_MAX_ITEMS", 1, 50) {
        settings.feed.max_items = v;
    }
}

// ── Pure parsing functions (testable without env vars) ──────────────────────

/// Parse a string as a boolean.
///
/// Accepts (case-insensitive): `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`.
pub fn parse_bool(val: &str) -> Option<bool> {
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a string as a `u16` within a range.
pub fn parse_u16_range(val: &str, min: u16, max: u16) -> Option<u16> {
    let n: u16 = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

/// Parse a string as a `usize` within a range.
pub fn parse_usize_range(val: &str, min: usize, max: usize) -> Option<usize> {
    let n: usize = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

/// Parse a string as an `f32` within an inclusive range. Rejects NaN.
pub fn parse_f32_range(val: &str, min: f32, max: f32) -> Option<f32> {
    let n: f32 = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

// ── Env var readers (thin wrappers) ─────────────────────────────────────────

fn read_env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn read_env_bool(name: &str) -> Option<bool> {
    let val = std::env::var(name).ok()?;
    let result = parse_bool(&val);
    if result.is_none() {
        tracing::warn!(key = name, value = %val, "invalid boolean env var, ignoring");
    }
    result
}

fn read_env_u16(name: &str, min: u16, max: u16) -> Option<u16> {
    let val = std::env::var(name).ok()?;
    let result = parse_u16_range(&val, min, max);
    if result.is_none() {
        tracing::warn!(key = name, value = %val, "invalid u16 env var, ignoring");
    }
    result
}

fn read_env_usize(name: &str, min: usize, max: usize) -> Option<usize> {
    let val = std::env::var(name).ok()?;
    let result = parse_usize_range(&val, min, max);
    if result.is_none() {
        tracing::warn!(key = name, value = %val, "invalid usize env var, ignoring");
    }
    result
}

fn read_env_f32(name: &str, min: f32, max: f32) -> Option<f32> {
    let val = std::env::var(name).ok()?;
    let result = parse_f32_range(&val, min, max);
    if result.is_none() {
        tracing::warn!(key = name, value = %val, "invalid f32 env var, ignoring");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // ── deep_merge ──────────────────────────────────────────────────

    #[test]
    fn merge_simple_override() {
        let target = serde_json::json!({"a": 1, "b": 2});
        let source = serde_json::json!({"a": 10});
        let merged = deep_merge(target, source);
        assert_eq!(merged["a"], 10);
        assert_eq!(merged["b"], 2);
    }

    #[test]
    fn merge_nested_override() {
        let target = serde_json::json!({
            "server": {"port": 5000, "host": "localhost"}
        });
        let source = serde_json::json!({
            "server": {"port": 9090}
        });
        let merged = deep_merge(target, source);
        assert_eq!(merged["server"]["port"], 9090);
        assert_eq!(merged["server"]["host"], "localhost");
    }

    #[test]
    fn merge_array_replace() {
        let target = serde_json::json!({"items": [1, 2, 3]});
        let source = serde_json::json!({"items": [4, 5]});
        let merged = deep_merge(target, source);
        assert_eq!(merged["items"], serde_json::json!([4, 5]));
    }

    #[test]
    fn merge_null_preserves_target() {
        let target = serde_json::json!({"a": 1, "b": 2});
        let source = serde_json::json!({"a": null});
        let merged = deep_merge(target, source);
        assert_eq!(merged["a"], 1);
    }

    #[test]
    fn merge_new_keys_added() {
        let target = serde_json::json!({"a": 1});
        let source = serde_json::json!({"b": 2});
        let merged = deep_merge(target, source);
        assert_eq!(merged["a"], 1);
        assert_eq!(merged["b"], 2);
    }

    // ── load_settings_from_path ─────────────────────────────────────

    #[test]
    fn missing_file_returns_defaults() {
        let settings =
            load_settings_from_path(Path::new("/nonexistent/verity-settings.json")).unwrap();
        assert_eq!(settings.server.port, 5000);
    }

    #[test]
    fn partial_file_merged_over_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"vault": {{"similarityThreshold": 0.8}}}}"#).unwrap();
        let settings = load_settings_from_path(file.path()).unwrap();
        assert!((settings.vault.similarity_threshold - 0.8).abs() < f32::EPSILON);
        assert_eq!(settings.llm.model, "llama3-8b-8192");
    }

    #[test]
    fn invalid_json_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{{not json").unwrap();
        assert!(load_settings_from_path(file.path()).is_err());
    }

    // ── parse helpers ───────────────────────────────────────────────

    #[test]
    fn parse_bool_accepts_variants() {
        for v in ["true", "1", "yes", "on", "TRUE", "Yes"] {
            assert_eq!(parse_bool(v), Some(true), "{v}");
        }
        for v in ["false", "0", "no", "off", "OFF"] {
            assert_eq!(parse_bool(v), Some(false), "{v}");
        }
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(parse_bool(""), None);
    }

    #[test]
    fn parse_u16_range_bounds() {
        assert_eq!(parse_u16_range("5000", 1, 65535), Some(5000));
        assert_eq!(parse_u16_range("0", 1, 65535), None);
        assert_eq!(parse_u16_range("notanum", 1, 65535), None);
    }

    #[test]
    fn parse_usize_range_bounds() {
        assert_eq!(parse_usize_range("5", 1, 50), Some(5));
        assert_eq!(parse_usize_range("51", 1, 50), None);
    }

    #[test]
    fn parse_f32_range_bounds() {
        assert_eq!(parse_f32_range("0.85", 0.0, 1.0), Some(0.85));
        assert_eq!(parse_f32_range("1.5", 0.0, 1.0), None);
        assert_eq!(parse_f32_range("-0.1", 0.0, 1.0), None);
        assert_eq!(parse_f32_range("NaN", 0.0, 1.0), None);
        assert_eq!(parse_f32_range("", 0.0, 1.0), None);
    }

    #[test]
    fn settings_path_under_home() {
        let path = settings_path();
        assert!(path.ends_with(".verity/settings.json"));
    }
}
