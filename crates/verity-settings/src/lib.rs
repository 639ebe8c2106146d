//! # verity-settings
//!
//! Configuration management with layered sources for the Verity service.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults** — [`VeritySettings::default()`]
//! 2. **User file** — `~/.verity/settings.json` (deep-merged over defaults)
//! 3. **Environment variables** — `VERITY_*` overrides (highest priority)
//!
//! API keys are never stored in the settings file; each outbound client names
//! the environment variable it reads its key from (`apiKeyEnv`).

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::*;
