//! Server configuration.

use serde::{Deserialize, Serialize};
use verity_settings::ServerSettings;

/// Configuration for the Verity HTTP server.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind (default `"127.0.0.1"`).
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Trending items auto-verified per `/feed` request.
    pub max_feed_items: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 5000,
            max_feed_items: 2,
        }
    }
}

impl ServerConfig {
    /// Create config from settings.
    #[must_use]
    pub fn from_settings(server: &ServerSettings, max_feed_items: usize) -> Self {
        Self {
            host: server.host.clone(),
            port: server.port,
            max_feed_items,
        }
    }

    /// The socket address string to bind.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
