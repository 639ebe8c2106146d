//! Verity server binary — wires together all crates and starts the HTTP API.

#![deny(unsafe_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use verity_collectors::{BraveSearchClient, FeedSource, NewsClient, TrendingFeed, YouTubeClient};
use verity_embeddings::HttpEmbedder;
use verity_llm::{GroqConfig, GroqProvider};
use verity_pipeline::{AnalyzeService, FactCheckAgent};
use verity_server::{ServerConfig, VerityServer};
use verity_settings::VeritySettings;
use verity_vault::{SqliteVectorIndex, Vault, VaultConfig};

/// Verity fact-checking service.
#[derive(Parser, Debug)]
#[command(name = "verity-server", about = "Verity fact-checking service")]
struct Cli {
    /// Host to bind (overrides settings).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides settings).
    #[arg(long)]
    port: Option<u16>,

    /// Path to a settings file (defaults to `~/.verity/settings.json`).
    #[arg(long)]
    settings: Option<PathBuf>,
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    Ok(())
}

/// Read an API key from the environment variable named in settings.
fn read_key(env_name: &str) -> String {
    std::env::var(env_name).unwrap_or_default()
}

fn build_vault(settings: &VeritySettings) -> Result<Option<Arc<Vault>>> {
    if !settings.vault.enabled {
        info!("vault disabled by settings");
        return Ok(None);
    }

    let db_path = settings.vault.resolved_db_path();
    ensure_parent_dir(Path::new(&db_path))?;

    let embedder = HttpEmbedder::from_settings(&settings.embedding)
        .context("failed to construct embedding client")?;
    let index = SqliteVectorIndex::open(&db_path, settings.embedding.dimensions)
        .with_context(|| format!("failed to open vault index at {db_path}"))?;

    info!(db_path, threshold = settings.vault.similarity_threshold, "vault ready");
    Ok(Some(Arc::new(Vault::new(
        Arc::new(embedder),
        Arc::new(index),
        VaultConfig::from_settings(&settings.vault),
    ))))
}

fn build_feed(settings: &VeritySettings) -> Result<TrendingFeed> {
    let mut sources: Vec<Box<dyn FeedSource>> = Vec::new();

    let news_key = read_key(&settings.feed.news_api_key_env);
    if news_key.is_empty() {
        warn!(var = %settings.feed.news_api_key_env, "news API key not set, source skipped");
    } else {
        sources.push(Box::new(NewsClient::from_settings(&settings.feed, news_key)?));
    }

    let youtube_key = read_key(&settings.feed.youtube_api_key_env);
    if youtube_key.is_empty() {
        warn!(var = %settings.feed.youtube_api_key_env, "YouTube API key not set, source skipped");
    } else {
        sources.push(Box::new(YouTubeClient::from_settings(
            &settings.feed,
            youtube_key,
        )?));
    }

    Ok(TrendingFeed::new(sources, settings.feed.query.clone()))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut settings = match &cli.settings {
        Some(path) => verity_settings::load_settings_from_path(path)?,
        None => verity_settings::load_settings()?,
    };
    if let Some(host) = cli.host {
        settings.server.host = host;
    }
    if let Some(port) = cli.port {
        settings.server.port = port;
    }

    let vault = build_vault(&settings)?;

    let groq_key = read_key(&settings.llm.api_key_env);
    if groq_key.is_empty() {
        warn!(var = %settings.llm.api_key_env, "LLM API key not set");
    }
    let llm = GroqProvider::new(GroqConfig::from_settings(&settings.llm, groq_key))
        .context("failed to construct LLM provider")?;

    let search_key = read_key(&settings.search.api_key_env);
    if search_key.is_empty() {
        warn!(var = %settings.search.api_key_env, "search API key not set, evidence gathering will fail");
    }
    let search = BraveSearchClient::from_settings(&settings.search, search_key)
        .context("failed to construct search client")?;

    let agent = FactCheckAgent::new(Arc::new(search), Arc::new(llm));
    let analyze = Arc::new(AnalyzeService::new(agent, vault));
    let feed = Arc::new(build_feed(&settings)?);

    let config = ServerConfig::from_settings(&settings.server, settings.feed.max_items);
    let server = VerityServer::new(config, analyze, feed);
    let app = server.router();

    let listener = tokio::net::TcpListener::bind(server.config().bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", server.config().bind_addr()))?;
    info!(addr = %listener.local_addr()?, "verity server online");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
