//! # verity-server
//!
//! Axum HTTP API for the Verity fact-checker.
//!
//! Endpoints:
//!
//! - `POST /analyze` — fact-check one claim (optionally with an image URL)
//! - `GET /feed` — auto-verify the top trending items
//! - `GET /health` — liveness and uptime
//!
//! The browser frontend is served elsewhere, so the router carries a
//! permissive CORS layer.

#![deny(unsafe_code)]

pub mod config;
pub mod health;
pub mod server;

pub use config::ServerConfig;
pub use server::{AppState, VerityServer};
