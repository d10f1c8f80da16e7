//! CropGen · Daily Crop Tips Game Backend
//!
//! - Axum HTTP API under `/api/game` (start/daily, answer, status, reset, stats, languages)
//! - Daily content bundles generated once per (date, crop, language) via Gemini,
//!   with a built-in multilingual corpus as fallback
//! - Anonymous players identified by the `sessionId` cookie
//!
//! Important env variables (a `.env` file is honored):
//!   PORT             : u16 (default 3001)
//!   GEMINI_API_KEY   : enables Gemini generation if present
//!   GEMINI_BASE_URL  : default "https://generativelanguage.googleapis.com/v1beta"
//!   GEMINI_MODEL     : default "gemini-2.5-flash"
//!   FRONTEND_URL     : CORS origin, default "http://localhost:3000"
//!   APP_ENV          : "production" marks cookies Secure and disables dev routes
//!   GAME_CONFIG_PATH : path to TOML config (prompts, timeouts, retry policy)
//!   LOG_LEVEL        : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT       : "pretty" (default) or "json"

mod telemetry;
mod util;
mod error;
mod domain;
mod config;
mod language;
mod calendar;
mod recovery;
mod gemini;
mod seeds;
mod generator;
mod store;
mod content;
mod progress;
mod state;
mod protocol;
mod logic;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::load_game_config_from_env;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  // Missing .env is normal outside local development.
  let dotenv = dotenvy::dotenv();
  telemetry::init_tracing();
  if let Err(e) = &dotenv {
    if !e.not_found() {
      warn!(target: "cropgen_backend", error = %e, "Failed to load .env");
    }
  }

  let config = load_game_config_from_env();
  let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));

  // Shared state: store, content generation and session tracking.
  let state = Arc::new(AppState::new(config));
  let app = build_router(state);

  let listener = TcpListener::bind(addr).await?;
  info!(target: "cropgen_backend", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  info!(target: "cropgen_backend", "HTTP server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    warn!(target: "cropgen_backend", error = %e, "Failed to listen for shutdown signal");
    std::future::pending::<()>().await;
  }
  info!(target: "cropgen_backend", "Shutdown signal received");
}
