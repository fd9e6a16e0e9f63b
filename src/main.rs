//! Graphlex · Line Graph Vocabulary Trainer Backend
//!
//! - Axum HTTP + WebSocket API
//! - Built-in activity content, optionally extended from a TOML file
//! - Static SPA fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT          : u16 (default 3000)
//!   CONTENT_PATH  : path to TOML content (activities + optional drawing surface)
//!   SESSION_TTL_SECS : idle seconds before a session is dropped (default 1800)
//!   MAX_SESSIONS  : cap on live sessions (default 10000)
//!   LOG_LEVEL     : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT    : "pretty" (default) or "json"

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use graphlex_backend::routes::build_router;
use graphlex_backend::state::{spawn_session_sweeper, AppState};
use graphlex_backend::telemetry;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Catalog from seeds (+ CONTENT_PATH), empty session store.
  let state = Arc::new(AppState::new());

  let sweeper = spawn_session_sweeper(state.clone());

  let app = build_router(state.clone());

  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "graphlex_backend", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  sweeper.abort();
  info!(target: "graphlex_backend", sessions = state.session_count().await, "Server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "graphlex_backend", error = %e, "Failed to listen for Ctrl-C");
  }
  info!(target: "graphlex_backend", "Shutdown requested");
}
