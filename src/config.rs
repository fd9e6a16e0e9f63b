//! Loading activity content (and drawing surface geometry) from TOML.
//!
//! Schema:
//!
//! ```toml
//! [surface]            # optional, defaults to 600x300 with 80/40/40/80 padding
//! width = 600.0
//!
//! [[activities]]
//! slug = "activity-2"
//! title = "Business Analytics Vocabulary"
//!
//! [[activities.exercises]]
//! kind = "free_text"
//! question = "Define the trend."
//! answer = "upward"
//! ```

use std::time::Duration;

use serde::Deserialize;
use tracing::{info, error, warn};

use crate::domain::Activity;
use crate::drawing::PlotGeometry;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct ContentConfig {
  #[serde(default)]
  pub surface: Option<PlotGeometry>,
  #[serde(default)]
  pub activities: Vec<Activity>,
}

pub fn parse_content_config(s: &str) -> Result<ContentConfig, toml::de::Error> {
  toml::from_str::<ContentConfig>(s)
}

/// Attempt to load `ContentConfig` from CONTENT_PATH. On any parsing/IO error, returns None.
pub fn load_content_config_from_env() -> Option<ContentConfig> {
  let path = std::env::var("CONTENT_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_content_config(&s) {
      Ok(cfg) => {
        info!(target: "graphlex_backend", %path, activities = cfg.activities.len(), "Loaded content config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "graphlex_backend", %path, error = %e, "Failed to parse TOML content");
        None
      }
    },
    Err(e) => {
      error!(target: "graphlex_backend", %path, error = %e, "Failed to read TOML content file");
      None
    }
  }
}

/// Bounds on the server-side session store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionLimits {
  /// Sessions untouched for longer than this are dropped.
  pub ttl: Duration,
  /// Opening a session beyond this evicts the least recently touched one.
  pub max_sessions: usize,
}

impl Default for SessionLimits {
  fn default() -> Self {
    Self { ttl: Duration::from_secs(30 * 60), max_sessions: 10_000 }
  }
}

impl SessionLimits {
  /// SESSION_TTL_SECS and MAX_SESSIONS; unset or invalid values keep the defaults.
  pub fn from_env() -> Self {
    let defaults = Self::default();
    Self {
      ttl: env_number("SESSION_TTL_SECS")
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .unwrap_or(defaults.ttl),
      max_sessions: env_number("MAX_SESSIONS")
        .filter(|n| *n > 0)
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(defaults.max_sessions),
    }
  }
}

fn env_number(key: &str) -> Option<u64> {
  let raw = std::env::var(key).ok()?;
  match raw.trim().parse::<u64>() {
    Ok(n) => Some(n),
    Err(e) => {
      warn!(target: "graphlex_backend", key, %raw, error = %e, "Ignoring non-numeric setting");
      None
    }
  }
}
