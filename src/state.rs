//! Application state: activity catalog, exercise sessions and drawing geometry.
//!
//! This module owns:
//!   - the activity catalog (slug -> activity), built from seeds and the TOML content file
//!   - the session store (session id -> per-exercise interaction state)
//!   - the drawing surface geometry shared by every drawing session
//!
//! Each session is owned by its id alone; no state crosses exercise boundaries.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::{sync::RwLock, task::JoinHandle};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::config::{load_content_config_from_env, ContentConfig, SessionLimits};
use crate::domain::{Activity, ActivitySummary, Exercise};
use crate::drawing::PlotGeometry;
use crate::error::AppError;
use crate::seeds::seed_activities;
use crate::session::ExerciseSession;

/// A live session and the last time a client used it.
pub struct SessionEntry {
    pub session: ExerciseSession,
    pub touched: Instant,
}

#[derive(Clone)]
pub struct AppState {
    pub activities: Arc<RwLock<BTreeMap<String, Activity>>>,
    pub sessions: Arc<RwLock<HashMap<String, SessionEntry>>>,
    pub geometry: PlotGeometry,
    pub limits: SessionLimits,
}

impl AppState {
    /// Build state from env: load the content file (if any) over the built-in seeds.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let limits = SessionLimits::from_env();
        info!(target: "graphlex_backend", ttl_secs = limits.ttl.as_secs(), max_sessions = limits.max_sessions, "Session limits");
        Self::from_content(load_content_config_from_env()).with_session_limits(limits)
    }

    /// Build state from an already-parsed content config.
    pub fn from_content(cfg: Option<ContentConfig>) -> Self {
        let mut catalog = BTreeMap::<String, Activity>::new();
        for a in seed_activities() {
            catalog.insert(a.slug.clone(), a);
        }

        let mut geometry = PlotGeometry::default();
        if let Some(cfg) = cfg {
            match cfg.surface {
                Some(g) if g.is_valid() => geometry = g,
                Some(g) => {
                    error!(target: "graphlex_backend", ?g, "Ignoring drawing surface with no usable plot area");
                }
                None => {}
            }

            // Content-file activities replace seeds with the same slug.
            for a in cfg.activities {
                if a.slug.trim().is_empty() {
                    error!(target: "exercise", title = %a.title, "Skipping content activity: missing slug.");
                    continue;
                }
                if a.exercises.is_empty() {
                    warn!(target: "exercise", slug = %a.slug, "Content activity has no exercises");
                }
                for (index, ex) in a.exercises.iter().enumerate() {
                    if matches!(ex, Exercise::FreeText { answer, .. } if answer.is_empty()) {
                        warn!(target: "exercise", slug = %a.slug, index, "Question has an empty answer key and can never be submitted");
                    }
                }
                if catalog.insert(a.slug.clone(), a).is_some() {
                    info!(target: "exercise", "Content activity replaced a built-in one");
                }
            }
        }

        for a in catalog.values() {
            let interactive = a.exercises.iter().filter(|e| e.is_interactive()).count();
            info!(target: "exercise", slug = %a.slug, exercises = a.exercises.len(), interactive, "Startup activity inventory");
        }

        Self {
            activities: Arc::new(RwLock::new(catalog)),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            geometry,
            limits: SessionLimits::default(),
        }
    }

    pub fn with_session_limits(mut self, limits: SessionLimits) -> Self {
        self.limits = limits;
        self
    }

    pub async fn summaries(&self) -> Vec<ActivitySummary> {
        self.activities
            .read()
            .await
            .values()
            .map(ActivitySummary::from)
            .collect()
    }

    pub async fn slugs(&self) -> Vec<String> {
        self.activities.read().await.keys().cloned().collect()
    }

    /// Activity by slug; unknown slugs yield `ActivityNotFound` listing the known ones.
    #[instrument(level = "debug", skip_all, fields(%slug))]
    pub async fn get_activity(&self, slug: &str) -> Result<Activity, AppError> {
        let found = { self.activities.read().await.get(slug).cloned() };
        match found {
            Some(a) => Ok(a),
            None => Err(AppError::ActivityNotFound {
                slug: slug.to_string(),
                available: self.slugs().await,
            }),
        }
    }

    pub async fn get_exercise(&self, slug: &str, index: usize) -> Result<Exercise, AppError> {
        let activity = self.get_activity(slug).await?;
        activity
            .exercises
            .get(index)
            .cloned()
            .ok_or_else(|| AppError::ExerciseNotFound {
                slug: slug.to_string(),
                index,
            })
    }

    /// Create a session for an interactive exercise; returns its id.
    /// At capacity, the least recently touched session makes room.
    #[instrument(level = "debug", skip_all, fields(kind = session.kind_name()))]
    pub async fn insert_session(&self, session: ExerciseSession) -> String {
        let id = Uuid::new_v4().to_string();
        let mut sessions = self.sessions.write().await;
        while sessions.len() >= self.limits.max_sessions {
            let Some(oldest) = sessions
                .iter()
                .min_by_key(|(_, e)| e.touched)
                .map(|(k, _)| k.clone())
            else {
                break;
            };
            sessions.remove(&oldest);
            warn!(target: "exercise", session_id = %oldest, max = self.limits.max_sessions, "Session store full; evicted least recently used");
        }
        sessions.insert(
            id.clone(),
            SessionEntry {
                session,
                touched: Instant::now(),
            },
        );
        id
    }

    /// Run `f` on a session under the write lock and mark it as used.
    /// A session idle past the TTL is treated as gone even before the sweeper runs.
    pub async fn with_session<R>(
        &self,
        id: &str,
        f: impl FnOnce(&mut ExerciseSession) -> R,
    ) -> Result<R, AppError> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let expired = sessions
            .get(id)
            .is_some_and(|e| now.saturating_duration_since(e.touched) > self.limits.ttl);
        if expired {
            sessions.remove(id);
        }
        let entry = sessions
            .get_mut(id)
            .ok_or_else(|| AppError::SessionNotFound(id.to_string()))?;
        entry.touched = now;
        Ok(f(&mut entry.session))
    }

    /// Discard a session (the exercise was unmounted).
    #[instrument(level = "debug", skip_all, fields(%id))]
    pub async fn remove_session(&self, id: &str) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    /// Drop every session idle past the TTL as of `now`; returns how many went.
    pub async fn expire_idle(&self, now: Instant) -> usize {
        let ttl = self.limits.ttl;
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, e| now.saturating_duration_since(e.touched) <= ttl);
        let removed = before - sessions.len();
        if removed > 0 {
            debug!(target: "exercise", removed, remaining = sessions.len(), "Expired idle sessions");
        }
        removed
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Periodically expire idle sessions. Runs until the runtime shuts down.
pub fn spawn_session_sweeper(state: Arc<AppState>) -> JoinHandle<()> {
    let period = (state.limits.ttl / 2).clamp(Duration::from_secs(1), Duration::from_secs(60));
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(period);
        loop {
            tick.tick().await;
            state.expire_idle(Instant::now()).await;
        }
    })
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_content(None)
    }
}
