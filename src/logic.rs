//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Catalog lookups (summaries, full activity content)
//!   - Opening, driving and closing per-exercise sessions
//!   - Stateless answer checks for question exercises

use tracing::{debug, info, instrument, warn};

use crate::domain::{Activity, ActivitySummary, Exercise};
use crate::error::AppError;
use crate::matcher::AnswerKey;
use crate::session::{ExerciseSession, Interaction, SessionView};
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn list_activities(state: &AppState) -> Vec<ActivitySummary> {
  state.summaries().await
}

#[instrument(level = "info", skip_all, fields(%slug))]
pub async fn get_activity(state: &AppState, slug: &str) -> Result<Activity, AppError> {
  let res = state.get_activity(slug).await;
  if res.is_err() {
    warn!(target: "exercise", %slug, "Unknown activity requested");
  }
  res
}

/// Create a fresh session for exercise `index` of activity `slug`.
#[instrument(level = "info", skip_all, fields(%slug, index = index))]
pub async fn open_exercise(state: &AppState, slug: &str, index: usize) -> Result<(String, SessionView), AppError> {
  let exercise = state.get_exercise(slug, index).await?;
  let Some(session) = ExerciseSession::from_exercise(&exercise, state.geometry) else {
    return Err(AppError::NotInteractive { slug: slug.to_string(), index });
  };
  let view = session.view();
  let kind = session.kind_name();
  let id = state.insert_session(session).await;
  info!(target: "exercise", %slug, index, %kind, session_id = %id, "Session opened");
  Ok((id, view))
}

/// Apply one interaction; returns whether it was applied and the resulting view.
#[instrument(level = "info", skip_all, fields(%session_id))]
pub async fn interact(state: &AppState, session_id: &str, interaction: Interaction) -> Result<(bool, SessionView), AppError> {
  let (applied, view) = state
    .with_session(session_id, |s| {
      let applied = s.apply(&interaction);
      (applied, s.view())
    })
    .await?;

  if !applied {
    debug!(target: "exercise", %session_id, ?interaction, "Interaction ignored");
  }
  match (&interaction, &view) {
    (Interaction::Submit, SessionView::DragDrop { result: Some(r), .. }) if applied => {
      info!(target: "exercise", %session_id, correct = r.correct_count, total = r.total_zones,
        accuracy = %format!("{:.0}", r.accuracy_percent), "Drag-drop graded");
    }
    (Interaction::Submit, SessionView::Drawing { accuracy: Some(a), .. }) if applied => {
      info!(target: "exercise", %session_id, accuracy = %format!("{:.0}", a), "Drawing scored");
    }
    (Interaction::Submit, SessionView::Question { correct: Some(c), .. }) if applied => {
      info!(target: "exercise", %session_id, correct = %c, "Question answered");
    }
    _ => {}
  }
  Ok((applied, view))
}

#[instrument(level = "debug", skip_all, fields(%session_id))]
pub async fn session_view(state: &AppState, session_id: &str) -> Result<SessionView, AppError> {
  state.with_session(session_id, |s| s.view()).await
}

#[instrument(level = "info", skip_all, fields(%session_id))]
pub async fn close_session(state: &AppState, session_id: &str) -> Result<(), AppError> {
  if state.remove_session(session_id).await {
    debug!(target: "exercise", %session_id, "Session closed");
    Ok(())
  } else {
    Err(AppError::SessionNotFound(session_id.to_string()))
  }
}

/// Check answers against a question exercise without opening a session.
/// Returns the verdict and the expected key.
#[instrument(level = "info", skip_all, fields(%slug, index = index, answers = answers.len()))]
pub async fn check_answer(state: &AppState, slug: &str, index: usize, answers: &AnswerKey) -> Result<(bool, AnswerKey), AppError> {
  let expected = match state.get_exercise(slug, index).await? {
    Exercise::FreeText { answer, .. } => answer,
    Exercise::Choice { answer, .. } => AnswerKey::Single(answer),
    _ => return Err(AppError::NotAQuestion { slug: slug.to_string(), index }),
  };
  let correct = expected.accepts(answers);
  info!(target: "exercise", %slug, index, %correct, "Answer checked");
  Ok((correct, expected))
}
