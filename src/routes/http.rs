//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented; failures map to `AppError` responses.

use std::sync::Arc;
use axum::{extract::{Path, State}, http::StatusCode, Json, response::IntoResponse};
use tracing::{info, instrument};

use crate::error::AppError;
use crate::protocol::*;
use crate::session::Interaction;
use crate::state::AppState;
use crate::logic;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_list_activities(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(logic::list_activities(&state).await)
}

#[instrument(level = "info", skip_all, fields(%slug))]
pub async fn http_get_activity(
  State(state): State<Arc<AppState>>,
  Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
  let activity = logic::get_activity(&state, &slug).await?;
  info!(target: "exercise", %slug, exercises = activity.exercises.len(), "HTTP activity served");
  Ok(Json(activity))
}

#[instrument(level = "info", skip_all, fields(%slug, index = index))]
pub async fn http_check_answer(
  State(state): State<Arc<AppState>>,
  Path((slug, index)): Path<(String, usize)>,
  Json(body): Json<CheckAnswerIn>,
) -> Result<impl IntoResponse, AppError> {
  let (correct, expected) = logic::check_answer(&state, &slug, index, &body.answers).await?;
  Ok(Json(CheckAnswerOut { correct, expected }))
}

#[instrument(level = "info", skip_all, fields(slug = %body.slug, index = body.index))]
pub async fn http_open_session(
  State(state): State<Arc<AppState>>,
  Json(body): Json<OpenSessionIn>,
) -> Result<impl IntoResponse, AppError> {
  let (session_id, view) = logic::open_exercise(&state, &body.slug, body.index).await?;
  Ok((StatusCode::CREATED, Json(SessionOut { session_id, applied: true, view })))
}

#[instrument(level = "info", skip_all, fields(%id))]
pub async fn http_get_session(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
  let view = logic::session_view(&state, &id).await?;
  Ok(Json(SessionOut { session_id: id, applied: false, view }))
}

#[instrument(level = "info", skip_all, fields(%id))]
pub async fn http_interact(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
  Json(interaction): Json<Interaction>,
) -> Result<impl IntoResponse, AppError> {
  let (applied, view) = logic::interact(&state, &id, interaction).await?;
  Ok(Json(SessionOut { session_id: id, applied, view }))
}

#[instrument(level = "info", skip_all, fields(%id))]
pub async fn http_close_session(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
  logic::close_session(&state, &id).await?;
  Ok(StatusCode::NO_CONTENT)
}
