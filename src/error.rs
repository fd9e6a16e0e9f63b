//! API-level errors. Engine operations never fail; these cover lookups only.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Activity not found: {slug}")]
    ActivityNotFound { slug: String, available: Vec<String> },
    #[error("Exercise {index} not found in activity {slug}")]
    ExerciseNotFound { slug: String, index: usize },
    #[error("Exercise {index} in activity {slug} has no interaction state")]
    NotInteractive { slug: String, index: usize },
    #[error("Exercise {index} in activity {slug} is not a question")]
    NotAQuestion { slug: String, index: usize },
    #[error("Session not found: {0}")]
    SessionNotFound(String),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::ActivityNotFound { .. } => "activity_not_found",
            Self::ExerciseNotFound { .. } => "exercise_not_found",
            Self::NotInteractive { .. } => "not_interactive",
            Self::NotAQuestion { .. } => "not_a_question",
            Self::SessionNotFound(_) => "session_not_found",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::ActivityNotFound { .. } | Self::ExerciseNotFound { .. } | Self::SessionNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Self::NotInteractive { .. } | Self::NotAQuestion { .. } => StatusCode::BAD_REQUEST,
        }
    }

    /// Known-good slugs the client can navigate to instead.
    pub fn available(&self) -> &[String] {
        match self {
            Self::ActivityNotFound { available, .. } => available,
            _ => &[],
        }
    }
}

/// Error body. `home` is where the client navigates back to.
#[derive(Debug, Serialize)]
pub struct ErrorOut {
    pub error: &'static str,
    pub message: String,
    pub home: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub available: Vec<String>,
}

impl From<&AppError> for ErrorOut {
    fn from(e: &AppError) -> Self {
        Self {
            error: e.code(),
            message: e.to_string(),
            home: "/",
            available: e.available().to_vec(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorOut::from(&self))).into_response()
    }
}
