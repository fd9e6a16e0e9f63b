//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{Activity, ActivitySummary};
use crate::error::{AppError, ErrorOut};
use crate::matcher::AnswerKey;
use crate::session::{Interaction, SessionView};

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    ListActivities,
    GetActivity {
        slug: String,
    },
    OpenExercise {
        slug: String,
        index: usize,
    },
    Interact {
        #[serde(rename = "sessionId")]
        session_id: String,
        interaction: Interaction,
    },
    CloseExercise {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    CheckAnswer {
        slug: String,
        index: usize,
        answers: AnswerKey,
    },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Activities {
        activities: Vec<ActivitySummary>,
    },
    Activity {
        activity: Activity,
    },
    Session {
        #[serde(rename = "sessionId")]
        session_id: String,
        applied: bool,
        view: SessionView,
    },
    Closed {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    AnswerResult {
        correct: bool,
        expected: AnswerKey,
    },
    Error {
        #[serde(flatten)]
        error: ErrorOut,
    },
    /// Malformed client message; no navigation hint applies.
    Invalid {
        message: String,
    },
}

impl From<AppError> for ServerWsMessage {
    fn from(e: AppError) -> Self {
        ServerWsMessage::Error {
            error: ErrorOut::from(&e),
        }
    }
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct OpenSessionIn {
    pub slug: String,
    pub index: usize,
}

#[derive(Debug, Serialize)]
pub struct SessionOut {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub applied: bool,
    pub view: SessionView,
}

#[derive(Debug, Deserialize)]
pub struct CheckAnswerIn {
    pub answers: AnswerKey,
}

#[derive(Debug, Serialize)]
pub struct CheckAnswerOut {
    pub correct: bool,
    pub expected: AnswerKey,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
