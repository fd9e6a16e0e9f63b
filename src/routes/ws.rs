//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.
//!
//! Sessions opened over a connection belong to it: they are closed when the
//! socket goes away.

use std::{collections::HashSet, sync::Arc};
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{info, error, instrument, debug};

use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::logic;
use crate::state::AppState;
use crate::util::trunc_for_log;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "graphlex_backend", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "graphlex_backend", "WebSocket connected");
  let mut owned: HashSet<String> = HashSet::new();

  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        let reply_msg = match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(incoming) => {
            debug!(target: "graphlex_backend", raw = %trunc_for_log(&txt, 200), "WS received");
            handle_client_ws(incoming, &state, &mut owned).await
          }
          Err(e) => ServerWsMessage::Invalid { message: format!("Invalid JSON: {}", e) },
        };

        let out = serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
          serde_json::json!({ "type": "invalid", "message": format!("Serialization error: {}", e) }).to_string()
        });

        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "graphlex_backend", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }

  for id in &owned {
    state.remove_session(id).await;
  }
  info!(target: "graphlex_backend", closed_sessions = owned.len(), "WebSocket disconnected");
}

#[instrument(level = "info", skip(state, owned))]
async fn handle_client_ws(msg: ClientWsMessage, state: &AppState, owned: &mut HashSet<String>) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::ListActivities => {
      ServerWsMessage::Activities { activities: logic::list_activities(state).await }
    }

    ClientWsMessage::GetActivity { slug } => match logic::get_activity(state, &slug).await {
      Ok(activity) => ServerWsMessage::Activity { activity },
      Err(e) => e.into(),
    },

    ClientWsMessage::OpenExercise { slug, index } => match logic::open_exercise(state, &slug, index).await {
      Ok((session_id, view)) => {
        owned.insert(session_id.clone());
        ServerWsMessage::Session { session_id, applied: true, view }
      }
      Err(e) => e.into(),
    },

    ClientWsMessage::Interact { session_id, interaction } => {
      match logic::interact(state, &session_id, interaction).await {
        Ok((applied, view)) => ServerWsMessage::Session { session_id, applied, view },
        Err(e) => e.into(),
      }
    }

    ClientWsMessage::CloseExercise { session_id } => match logic::close_session(state, &session_id).await {
      Ok(()) => {
        owned.remove(&session_id);
        ServerWsMessage::Closed { session_id }
      }
      Err(e) => e.into(),
    },

    ClientWsMessage::CheckAnswer { slug, index, answers } => {
      match logic::check_answer(state, &slug, index, &answers).await {
        Ok((correct, expected)) => ServerWsMessage::AnswerResult { correct, expected },
        Err(e) => e.into(),
      }
    }
  }
}
