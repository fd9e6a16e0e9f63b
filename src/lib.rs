//! Graphlex · line-graph vocabulary trainer backend.
//!
//! Headless exercise engines (drag-drop assignment, freehand drawing scorer,
//! question cards) behind an Axum HTTP + WebSocket API.

pub mod telemetry;
pub mod util;
pub mod matcher;
pub mod domain;
pub mod dragdrop;
pub mod drawing;
pub mod question;
pub mod session;
pub mod error;
pub mod config;
pub mod seeds;
pub mod state;
pub mod protocol;
pub mod logic;
pub mod routes;
