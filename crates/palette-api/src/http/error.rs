//! Application error type mapping to HTTP status codes and `{"error": ...}` bodies.
//!
//! Client-facing messages are fixed strings. Underlying store errors are
//! logged here and never reach the response body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use palette_types::error::{ChatError, NotesError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Chat request rejected by the persona engine.
    Chat(ChatError),
    /// Saving session notes failed.
    SaveNotes(NotesError),
    /// Reading progress notes failed.
    ReadNotes(NotesError),
    /// Anything else; reported as a generic server error.
    Internal(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Chat(ChatError::MissingParameter) => {
                (StatusCode::BAD_REQUEST, "Missing required parameters")
            }
            AppError::Chat(ChatError::InvalidPersona(_)) => {
                (StatusCode::BAD_REQUEST, "Invalid persona ID")
            }
            AppError::Chat(ChatError::NoMatch(_)) => {
                (StatusCode::BAD_REQUEST, "No matching therapist found")
            }
            AppError::SaveNotes(NotesError::MissingField) => {
                (StatusCode::BAD_REQUEST, "Missing required fields")
            }
            AppError::SaveNotes(NotesError::Persistence(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to save notes")
            }
            AppError::ReadNotes(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to retrieve notes")
            }
            AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        } else {
            tracing::warn!(error = ?self, "request rejected");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}
