//! Scripted persona chat endpoint.
//!
//! POST /api/chat
//!
//! Answers from the persona catalog only; the store is never touched.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use uuid::Uuid;

use palette_types::error::ChatError;
use palette_types::persona::{ChatReply, ChatRequest};

use crate::http::error::AppError;
use crate::state::AppState;

/// Map a body that could not be parsed into the matching client error.
///
/// Syntax, type, and content-type problems mean the caller did not supply
/// usable parameters. Failing to read the body at all is a server fault.
pub(crate) fn body_rejection(rejection: JsonRejection, client_error: AppError) -> AppError {
    match rejection {
        JsonRejection::BytesRejection(e) => AppError::Internal(e.to_string()),
        _ => client_error,
    }
}

/// POST /api/chat - Next scripted response for a persona plus its therapist match.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, AppError> {
    let request_id = Uuid::now_v7();
    let Json(body) =
        payload.map_err(|e| body_rejection(e, AppError::Chat(ChatError::MissingParameter)))?;

    tracing::info!(
        %request_id,
        persona = body.persona.as_deref().unwrap_or_default(),
        history_len = body.history.len(),
        "received chat request"
    );

    let reply = state.engine.reply(&body)?;
    Ok(Json(reply))
}
