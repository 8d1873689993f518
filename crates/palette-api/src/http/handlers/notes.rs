//! Session notes endpoints.
//!
//! Endpoints:
//! - POST /api/notes            - Record a session and its progress note
//! - GET  /api/notes/{child_id} - Most recent progress notes for a child

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use chrono::Utc;
use uuid::Uuid;

use palette_types::error::NotesError;
use palette_types::session::{NoteView, SaveNotesReply, SaveNotesRequest};

use crate::http::error::AppError;
use crate::http::handlers::chat::body_rejection;
use crate::state::AppState;

/// POST /api/notes - Save session notes and a progress note atomically.
pub async fn save_notes(
    State(state): State<AppState>,
    payload: Result<Json<SaveNotesRequest>, JsonRejection>,
) -> Result<Json<SaveNotesReply>, AppError> {
    let request_id = Uuid::now_v7();
    let Json(body) =
        payload.map_err(|e| body_rejection(e, AppError::SaveNotes(NotesError::MissingField)))?;

    tracing::info!(
        %request_id,
        child_id = ?body.child_id,
        art_form = body.art_form.as_deref().unwrap_or_default(),
        "received notes"
    );

    let session_id = state
        .notes_service
        .save_notes(body)
        .await
        .map_err(AppError::SaveNotes)?;

    Ok(Json(SaveNotesReply {
        message: "Notes saved successfully".to_string(),
        session_id,
        timestamp: Utc::now().to_rfc3339(),
    }))
}

/// GET /api/notes/{child_id} - Up to the configured number of notes, newest first.
///
/// A child id that is not a number matches no notes.
pub async fn get_notes(
    State(state): State<AppState>,
    Path(child_id): Path<String>,
) -> Result<Json<Vec<NoteView>>, AppError> {
    let Ok(child_id) = child_id.trim().parse::<i64>() else {
        return Ok(Json(Vec::new()));
    };

    let notes = state
        .notes_service
        .get_recent_notes(child_id, None)
        .await
        .map_err(AppError::ReadNotes)?;

    Ok(Json(notes))
}
