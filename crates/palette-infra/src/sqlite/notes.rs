//! SQLite notes repository implementation.
//!
//! Implements `NotesRepository` from `palette-core`. A session and its
//! progress note are inserted in one writer transaction; if either insert
//! fails the transaction is dropped uncommitted and SQLite rolls it back.

use sqlx::Row;

use palette_core::repository::notes::NotesRepository;
use palette_types::child::ChildId;
use palette_types::error::RepositoryError;
use palette_types::session::{ProgressNote, SessionId, SessionNoteDraft, TherapySession};

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime, parse_json};

/// SQLite-backed implementation of `NotesRepository`.
pub struct SqliteNotesRepository {
    pool: DatabasePool,
}

impl SqliteNotesRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn query_err(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Query(e.to_string())
}

fn row_to_note(row: &sqlx::sqlite::SqliteRow) -> Result<ProgressNote, RepositoryError> {
    let indicators: String = row.try_get("progress_indicators").map_err(query_err)?;
    let created_at: String = row.try_get("created_at").map_err(query_err)?;

    Ok(ProgressNote {
        id: row.try_get("id").map_err(query_err)?,
        child_id: row.try_get("child_id").map_err(query_err)?,
        session_id: row.try_get("session_id").map_err(query_err)?,
        note_text: row.try_get("note_text").map_err(query_err)?,
        progress_indicators: parse_json(&indicators, "progress_indicators")?,
        created_at: parse_datetime(&created_at)?,
    })
}

fn row_to_session(row: &sqlx::sqlite::SqliteRow) -> Result<TherapySession, RepositoryError> {
    let emotional_response: String = row.try_get("emotional_response").map_err(query_err)?;
    let session_date: String = row.try_get("session_date").map_err(query_err)?;
    let created_at: String = row.try_get("created_at").map_err(query_err)?;

    Ok(TherapySession {
        id: row.try_get("id").map_err(query_err)?,
        child_id: row.try_get("child_id").map_err(query_err)?,
        therapist_id: row.try_get("therapist_id").map_err(query_err)?,
        session_date: parse_datetime(&session_date)?,
        art_form_used: row.try_get("art_form_used").map_err(query_err)?,
        session_notes: row.try_get("session_notes").map_err(query_err)?,
        emotional_response: parse_json(&emotional_response, "emotional_response")?,
        created_at: parse_datetime(&created_at)?,
    })
}

impl NotesRepository for SqliteNotesRepository {
    async fn save_session_and_note(
        &self,
        draft: &SessionNoteDraft,
    ) -> Result<SessionId, RepositoryError> {
        let created_at = format_datetime(&chrono::Utc::now());

        // INSERT therapy_session + INSERT progress_note, committed together
        let mut tx = self.pool.writer.begin().await.map_err(query_err)?;

        let session = sqlx::query(
            "INSERT INTO therapy_sessions (child_id, therapist_id, session_date, art_form_used, session_notes, emotional_response, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(draft.child_id)
        .bind(draft.therapist_id)
        .bind(format_datetime(&draft.session_date))
        .bind(&draft.art_form_used)
        .bind(&draft.session_notes)
        .bind(draft.emotional_response.to_string())
        .bind(&created_at)
        .execute(&mut *tx)
        .await
        .map_err(query_err)?;

        let session_id = session.last_insert_rowid();

        sqlx::query(
            "INSERT INTO progress_notes (child_id, session_id, note_text, progress_indicators, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(draft.child_id)
        .bind(session_id)
        .bind(&draft.note_text)
        .bind(draft.progress_indicators.to_string())
        .bind(&created_at)
        .execute(&mut *tx)
        .await
        .map_err(query_err)?;

        tx.commit().await.map_err(query_err)?;

        Ok(session_id)
    }

    async fn recent_notes(
        &self,
        child_id: ChildId,
        limit: u32,
    ) -> Result<Vec<ProgressNote>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM progress_notes WHERE child_id = ? ORDER BY created_at DESC, id DESC LIMIT ?",
        )
        .bind(child_id)
        .bind(i64::from(limit))
        .fetch_all(&self.pool.reader)
        .await
        .map_err(query_err)?;

        rows.iter().map(row_to_note).collect()
    }

    async fn get_session(&self, id: SessionId) -> Result<Option<TherapySession>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM therapy_sessions WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_err)?;

        row.as_ref().map(row_to_session).transpose()
    }
}
