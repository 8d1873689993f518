//! Session/notes repository trait definition.

use palette_types::child::ChildId;
use palette_types::error::RepositoryError;
use palette_types::session::{ProgressNote, SessionId, SessionNoteDraft, TherapySession};

/// Repository trait for therapy sessions and progress notes.
///
/// Writes are append-only. Implementations live in palette-infra
/// (e.g., SqliteNotesRepository).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait NotesRepository: Send + Sync {
    /// Insert a session and its progress note in a single transaction.
    ///
    /// Either both rows are written or neither is. Returns the new session id.
    fn save_session_and_note(
        &self,
        draft: &SessionNoteDraft,
    ) -> impl std::future::Future<Output = Result<SessionId, RepositoryError>> + Send;

    /// Most recent progress notes for a child, newest first, at most `limit`.
    fn recent_notes(
        &self,
        child_id: ChildId,
        limit: u32,
    ) -> impl std::future::Future<Output = Result<Vec<ProgressNote>, RepositoryError>> + Send;

    /// Get a therapy session by id.
    fn get_session(
        &self,
        id: SessionId,
    ) -> impl std::future::Future<Output = Result<Option<TherapySession>, RepositoryError>> + Send;
}
