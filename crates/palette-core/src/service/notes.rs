//! Session notes service.
//!
//! Validates incoming notes, shapes the session and progress-note payloads,
//! and hands them to the repository as one transactional unit.

use chrono::Utc;
use serde_json::json;
use tracing::{error, info};

use palette_types::child::ChildId;
use palette_types::error::NotesError;
use palette_types::session::{
    NoteView, SaveNotesRequest, SessionId, SessionNoteDraft, UNKNOWN_ART_FORM,
};
use palette_types::therapist::TherapistId;

use crate::repository::notes::NotesRepository;

/// Records therapy sessions with their progress notes and reads them back.
pub struct NotesService<R: NotesRepository> {
    repo: R,
    /// Therapist attached to new sessions until an auth context exists.
    placeholder_therapist_id: TherapistId,
    default_limit: u32,
}

impl<R: NotesRepository> NotesService<R> {
    /// Create a new NotesService.
    ///
    /// - `placeholder_therapist_id`: therapist recorded on every new session
    /// - `default_limit`: how many notes `get_recent_notes` returns by default
    pub fn new(repo: R, placeholder_therapist_id: TherapistId, default_limit: u32) -> Self {
        Self {
            repo,
            placeholder_therapist_id,
            default_limit,
        }
    }

    /// Access the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Validate a notes request and persist its session and progress note.
    ///
    /// Fails with `MissingField` (writing nothing) when the child id or the
    /// session notes are absent or empty.
    pub async fn save_notes(&self, request: SaveNotesRequest) -> Result<SessionId, NotesError> {
        let child_id = request
            .child_id
            .as_ref()
            .and_then(|c| c.resolve())
            .ok_or(NotesError::MissingField)?;

        let session_notes = match request.session_notes {
            Some(notes) if !notes.is_empty() => notes,
            _ => return Err(NotesError::MissingField),
        };

        let art_form = request
            .art_form
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| UNKNOWN_ART_FORM.to_string());

        let now = Utc::now();
        let draft = SessionNoteDraft {
            child_id,
            therapist_id: self.placeholder_therapist_id,
            session_date: now,
            art_form_used: art_form,
            session_notes: session_notes.clone(),
            emotional_response: json!({ "state": request.emotional_state }),
            note_text: session_notes,
            progress_indicators: json!({
                "emotional_state": request.emotional_state,
                "art_engagement": request.art_engagement,
                "timestamp": now.to_rfc3339(),
            }),
        };

        let session_id = self
            .repo
            .save_session_and_note(&draft)
            .await
            .map_err(|e| {
                error!(child_id, error = %e, "failed to save session notes");
                NotesError::from(e)
            })?;

        info!(child_id, session_id, art_form = %draft.art_form_used, "saved session notes");
        Ok(session_id)
    }

    /// Most recent notes for a child, newest first.
    ///
    /// `limit` defaults to the configured value. A child with no notes yields
    /// an empty list.
    pub async fn get_recent_notes(
        &self,
        child_id: ChildId,
        limit: Option<u32>,
    ) -> Result<Vec<NoteView>, NotesError> {
        let limit = limit.unwrap_or(self.default_limit);
        let notes = self
            .repo
            .recent_notes(child_id, limit)
            .await
            .map_err(|e| {
                error!(child_id, error = %e, "failed to load progress notes");
                NotesError::from(e)
            })?;

        Ok(notes.into_iter().map(NoteView::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use palette_types::error::RepositoryError;
    use palette_types::session::{ChildRef, ProgressNote, TherapySession};

    // --- In-memory repository for testing ---

    #[derive(Default)]
    struct MockNotesRepository {
        drafts: Mutex<Vec<SessionNoteDraft>>,
        fail: bool,
    }

    impl MockNotesRepository {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        fn saved(&self) -> Vec<SessionNoteDraft> {
            self.drafts.lock().unwrap().clone()
        }
    }

    impl NotesRepository for MockNotesRepository {
        async fn save_session_and_note(
            &self,
            draft: &SessionNoteDraft,
        ) -> Result<SessionId, RepositoryError> {
            if self.fail {
                return Err(RepositoryError::Query("database is locked".to_string()));
            }
            let mut drafts = self.drafts.lock().unwrap();
            drafts.push(draft.clone());
            Ok(drafts.len() as SessionId)
        }

        async fn recent_notes(
            &self,
            child_id: ChildId,
            limit: u32,
        ) -> Result<Vec<ProgressNote>, RepositoryError> {
            if self.fail {
                return Err(RepositoryError::Connection);
            }
            let drafts = self.drafts.lock().unwrap();
            Ok(drafts
                .iter()
                .enumerate()
                .rev()
                .filter(|(_, d)| d.child_id == child_id)
                .take(limit as usize)
                .map(|(i, d)| ProgressNote {
                    id: i as i64 + 1,
                    child_id: d.child_id,
                    session_id: i as i64 + 1,
                    note_text: d.note_text.clone(),
                    progress_indicators: d.progress_indicators.clone(),
                    created_at: d.session_date,
                })
                .collect())
        }

        async fn get_session(
            &self,
            _id: SessionId,
        ) -> Result<Option<TherapySession>, RepositoryError> {
            Ok(None)
        }
    }

    fn request(child_id: Option<ChildRef>, notes: Option<&str>) -> SaveNotesRequest {
        SaveNotesRequest {
            child_id,
            session_notes: notes.map(str::to_string),
            emotional_state: json!("calm"),
            art_engagement: json!("high"),
            art_form: None,
        }
    }

    #[tokio::test]
    async fn test_save_notes_builds_session_and_note() {
        let service = NotesService::new(MockNotesRepository::default(), 1, 10);

        let mut req = request(Some(ChildRef::Id(2)), Some("Painted butterflies"));
        req.art_form = Some("painting".to_string());
        let session_id = service.save_notes(req).await.unwrap();
        assert_eq!(session_id, 1);

        let saved = service.repo().saved();
        assert_eq!(saved.len(), 1);
        let draft = &saved[0];
        assert_eq!(draft.child_id, 2);
        assert_eq!(draft.therapist_id, 1);
        assert_eq!(draft.art_form_used, "painting");
        assert_eq!(draft.session_notes, "Painted butterflies");
        assert_eq!(draft.note_text, "Painted butterflies");
        assert_eq!(draft.emotional_response, json!({ "state": "calm" }));
        assert_eq!(draft.progress_indicators["emotional_state"], "calm");
        assert_eq!(draft.progress_indicators["art_engagement"], "high");
        assert!(draft.progress_indicators["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_save_notes_defaults_art_form() {
        let service = NotesService::new(MockNotesRepository::default(), 1, 10);
        service
            .save_notes(request(Some(ChildRef::Text("3".to_string())), Some("Sang a song")))
            .await
            .unwrap();

        let saved = service.repo().saved();
        assert_eq!(saved[0].art_form_used, "unknown");
        assert_eq!(saved[0].child_id, 3);
    }

    #[tokio::test]
    async fn test_save_notes_uses_configured_placeholder_therapist() {
        let service = NotesService::new(MockNotesRepository::default(), 7, 10);
        service
            .save_notes(request(Some(ChildRef::Id(1)), Some("Drew the sky")))
            .await
            .unwrap();
        assert_eq!(service.repo().saved()[0].therapist_id, 7);
    }

    #[tokio::test]
    async fn test_save_notes_missing_fields_write_nothing() {
        let service = NotesService::new(MockNotesRepository::default(), 1, 10);

        let cases = vec![
            request(None, Some("notes")),
            request(Some(ChildRef::Id(0)), Some("notes")),
            request(Some(ChildRef::Text("abc".to_string())), Some("notes")),
            request(Some(ChildRef::Id(1)), None),
            request(Some(ChildRef::Id(1)), Some("")),
        ];
        for req in cases {
            let err = service.save_notes(req).await.unwrap_err();
            assert!(matches!(err, NotesError::MissingField));
        }
        assert!(service.repo().saved().is_empty());
    }

    #[tokio::test]
    async fn test_save_notes_persistence_failure() {
        let service = NotesService::new(MockNotesRepository::failing(), 1, 10);
        let err = service
            .save_notes(request(Some(ChildRef::Id(1)), Some("notes")))
            .await
            .unwrap_err();
        assert!(matches!(err, NotesError::Persistence(_)));
    }

    #[tokio::test]
    async fn test_get_recent_notes_uses_default_limit() {
        let service = NotesService::new(MockNotesRepository::default(), 1, 2);
        for i in 0..3 {
            service
                .save_notes(request(Some(ChildRef::Id(1)), Some(&format!("note {i}"))))
                .await
                .unwrap();
        }

        let notes = service.get_recent_notes(1, None).await.unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].text, "note 2");
        assert_eq!(notes[1].text, "note 1");

        let one = service.get_recent_notes(1, Some(1)).await.unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].text, "note 2");
    }

    #[tokio::test]
    async fn test_get_recent_notes_empty_for_unknown_child() {
        let service = NotesService::new(MockNotesRepository::default(), 1, 10);
        let notes = service.get_recent_notes(99, None).await.unwrap();
        assert!(notes.is_empty());
    }

    #[tokio::test]
    async fn test_get_recent_notes_persistence_failure() {
        let service = NotesService::new(MockNotesRepository::failing(), 1, 10);
        let err = service.get_recent_notes(1, None).await.unwrap_err();
        assert!(matches!(err, NotesError::Persistence(_)));
    }
}
