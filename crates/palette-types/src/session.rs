//! Therapy session, progress note, and supervisor feedback types.
//!
//! Sessions and notes are append-only: they are written once by the notes
//! endpoint and never updated or deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::child::ChildId;
use crate::therapist::TherapistId;

/// Database identifier of a therapy session row.
pub type SessionId = i64;

/// Database identifier of a progress note row.
pub type NoteId = i64;

/// Art form recorded when the caller does not supply one.
pub const UNKNOWN_ART_FORM: &str = "unknown";

/// One recorded therapy encounter between a child and a therapist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TherapySession {
    pub id: SessionId,
    pub child_id: ChildId,
    pub therapist_id: TherapistId,
    pub session_date: DateTime<Utc>,
    pub art_form_used: String,
    pub session_notes: Option<String>,
    pub emotional_response: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// A free-text observation about a child's progress, linked to one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressNote {
    pub id: NoteId,
    pub child_id: ChildId,
    pub session_id: SessionId,
    pub note_text: String,
    pub progress_indicators: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Reserved: supervisor review of a session. No endpoint writes these yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupervisorFeedback {
    pub id: i64,
    pub session_id: SessionId,
    pub therapist_id: TherapistId,
    pub feedback_text: String,
    pub improvement_areas: serde_json::Value,
    pub strengths: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// A session row and its progress note, written together in one transaction.
#[derive(Debug, Clone)]
pub struct SessionNoteDraft {
    pub child_id: ChildId,
    pub therapist_id: TherapistId,
    pub session_date: DateTime<Utc>,
    pub art_form_used: String,
    pub session_notes: String,
    pub emotional_response: serde_json::Value,
    pub note_text: String,
    pub progress_indicators: serde_json::Value,
}

/// Child id as sent by the frontend: either a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ChildRef {
    Id(i64),
    Text(String),
}

impl ChildRef {
    /// Resolve to a usable id. Zero, negative and non-numeric values count as absent.
    pub fn resolve(&self) -> Option<ChildId> {
        let id = match self {
            ChildRef::Id(id) => *id,
            ChildRef::Text(s) => s.trim().parse().ok()?,
        };
        (id > 0).then_some(id)
    }
}

/// Request body for `POST /api/notes`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveNotesRequest {
    pub child_id: Option<ChildRef>,
    pub session_notes: Option<String>,
    #[serde(default)]
    pub emotional_state: serde_json::Value,
    #[serde(default)]
    pub art_engagement: serde_json::Value,
    pub art_form: Option<String>,
}

/// Successful response body for `POST /api/notes`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveNotesReply {
    pub message: String,
    pub session_id: SessionId,
    pub timestamp: String,
}

/// Progress note as returned by `GET /api/notes/{child_id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteView {
    pub id: NoteId,
    pub text: String,
    pub indicators: serde_json::Value,
    pub created_at: String,
}

impl From<ProgressNote> for NoteView {
    fn from(note: ProgressNote) -> Self {
        Self {
            id: note.id,
            text: note.note_text,
            indicators: note.progress_indicators,
            created_at: note.created_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_ref_resolve() {
        assert_eq!(ChildRef::Id(3).resolve(), Some(3));
        assert_eq!(ChildRef::Text("42".to_string()).resolve(), Some(42));
        assert_eq!(ChildRef::Id(0).resolve(), None);
        assert_eq!(ChildRef::Text("abc".to_string()).resolve(), None);
        assert_eq!(ChildRef::Text(String::new()).resolve(), None);
    }

    #[test]
    fn test_save_notes_request_camel_case() {
        let req: SaveNotesRequest = serde_json::from_str(
            r#"{"childId": "1", "sessionNotes": "Drew a rainbow", "emotionalState": "calm", "artEngagement": 4}"#,
        )
        .unwrap();
        assert_eq!(req.child_id, Some(ChildRef::Text("1".to_string())));
        assert_eq!(req.session_notes.as_deref(), Some("Drew a rainbow"));
        assert_eq!(req.emotional_state, serde_json::json!("calm"));
        assert_eq!(req.art_engagement, serde_json::json!(4));
        assert!(req.art_form.is_none());
    }

    #[test]
    fn test_save_notes_reply_uses_session_id_key() {
        let reply = SaveNotesReply {
            message: "Notes saved successfully".to_string(),
            session_id: 7,
            timestamp: "2026-01-01T00:00:00+00:00".to_string(),
        };
        let value = serde_json::to_value(&reply).unwrap();
        assert_eq!(value["sessionId"], 7);
    }
}
