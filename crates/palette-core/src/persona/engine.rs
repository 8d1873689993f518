//! Scripted response selection and therapist matching.
//!
//! The engine is stateless: the only thing that advances between calls is
//! the conversation history the frontend sends back. Replaying the same
//! history always yields the same utterance.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use palette_types::error::ChatError;
use palette_types::persona::{ChatReply, ChatRequest, ChatTurn, Persona, Sender};
use palette_types::therapist::TherapistMatch;

use super::catalog::PersonaCatalog;

/// Index of the next scripted response: child turns so far, modulo the
/// script length.
pub fn response_index(history: &[ChatTurn], script_len: usize) -> usize {
    let child_turns = history
        .iter()
        .filter(|turn| turn.sender == Sender::Child)
        .count();
    child_turns % script_len
}

/// Answers chat requests from an immutable [`PersonaCatalog`].
#[derive(Debug, Clone)]
pub struct ResponseEngine {
    catalog: Arc<PersonaCatalog>,
}

impl ResponseEngine {
    pub fn new(catalog: Arc<PersonaCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &PersonaCatalog {
        &self.catalog
    }

    /// Match a persona to the therapist registered for its condition.
    ///
    /// Returns `None` when the persona is unknown or its condition has no
    /// therapist.
    pub fn match_therapist(&self, persona_id: &str) -> Option<TherapistMatch> {
        let persona = self.catalog.persona(persona_id)?;
        self.match_persona(persona)
    }

    fn match_persona(&self, persona: &Persona) -> Option<TherapistMatch> {
        let profile = self.catalog.therapist_for(&persona.condition)?;
        Some(TherapistMatch::from_profile(profile, &persona.preferred_art))
    }

    /// Select the next scripted utterance for a persona, bundled with its
    /// therapist match.
    pub fn get_next_response(
        &self,
        persona_id: &str,
        history: &[ChatTurn],
    ) -> Result<(String, TherapistMatch), ChatError> {
        let persona = self
            .catalog
            .persona(persona_id)
            .ok_or_else(|| ChatError::InvalidPersona(persona_id.to_string()))?;

        let therapist = self
            .match_persona(persona)
            .ok_or_else(|| ChatError::NoMatch(persona_id.to_string()))?;

        let index = response_index(history, persona.responses.len());
        let response = persona.responses[index].clone();
        debug!(persona = %persona.id, index, "selected scripted response");

        Ok((response, therapist))
    }

    /// Handle a full chat request: presence checks, selection, timestamp.
    pub fn reply(&self, request: &ChatRequest) -> Result<ChatReply, ChatError> {
        let message = request.message.as_deref().unwrap_or_default();
        let persona_id = request.persona.as_deref().unwrap_or_default();

        if message.is_empty() || persona_id.is_empty() {
            warn!("chat request missing message or persona");
            return Err(ChatError::MissingParameter);
        }

        let (response, therapist) = self.get_next_response(persona_id, &request.history)?;

        info!(
            persona = persona_id,
            history_len = request.history.len(),
            therapist = %therapist.name,
            match_score = therapist.match_score,
            "chat reply"
        );

        Ok(ChatReply {
            response,
            timestamp: Utc::now().to_rfc3339(),
            therapist,
        })
    }
}
