use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::therapist::TherapistMatch;

/// Identifier of one of the fixed simulated child personas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonaId {
    Aarav,
    Dani,
    Leo,
}

impl PersonaId {
    /// Every persona the backend knows about, in display order.
    pub const ALL: [PersonaId; 3] = [PersonaId::Aarav, PersonaId::Dani, PersonaId::Leo];

    pub fn as_str(&self) -> &'static str {
        match self {
            PersonaId::Aarav => "aarav",
            PersonaId::Dani => "dani",
            PersonaId::Leo => "leo",
        }
    }
}

impl fmt::Display for PersonaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PersonaId {
    type Err = String;

    /// Persona ids are matched exactly; `"Aarav"` is not a valid id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "aarav" => Ok(PersonaId::Aarav),
            "dani" => Ok(PersonaId::Dani),
            "leo" => Ok(PersonaId::Leo),
            other => Err(format!("invalid persona id: '{other}'")),
        }
    }
}

/// A simulated child persona with its scripted response sequence.
///
/// The response sequence is never empty once a catalog has been validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    pub id: PersonaId,
    /// Medical condition used to look up the matching therapist.
    pub condition: String,
    /// Art form the child prefers (e.g. "drawing").
    pub preferred_art: String,
    /// Ordered utterances returned in rotation.
    pub responses: Vec<String>,
}

/// Who sent a turn in the conversation history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Child,
    Assistant,
    /// Anything else the frontend sends (or a missing sender).
    #[default]
    #[serde(other)]
    Other,
}

/// One prior turn of a chat conversation.
///
/// Only the sender matters for response selection; any other fields the
/// frontend attaches (text, timestamps) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    #[serde(default)]
    pub sender: Sender,
}

impl ChatTurn {
    pub fn new(sender: Sender) -> Self {
        Self { sender }
    }
}

/// Request body for `POST /api/chat`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
    pub persona: Option<String>,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

/// Successful chat response body.
#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub response: String,
    /// ISO-8601 UTC timestamp of when the reply was produced.
    pub timestamp: String,
    pub therapist: TherapistMatch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persona_id_roundtrip() {
        for id in PersonaId::ALL {
            assert_eq!(id.to_string().parse::<PersonaId>().unwrap(), id);
        }
    }

    #[test]
    fn test_persona_id_is_case_sensitive() {
        assert!("Aarav".parse::<PersonaId>().is_err());
        assert!("".parse::<PersonaId>().is_err());
    }

    #[test]
    fn test_unknown_sender_deserializes_as_other() {
        let turns: Vec<ChatTurn> = serde_json::from_str(
            r#"[{"sender": "child", "text": "hi"}, {"sender": "therapist"}, {"text": "no sender"}]"#,
        )
        .unwrap();
        assert_eq!(turns[0].sender, Sender::Child);
        assert_eq!(turns[1].sender, Sender::Other);
        assert_eq!(turns[2].sender, Sender::Other);
    }

    #[test]
    fn test_chat_request_history_defaults_to_empty() {
        let req: ChatRequest =
            serde_json::from_str(r#"{"message": "hello", "persona": "leo"}"#).unwrap();
        assert_eq!(req.persona.as_deref(), Some("leo"));
        assert!(req.history.is_empty());
    }
}
