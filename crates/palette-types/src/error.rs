use thiserror::Error;

/// Errors from the chat endpoint's persona engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("missing required parameters")]
    MissingParameter,

    #[error("invalid persona id: '{0}'")]
    InvalidPersona(String),

    #[error("no matching therapist found for persona '{0}'")]
    NoMatch(String),
}

/// Errors from saving or reading session notes.
#[derive(Debug, Error)]
pub enum NotesError {
    #[error("missing required fields")]
    MissingField,

    #[error("persistence error: {0}")]
    Persistence(String),
}

/// Errors raised while loading or validating the persona catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse catalog: {0}")]
    Parse(String),

    #[error("unknown persona id '{0}' in catalog")]
    UnknownPersona(String),

    #[error("persona '{0}' is defined more than once")]
    DuplicatePersona(String),

    #[error("condition '{0}' has more than one therapist")]
    DuplicateCondition(String),

    #[error("persona '{0}' has no responses")]
    EmptyResponses(String),
}

/// Errors from repository operations (used by trait definitions in palette-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

impl From<RepositoryError> for NotesError {
    fn from(e: RepositoryError) -> Self {
        NotesError::Persistence(e.to_string())
    }
}
