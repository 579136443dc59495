use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The request never produced a usable response (network failure or a
    /// non-success status).
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Could not encode request: {0}")]
    Encode(String),

    #[error("Unexpected response: {0}")]
    InvalidResponse(String),

    #[error("No user registered for this session")]
    NotRegistered,

    #[error("Session already has a user id")]
    AlreadyRegistered,

    #[error("Game is not finished yet")]
    NotComplete,
}

pub type Result<T> = std::result::Result<T, GameError>;
