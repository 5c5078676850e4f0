use thiserror::Error;

/// Error class reported to the calling layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller passed a value outside the accepted domain
    InvalidArgument,
    /// The session is not in a phase that accepts the call
    InvalidState,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Number of decks must be between 6 and 10, got {requested}")]
    InvalidDeckCount { requested: u32 },
    #[error("Lane {lane} does not exist (game has {lanes} lanes)")]
    LaneOutOfRange { lane: usize, lanes: usize },
    #[error("Invalid guess direction: {0:?}")]
    InvalidDirection(String),
    #[error("No game in progress. Start a new game first.")]
    NoGameInProgress,
    #[error("Game is already over")]
    GameAlreadyOver,
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::InvalidDeckCount { .. }
            | GameError::LaneOutOfRange { .. }
            | GameError::InvalidDirection(_) => ErrorKind::InvalidArgument,
            GameError::NoGameInProgress | GameError::GameAlreadyOver => ErrorKind::InvalidState,
        }
    }
}
