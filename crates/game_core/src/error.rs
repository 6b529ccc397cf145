use thiserror::Error;

/// Errors raised while recording a match result
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    #[error("game between {player1} and {player2} already has a result")]
    AlreadyPlayed { player1: String, player2: String },

    #[error("score must hold {expected} values, got {got}")]
    InvalidScore { expected: usize, got: usize },

    #[error("score values must be finite numbers")]
    NonFinite,
}

/// Errors raised by player bookkeeping
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlayerError {
    #[error("{player} already collected an achievement for event `{event}`")]
    DuplicateEvent { player: String, event: String },

    #[error("invalid level distribution: {0}")]
    InvalidDistribution(String),
}
