use std::path::PathBuf;

use game_core::{MatchError, PlayerError};
use standing::StandingError;
use thiserror::Error;

/// Errors raised while running a competition
#[derive(Debug, Error)]
pub enum CompetitionError {
    #[error("competition `{0}` has already started")]
    AlreadyStarted(String),

    #[error("competition `{0}` has not started yet")]
    NotStarted(String),

    #[error("competition `{0}` is not finished")]
    NotFinished(String),

    #[error("competition `{0}` already handed out its trophies")]
    AlreadyClosed(String),

    #[error("competition `{0}` was aborted after a failed round")]
    Aborted(String),

    #[error("{format} needs {expected} participants, got {got}")]
    ParticipantCount {
        format: &'static str,
        expected: String,
        got: usize,
    },

    #[error("game `{0}` has no winner")]
    Undecided(String),

    #[error("every draw for score group {wins}-{losses} contains a rematch")]
    DrawExhausted { wins: usize, losses: usize },

    #[error("invalid pairing: {0}")]
    Pairing(String),

    #[error("no placement computed for {0}")]
    MissingPlacement(String),

    #[error(transparent)]
    Match(#[from] MatchError),

    #[error(transparent)]
    Standing(#[from] StandingError),

    #[error(transparent)]
    Player(#[from] PlayerError),
}

/// Errors raised while saving or loading results
#[derive(Debug, Error)]
pub enum ResultsError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid results file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while loading a simulation config
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
