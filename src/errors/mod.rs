use anyhow::Context as _;
use std::path::Path;
use thiserror::Error;

/// Failures raised by the tournament engines and the service on top of them
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TournamentError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid player: {0}")]
    InvalidPlayer(String),

    #[error("malformed pair token '{token}': expected two names separated by '{separator}'")]
    MalformedPairToken { token: String, separator: char },

    #[error("player '{0}' is already on the roster")]
    DuplicatePlayer(String),

    #[error("player '{0}' is not on the roster")]
    UnknownPlayer(String),

    #[error("tournament '{0}' does not exist")]
    UnknownTournament(String),

    #[error("tournament '{0}' already exists")]
    DuplicateTournament(String),

    #[error("no tournament is active")]
    NoActiveTournament,

    #[error("scores have already been entered; use --force to discard them")]
    ScoringStarted,

    #[error("no pairs yet; generate pairs first")]
    NotPaired,

    #[error("no groups yet; create groups first")]
    NotGrouped,
}

/// Add context to store errors
pub fn store_context(operation: &str, path: &Path) -> String {
    format!("Failed to {} tournament store at {}", operation, path.display())
}

/// Wrap result with store context
pub fn with_store_context<T, E>(result: Result<T, E>, operation: &str, path: &Path) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.with_context(|| store_context(operation, path))
}

