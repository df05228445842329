//! Error types for the lineup service
//!
//! Domain failures are enumerated in [`LineupError`]; fallible operations
//! return [`Result`], which wraps them in anyhow for context propagation.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for rating, lineup and profile scenarios
#[derive(Debug, thiserror::Error)]
pub enum LineupError {
    #[error("Roster sizes differ: home has {home} players, away has {away}")]
    RosterSizeMismatch { home: usize, away: usize },

    #[error("Roster is empty")]
    EmptyRoster,

    #[error("Roster of {size} players exceeds the maximum of {max}")]
    RosterTooLarge { size: usize, max: usize },

    #[error("Invalid permutation: {reason}")]
    InvalidPermutation { reason: String },

    #[error("Invalid player id: {player_id:?}")]
    InvalidPlayerId { player_id: String },

    #[error("Profile request for player {player_id} failed: {message}")]
    ProfileRequestFailed { player_id: String, message: String },

    #[error("Missing credential: {name}")]
    MissingCredential { name: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}
