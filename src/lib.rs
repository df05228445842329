//! Lineup Nash - rating-based win probabilities for team tennis
//!
//! This crate provides the Elo logistic win probability, dual-meet outcome
//! evaluation, lineup strategy search by regret matching, a player profile
//! client, and a small web service presenting the results.

pub mod config;
pub mod error;
pub mod lineup;
pub mod metrics;
pub mod rating;
pub mod service;
pub mod types;
pub mod utils;
pub mod utr;
pub mod web;

// Re-export commonly used types and traits
pub use error::{LineupError, Result};
pub use types::*;

// Re-export key components
pub use lineup::{LineupGame, PermutationIndex, SolverReport};
pub use rating::{win_probability, EloModel, WinProbabilityModel};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
