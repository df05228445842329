//! Rating-based win probability
//!
//! This module provides the Elo logistic win probability and the model
//! trait that lineup evaluation is written against.

pub mod calculator;
pub mod elo;

// Re-export commonly used types
pub use calculator::{FixedProbabilityModel, WinProbabilityModel};
pub use elo::{win_probability, EloModel, DEFAULT_ELO_SCALE};
