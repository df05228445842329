//! Lineup solver configuration

use crate::types::Roster;
use serde::{Deserialize, Serialize};

/// Matchup and training parameters for the lineup solver
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Self-play iterations
    pub iterations: usize,
    /// Seed for strategy sampling
    pub seed: u64,
    /// Whether the away team also chooses its order
    pub away_permutes: bool,
    pub home: Roster,
    pub away: Roster,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            iterations: 10_000,
            seed: 0,
            away_permutes: false,
            home: Roster::sample_home(),
            away: Roster::sample_away(),
        }
    }
}
