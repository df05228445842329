//! Dual-meet lineup analysis
//!
//! This module evaluates team meets built from pairwise win probabilities,
//! indexes lineup orderings, and searches for lineup strategies with
//! regret matching self-play.

pub mod game;
pub mod meet;
pub mod permutation;
pub mod solver;

// Re-export commonly used types
pub use game::{LineupGame, StrategySet};
pub use meet::{meet_outcome, payoff};
pub use permutation::{PermutationIndex, MAX_ROSTER_SIZE, N_STRATEGIES};
pub use solver::{train, RegretMatcher, SolverReport};
