//! Win probability model trait
//!
//! This module defines the interface lineup evaluation uses to turn a pair
//! of ratings into a match win probability.

use crate::types::{Rating, WinProbability};

/// Trait for models mapping two ratings to a head-to-head win probability
pub trait WinProbabilityModel: Send + Sync {
    /// Probability that the player rated `rating_a` beats the one rated `rating_b`
    fn win_probability(&self, rating_a: Rating, rating_b: Rating) -> WinProbability;

    /// Short model identifier for logging
    fn name(&self) -> &'static str;

    /// Table of `win_probability(home[i], away[j])` indexed `[i][j]`
    fn pairwise(&self, home: &[Rating], away: &[Rating]) -> Vec<Vec<WinProbability>> {
        home.iter()
            .map(|&a| away.iter().map(|&b| self.win_probability(a, b)).collect())
            .collect()
    }
}

/// Model that gives every match the same fixed probability, for testing
#[derive(Debug, Clone, Copy)]
pub struct FixedProbabilityModel {
    probability: WinProbability,
}

impl FixedProbabilityModel {
    pub fn new(probability: WinProbability) -> Self {
        Self { probability }
    }
}

impl WinProbabilityModel for FixedProbabilityModel {
    fn win_probability(&self, _rating_a: Rating, _rating_b: Rating) -> WinProbability {
        self.probability
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::elo::{win_probability, EloModel};

    #[test]
    fn test_pairwise_table_shape() {
        let model = EloModel::default();
        let table = model.pairwise(&[2000.0, 1800.0, 1600.0], &[1900.0, 1700.0]);

        assert_eq!(table.len(), 3);
        assert!(table.iter().all(|row| row.len() == 2));
        assert_eq!(table[0][0], win_probability(2000.0, 1900.0));
        assert_eq!(table[2][1], win_probability(1600.0, 1700.0));
    }

    #[test]
    fn test_fixed_model() {
        let model = FixedProbabilityModel::new(0.7);
        assert_eq!(model.win_probability(0.0, 3000.0), 0.7);
        assert_eq!(model.name(), "fixed");

        let table = model.pairwise(&[1.0], &[2.0, 3.0]);
        assert_eq!(table, vec![vec![0.7, 0.7]]);
    }

    #[test]
    fn test_trait_object() {
        let model: Box<dyn WinProbabilityModel> = Box::new(EloModel::default());
        assert_eq!(model.win_probability(1500.0, 1500.0), 0.5);
    }
}
