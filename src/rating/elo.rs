//! Elo-style logistic win probability
//!
//! A rating difference of `scale` points corresponds to 10:1 odds. With the
//! conventional scale of 400, a 100 point edge is worth roughly 64%.

use crate::rating::calculator::WinProbabilityModel;
use crate::types::{Rating, WinProbability};
use serde::{Deserialize, Serialize};
use skillratings::elo::EloRating;

/// Rating difference that corresponds to 10:1 odds
pub const DEFAULT_ELO_SCALE: f64 = 400.0;

/// Probability that a player rated `rating_a` beats one rated `rating_b`.
///
/// Inputs are not validated: a NaN rating yields a NaN probability. Finite
/// ratings never do, however far apart.
pub fn win_probability(rating_a: Rating, rating_b: Rating) -> WinProbability {
    probability_with_scale(rating_a, rating_b, DEFAULT_ELO_SCALE)
}

/// Odds in favour of the first player for a given rating difference
pub fn odds(diff: f64, scale: f64) -> f64 {
    10f64.powf(diff / scale)
}

/// `odds / (odds + 1)` written as `1 / (1 + 1/odds)`, which saturates to
/// 0 or 1 instead of overflowing to `inf / inf` at extreme gaps
fn probability_with_scale(rating_a: Rating, rating_b: Rating, scale: f64) -> WinProbability {
    1.0 / (1.0 + odds(rating_b - rating_a, scale))
}

/// Rating carried by a skillratings Elo value
pub fn rating_from_elo(elo: &EloRating) -> Rating {
    elo.rating
}

/// Logistic Elo model with a configurable scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EloModel {
    pub scale: f64,
}

impl Default for EloModel {
    fn default() -> Self {
        Self {
            scale: DEFAULT_ELO_SCALE,
        }
    }
}

impl EloModel {
    pub fn new(scale: f64) -> crate::error::Result<Self> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(crate::error::LineupError::ConfigurationError {
                message: format!("Elo scale must be positive and finite, got {}", scale),
            }
            .into());
        }

        Ok(Self { scale })
    }
}

impl WinProbabilityModel for EloModel {
    fn win_probability(&self, rating_a: Rating, rating_b: Rating) -> WinProbability {
        probability_with_scale(rating_a, rating_b, self.scale)
    }

    fn name(&self) -> &'static str {
        "elo"
    }
}
