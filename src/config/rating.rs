//! Rating model configuration

use crate::rating::{EloModel, DEFAULT_ELO_SCALE};
use serde::{Deserialize, Serialize};

/// Settings for the win probability model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingSettings {
    /// Rating difference corresponding to 10:1 odds
    pub elo_scale: f64,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            elo_scale: DEFAULT_ELO_SCALE,
        }
    }
}

impl RatingSettings {
    /// Build the configured model
    pub fn model(&self) -> crate::error::Result<EloModel> {
        EloModel::new(self.elo_scale)
    }
}
