//! Main application state
//!
//! This module contains the AppState shared by the HTTP handlers and the
//! command-line tools: configuration, the rating model, metrics and the
//! optional player profile provider.

use crate::config::AppConfig;
use crate::lineup::{train, LineupGame, SolverReport};
use crate::metrics::MetricsCollector;
use crate::rating::{EloModel, WinProbabilityModel};
use crate::types::{Rating, WinProbability};
use crate::utr::{PlayerProfileProvider, UtrClient};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Service-level errors
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Service initialization error: {message}")]
    Initialization { message: String },

    #[error("Solver error: {message}")]
    Solver { message: String },
}

/// Main application state containing all service components
pub struct AppState {
    /// Application configuration
    config: AppConfig,

    /// Win probability model
    model: EloModel,

    /// Metrics collector
    metrics: Arc<MetricsCollector>,

    /// Player profile lookups, when a credential is configured
    profile_provider: Option<Arc<dyn PlayerProfileProvider>>,

    /// Service start time
    started_at: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    /// Initialize the application from configuration
    pub fn new(config: AppConfig) -> Result<Self, ServiceError> {
        info!(
            "Initializing {} (page ratings {} vs {})",
            config.service.name, config.page.rating_a, config.page.rating_b
        );

        let model = config
            .rating
            .model()
            .map_err(|e| ServiceError::Configuration {
                message: e.to_string(),
            })?;

        let metrics = MetricsCollector::new().map_err(|e| ServiceError::Initialization {
            message: format!("Failed to create metrics collector: {}", e),
        })?;

        let profile_provider: Option<Arc<dyn PlayerProfileProvider>> =
            match UtrClient::new(&config.utr) {
                Ok(client) => {
                    info!("Player profile lookups enabled via {}", config.utr.base_url);
                    Some(Arc::new(client))
                }
                Err(e) => {
                    warn!("Player profile lookups disabled: {}", e);
                    None
                }
            };

        Ok(Self {
            config,
            model,
            metrics: Arc::new(metrics),
            profile_provider,
            started_at: chrono::Utc::now(),
        })
    }

    /// Replace the profile provider (used by tests and embedding code)
    pub fn with_profile_provider(mut self, provider: Arc<dyn PlayerProfileProvider>) -> Self {
        self.profile_provider = Some(provider);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn model(&self) -> &EloModel {
        &self.model
    }

    pub fn metrics(&self) -> Arc<MetricsCollector> {
        self.metrics.clone()
    }

    pub fn profile_provider(&self) -> Option<Arc<dyn PlayerProfileProvider>> {
        self.profile_provider.clone()
    }

    pub fn started_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.started_at
    }

    /// Win probability under the configured model
    pub fn win_probability(&self, rating_a: Rating, rating_b: Rating) -> WinProbability {
        self.model.win_probability(rating_a, rating_b)
    }

    /// Probability shown on the landing page
    pub fn page_probability(&self) -> WinProbability {
        self.win_probability(self.config.page.rating_a, self.config.page.rating_b)
    }

    /// Train lineup strategies for the configured matchup
    pub fn solve_lineups(&self, iterations: usize, seed: u64) -> Result<SolverReport, ServiceError> {
        let timer = self.metrics.start_timer();
        let solver = &self.config.solver;

        let game = LineupGame::new(
            solver.home.clone(),
            solver.away.clone(),
            solver.away_permutes,
            &self.model,
        )
        .map_err(|e| ServiceError::Solver {
            message: e.to_string(),
        })?;

        let report = train(&game, iterations, seed);
        self.metrics.record_solver_run(iterations, timer.stop());
        Ok(report)
    }
}
