//! Main application configuration
//!
//! This module defines the primary configuration structures for the lineup
//! service, including environment variable and TOML file loading and
//! validation.

use crate::config::rating::RatingSettings;
use crate::config::solver::SolverSettings;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub page: PageSettings,
    pub rating: RatingSettings,
    pub utr: UtrSettings,
    pub solver: SolverSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Host the HTTP server binds to
    pub http_host: String,
    /// Port the HTTP server binds to
    pub http_port: u16,
}

/// Ratings shown on the landing page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSettings {
    pub rating_a: f64,
    pub rating_b: f64,
}

/// Player profile API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UtrSettings {
    /// API root, without the `/v1/...` path
    pub base_url: String,
    /// Session token sent as the `jwt` cookie
    pub jwt: Option<String>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "lineup-nash".to_string(),
            log_level: "info".to_string(),
            http_host: "0.0.0.0".to_string(),
            http_port: 3000,
        }
    }
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            rating_a: 1600.0,
            rating_b: 1700.0,
        }
    }
}

impl Default for UtrSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.universaltennis.com".to_string(),
            jwt: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config = Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Parse configuration from TOML text; missing sections use defaults
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }
        if let Ok(host) = env::var("HTTP_HOST") {
            self.service.http_host = host;
        }
        if let Ok(port) = env::var("HTTP_PORT") {
            self.service.http_port = port
                .parse()
                .map_err(|_| anyhow!("Invalid HTTP_PORT value: {}", port))?;
        }

        // Page settings
        if let Ok(rating) = env::var("PAGE_RATING_A") {
            self.page.rating_a = rating
                .parse()
                .map_err(|_| anyhow!("Invalid PAGE_RATING_A value: {}", rating))?;
        }
        if let Ok(rating) = env::var("PAGE_RATING_B") {
            self.page.rating_b = rating
                .parse()
                .map_err(|_| anyhow!("Invalid PAGE_RATING_B value: {}", rating))?;
        }

        // Rating settings
        if let Ok(scale) = env::var("ELO_SCALE") {
            self.rating.elo_scale = scale
                .parse()
                .map_err(|_| anyhow!("Invalid ELO_SCALE value: {}", scale))?;
        }

        // Profile API settings
        if let Ok(url) = env::var("UTR_BASE_URL") {
            self.utr.base_url = url;
        }
        if let Ok(jwt) = env::var("UTR_JWT") {
            self.utr.jwt = Some(jwt);
        }

        // Solver settings
        if let Ok(iterations) = env::var("SOLVER_ITERATIONS") {
            self.solver.iterations = iterations
                .parse()
                .map_err(|_| anyhow!("Invalid SOLVER_ITERATIONS value: {}", iterations))?;
        }
        if let Ok(seed) = env::var("SOLVER_SEED") {
            self.solver.seed = seed
                .parse()
                .map_err(|_| anyhow!("Invalid SOLVER_SEED value: {}", seed))?;
        }

        Ok(())
    }

    /// Address the HTTP server binds to
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.service.http_host, self.service.http_port)
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.http_port == 0 {
        return Err(anyhow!("HTTP port cannot be 0"));
    }

    if !(config.rating.elo_scale.is_finite() && config.rating.elo_scale > 0.0) {
        return Err(anyhow!("Elo scale must be positive"));
    }

    if config.utr.base_url.is_empty() {
        return Err(anyhow!("UTR base URL cannot be empty"));
    }

    if config.solver.iterations == 0 {
        return Err(anyhow!("Solver iterations must be greater than 0"));
    }
    crate::lineup::meet::validate_matchup(&config.solver.home, &config.solver.away)
        .context("Invalid solver rosters")?;

    Ok(())
}
