//! Configuration management for the lineup service
//!
//! This module handles configuration loading from environment variables and
//! TOML files, validation, and default values.

pub mod app;
pub mod rating;
pub mod solver;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, PageSettings, ServiceSettings, UtrSettings};
pub use rating::RatingSettings;
pub use solver::SolverSettings;
