//! Health checks
//!
//! This module reports whether the lineup service can answer requests:
//! the rating model must produce sane probabilities, and profile lookups are
//! reported as degraded when no credential is configured.

use crate::service::app::AppState;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Health check status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl HealthStatus {
    /// Numeric form used by the health gauge
    pub fn as_gauge(&self) -> u8 {
        match self {
            HealthStatus::Healthy => 2,
            HealthStatus::Degraded => 1,
            HealthStatus::Unhealthy => 0,
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Healthy => write!(f, "healthy"),
            HealthStatus::Degraded => write!(f, "degraded"),
            HealthStatus::Unhealthy => write!(f, "unhealthy"),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheck {
    /// Overall service status
    pub status: HealthStatus,
    /// Service name
    pub service: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Detailed component checks
    pub checks: Vec<ComponentCheck>,
    /// Seconds since the service started
    pub uptime_seconds: i64,
}

/// Individual component health check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentCheck {
    pub name: String,
    pub status: HealthStatus,
    /// Optional explanation when not healthy
    pub message: Option<String>,
}

impl HealthCheck {
    /// Check every component and combine into an overall status
    pub fn check(app_state: Arc<AppState>) -> Self {
        let checks = vec![
            Self::check_rating_model(&app_state),
            Self::check_profile_provider(&app_state),
        ];

        let status = if checks.iter().any(|c| c.status == HealthStatus::Unhealthy) {
            HealthStatus::Unhealthy
        } else if checks.iter().any(|c| c.status == HealthStatus::Degraded) {
            HealthStatus::Degraded
        } else {
            HealthStatus::Healthy
        };

        app_state.metrics().update_health_status(status.as_gauge());

        let now = chrono::Utc::now();
        HealthCheck {
            status,
            service: app_state.config().service.name.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: now,
            checks,
            uptime_seconds: (now - app_state.started_at()).num_seconds(),
        }
    }

    /// Even ratings must give an even match
    fn check_rating_model(app_state: &AppState) -> ComponentCheck {
        let p = app_state.win_probability(1500.0, 1500.0);
        let (status, message) = if (p - 0.5).abs() < 1e-12 {
            (HealthStatus::Healthy, None)
        } else {
            (
                HealthStatus::Unhealthy,
                Some(format!("Even match evaluated to {}", p)),
            )
        };

        ComponentCheck {
            name: "rating_model".to_string(),
            status,
            message,
        }
    }

    fn check_profile_provider(app_state: &AppState) -> ComponentCheck {
        let (status, message) = match app_state.profile_provider() {
            Some(_) => (HealthStatus::Healthy, None),
            None => (
                HealthStatus::Degraded,
                Some("No profile credential configured".to_string()),
            ),
        };

        ComponentCheck {
            name: "profile_provider".to_string(),
            status,
            message,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| anyhow::anyhow!("Failed to serialize health check: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_degraded_without_credential() {
        let state = Arc::new(AppState::new(AppConfig::default()).unwrap());
        let health = HealthCheck::check(state.clone());

        assert_eq!(health.status, HealthStatus::Degraded);
        assert_eq!(health.checks.len(), 2);
        assert_eq!(state.metrics().requests().health_status.get(), 1);
    }

    #[test]
    fn test_healthy_with_credential() {
        let mut config = AppConfig::default();
        config.utr.jwt = Some("token".to_string());
        let state = Arc::new(AppState::new(config).unwrap());

        let health = HealthCheck::check(state);
        assert_eq!(health.status, HealthStatus::Healthy);
        assert!(health.to_json().unwrap().contains("\"healthy\""));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(HealthStatus::Degraded.to_string(), "degraded");
        assert_eq!(HealthStatus::Unhealthy.as_gauge(), 0);
    }
}
