//! Metrics collection using Prometheus
//!
//! This module provides metrics collection for the lineup service: page and
//! API traffic, profile lookups, and solver runs.

use anyhow::Result;
use prometheus::{
    Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Main metrics collector for the lineup service
#[derive(Clone)]
pub struct MetricsCollector {
    /// Prometheus registry
    registry: Arc<Registry>,

    /// HTTP request metrics
    request_metrics: RequestMetrics,

    /// Profile lookup metrics
    profile_metrics: ProfileMetrics,

    /// Lineup solver metrics
    solver_metrics: SolverMetrics,
}

/// HTTP request metrics
#[derive(Clone)]
pub struct RequestMetrics {
    /// Requests served by endpoint
    pub requests_total: IntCounterVec,

    /// Request handling time by endpoint
    pub request_duration: HistogramVec,

    /// Health status (0=unhealthy, 1=degraded, 2=healthy)
    pub health_status: IntGauge,
}

/// Player profile lookup metrics
#[derive(Clone)]
pub struct ProfileMetrics {
    /// Lookups by outcome (success, failure, unavailable)
    pub lookups_total: IntCounterVec,

    /// Upstream lookup latency
    pub lookup_duration: Histogram,
}

/// Lineup solver metrics
#[derive(Clone)]
pub struct SolverMetrics {
    /// Completed solver runs
    pub runs_total: IntCounter,

    /// Self-play iterations performed
    pub iterations_total: IntCounter,

    /// Wall time per solver run
    pub run_duration: Histogram,
}

impl MetricsCollector {
    /// Create a new metrics collector with default registry
    pub fn new() -> Result<Self> {
        let registry = Arc::new(Registry::new());
        Self::with_registry(registry)
    }

    /// Create a new metrics collector with custom registry
    pub fn with_registry(registry: Arc<Registry>) -> Result<Self> {
        let request_metrics = RequestMetrics::new(&registry)?;
        let profile_metrics = ProfileMetrics::new(&registry)?;
        let solver_metrics = SolverMetrics::new(&registry)?;

        Ok(Self {
            registry,
            request_metrics,
            profile_metrics,
            solver_metrics,
        })
    }

    /// Get the Prometheus registry
    pub fn registry(&self) -> Arc<Registry> {
        self.registry.clone()
    }

    pub fn requests(&self) -> &RequestMetrics {
        &self.request_metrics
    }

    pub fn profiles(&self) -> &ProfileMetrics {
        &self.profile_metrics
    }

    pub fn solver(&self) -> &SolverMetrics {
        &self.solver_metrics
    }

    /// Record a request served by `endpoint`
    pub fn record_request(&self, endpoint: &str, duration: Duration) {
        self.request_metrics
            .requests_total
            .with_label_values(&[endpoint])
            .inc();

        self.request_metrics
            .request_duration
            .with_label_values(&[endpoint])
            .observe(duration.as_secs_f64());
    }

    /// Record a profile lookup outcome
    pub fn record_profile_lookup(&self, outcome: &str, duration: Duration) {
        self.profile_metrics
            .lookups_total
            .with_label_values(&[outcome])
            .inc();

        self.profile_metrics
            .lookup_duration
            .observe(duration.as_secs_f64());
    }

    /// Record a completed solver run
    pub fn record_solver_run(&self, iterations: usize, duration: Duration) {
        self.solver_metrics.runs_total.inc();
        self.solver_metrics
            .iterations_total
            .inc_by(iterations as u64);
        self.solver_metrics
            .run_duration
            .observe(duration.as_secs_f64());
    }

    /// Update overall health status
    pub fn update_health_status(&self, status: u8) {
        self.request_metrics.health_status.set(status as i64);
    }

    /// Create a timer for measuring operation duration
    pub fn start_timer(&self) -> MetricsTimer {
        MetricsTimer::new()
    }
}

/// Timer for measuring operation durations
pub struct MetricsTimer {
    start: Instant,
}

impl MetricsTimer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get the elapsed duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and return the duration
    pub fn stop(self) -> Duration {
        self.elapsed()
    }
}

impl RequestMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let requests_total = IntCounterVec::new(
            Opts::new("lineup_nash_requests_total", "Total HTTP requests served"),
            &["endpoint"],
        )?;
        registry.register(Box::new(requests_total.clone()))?;

        let request_duration = HistogramVec::new(
            HistogramOpts::new(
                "lineup_nash_request_duration_seconds",
                "HTTP request handling time",
            ),
            &["endpoint"],
        )?;
        registry.register(Box::new(request_duration.clone()))?;

        let health_status = IntGauge::new(
            "lineup_nash_health_status",
            "Health status (0=unhealthy, 1=degraded, 2=healthy)",
        )?;
        registry.register(Box::new(health_status.clone()))?;

        Ok(Self {
            requests_total,
            request_duration,
            health_status,
        })
    }
}

impl ProfileMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let lookups_total = IntCounterVec::new(
            Opts::new(
                "lineup_nash_profile_lookups_total",
                "Total player profile lookups",
            ),
            &["outcome"],
        )?;
        registry.register(Box::new(lookups_total.clone()))?;

        let lookup_duration = Histogram::with_opts(HistogramOpts::new(
            "lineup_nash_profile_lookup_duration_seconds",
            "Player profile lookup latency",
        ))?;
        registry.register(Box::new(lookup_duration.clone()))?;

        Ok(Self {
            lookups_total,
            lookup_duration,
        })
    }
}

impl SolverMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let runs_total = IntCounter::new("lineup_nash_solver_runs_total", "Completed solver runs")?;
        registry.register(Box::new(runs_total.clone()))?;

        let iterations_total = IntCounter::new(
            "lineup_nash_solver_iterations_total",
            "Self-play iterations performed",
        )?;
        registry.register(Box::new(iterations_total.clone()))?;

        let run_duration = Histogram::with_opts(
            HistogramOpts::new(
                "lineup_nash_solver_run_duration_seconds",
                "Wall time per solver run",
            )
            .buckets(vec![0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 10.0, 30.0]),
        )?;
        registry.register(Box::new(run_duration.clone()))?;

        Ok(Self {
            runs_total,
            iterations_total,
            run_duration,
        })
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new().expect("Failed to create default metrics collector")
    }
}
