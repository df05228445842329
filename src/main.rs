//! Main entry point for the lineup-nash web service
//!
//! Serves the head-to-head win probability page and the JSON endpoints,
//! with structured logging and graceful shutdown.

use anyhow::Result;
use clap::Parser;
use lineup_nash::config::AppConfig;
use lineup_nash::service::{AppState, HealthCheck, HealthStatus};
use lineup_nash::utils::init_logging;
use lineup_nash::web::{PageServer, PageServerConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tokio::time::Duration;
use tracing::{error, info, warn};

/// Lineup Nash - head-to-head win probabilities and dual-meet lineup analysis
#[derive(Parser)]
#[command(
    name = "lineup-nash",
    version,
    about = "Serves Elo win probabilities for a configured tennis matchup",
    long_about = "lineup-nash serves the win probability of one rated player over another \
                 as a single HTML page, plus JSON endpoints for arbitrary ratings, \
                 player profile lookups, health and Prometheus metrics."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Perform health check and exit
    #[arg(long, help = "Perform a health check and exit with status code")]
    health_check: bool,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// HTTP host override
    #[arg(long, value_name = "HOST", help = "Override HTTP bind host")]
    http_host: Option<String>,

    /// HTTP port override
    #[arg(long, value_name = "PORT", help = "Override HTTP server port")]
    http_port: Option<u16>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and exit)
    #[arg(
        long,
        help = "Validate configuration and exit without starting service"
    )]
    dry_run: bool,
}

/// Perform health check and return appropriate exit code
fn perform_health_check(config: AppConfig) -> Result<()> {
    info!("Performing health check...");

    let app_state = Arc::new(AppState::new(config)?);
    let health = HealthCheck::check(app_state);

    println!("Health Check: {}", health.status);
    for check in &health.checks {
        match &check.message {
            Some(message) => println!("  {}: {} ({})", check.name, check.status, message),
            None => println!("  {}: {}", check.name, check.status),
        }
    }

    // Missing profile credentials still leave the page usable
    if health.status == HealthStatus::Unhealthy {
        std::process::exit(1);
    }
    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT (Ctrl+C) signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}

/// Display startup banner with service information
fn display_startup_banner(config: &AppConfig) {
    info!("🎾 Lineup Nash");
    info!("   Service: {}", config.service.name);
    info!("   Log level: {}", config.service.log_level);
    info!("   HTTP: {}", config.http_addr());
    info!(
        "   Page matchup: {} vs {}",
        config.page.rating_a, config.page.rating_b
    );
    info!("   Elo scale: {}", config.rating.elo_scale);
    info!(
        "   Profile API: {} ({})",
        config.utr.base_url,
        if config.utr.jwt.is_some() {
            "credential configured"
        } else {
            "no credential"
        }
    );
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}

/// Load and merge configuration from environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(http_host) = &args.http_host {
        config.service.http_host = http_host.clone();
    }

    if let Some(http_port) = args.http_port {
        config.service.http_port = http_port;
    }

    lineup_nash::config::validate_config(&config)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {:#}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if args.health_check {
        return perform_health_check(config);
    }

    if args.dry_run {
        info!("Configuration validation successful");
        display_startup_banner(&config);
        info!("Dry run completed - exiting without starting service");
        return Ok(());
    }

    display_startup_banner(&config);

    info!("Initializing service components...");
    let app_state = match AppState::new(config.clone()) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    let server = Arc::new(PageServer::new(
        PageServerConfig::from_app_config(&config),
        app_state,
    ));

    let mut server_task = {
        let server = server.clone();
        tokio::spawn(async move { server.start().await })
    };

    info!("✅ Lineup Nash is running");
    info!("Press Ctrl+C to shutdown gracefully...");

    tokio::select! {
        _ = wait_for_shutdown_signal() => {
            info!("🛑 Shutdown signal received, beginning graceful shutdown...");
        }
        result = &mut server_task => {
            match result {
                Ok(Ok(())) => warn!("Page server exited unexpectedly"),
                Ok(Err(e)) => error!("Page server failed: {:#}", e),
                Err(e) => error!("Page server task panicked: {}", e),
            }
            std::process::exit(1);
        }
    }

    server.stop();
    match tokio::time::timeout(Duration::from_secs(10), server_task).await {
        Ok(_) => info!("✅ Graceful shutdown completed successfully"),
        Err(_) => warn!("⚠️  Shutdown timeout exceeded, forcing exit"),
    }

    info!("🛑 Lineup Nash stopped");
    Ok(())
}
