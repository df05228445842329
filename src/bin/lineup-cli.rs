//! Lineup CLI Tool
//!
//! Command-line access to the win probability model, dual-meet evaluation,
//! the lineup solver and player profile lookups.
//!
//! Usage:
//!   cargo run --bin lineup-cli -- --help
//!   cargo run --bin lineup-cli probability --a 1600 --b 1700
//!   cargo run --bin lineup-cli probability --a -100 --b 0
//!   cargo run --bin lineup-cli meet
//!   cargo run --bin lineup-cli solve --iterations 20000 --seed 7 --threshold 0.01 --away-threshold 0.0001
//!   UTR_JWT=... cargo run --bin lineup-cli player --id 123456

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use lineup_nash::config::AppConfig;
use lineup_nash::lineup::meet_outcome;
use lineup_nash::service::AppState;
use lineup_nash::utils::{format_percent, init_logging, rating_difference};
use lineup_nash::utr::{PlayerProfileProvider, UtrClient};
use lineup_nash::WinProbabilityModel;

#[derive(Parser)]
#[command(name = "lineup-cli")]
#[command(about = "Win probabilities, dual-meet outcomes and lineup strategies for tennis teams")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML); environment variables are used otherwise
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Probability that player A beats player B
    Probability {
        /// Rating of player A
        #[arg(short, long, allow_negative_numbers = true)]
        a: f64,
        /// Rating of player B
        #[arg(short, long, allow_negative_numbers = true)]
        b: f64,
    },
    /// Evaluate the configured home and away lineups as played
    Meet,
    /// Train lineup strategies for the configured rosters
    Solve {
        /// Self-play iterations (defaults to the configured value)
        #[arg(short, long)]
        iterations: Option<usize>,
        /// RNG seed (defaults to the configured value)
        #[arg(short, long)]
        seed: Option<u64>,
        /// Only print home lineups played more often than this
        #[arg(short, long, default_value = "0.01")]
        threshold: f64,
        /// Only print away lineups played more often than this
        #[arg(long, default_value = "0.0001")]
        away_threshold: f64,
    },
    /// Fetch a player profile
    Player {
        /// Player id
        #[arg(short, long)]
        id: String,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::from_file(path),
        None => AppConfig::from_env(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Probability { a, b } => {
            let state = AppState::new(config)?;
            let probability = state.win_probability(a, b);
            println!("🎾 {} vs {}", a, b);
            println!("   Rating difference: {}", rating_difference(a, b));
            println!("   P(A beats B): {} ({})", probability, format_percent(probability));
        }
        Commands::Meet => {
            let state = AppState::new(config)?;
            let home = &state.config().solver.home;
            let away = &state.config().solver.away;
            let model = state.model();

            println!("🏟️  {} vs {}", home, away);
            for (h, a) in home.players.iter().zip(&away.players) {
                let p = model.win_probability(h.rating, a.rating);
                println!("   {} vs {}: {}", h, a, format_percent(p));
            }

            let outcome = meet_outcome(home, away, model)?;
            println!("   Win:  {}", format_percent(outcome.win));
            println!("   Tie:  {}", format_percent(outcome.tie));
            println!("   Loss: {}", format_percent(outcome.loss));
            println!("   Payoff: {:.4}", outcome.payoff());
        }
        Commands::Solve {
            iterations,
            seed,
            threshold,
            away_threshold,
        } => {
            let iterations = iterations.unwrap_or(config.solver.iterations);
            let seed = seed.unwrap_or(config.solver.seed);
            let state = AppState::new(config)?;

            println!("🧮 Training for {} iterations (seed {})...", iterations, seed);
            let report = state.solve_lineups(iterations, seed)?;
            let top_away = report.away_strategy.first();

            println!("Home lineups:");
            for lineup in report.home_above(threshold) {
                println!("   {} {}", format_percent(lineup.probability), lineup.roster);
                if let Some(away) = top_away {
                    let outcome = meet_outcome(&lineup.roster, &away.roster, state.model())?;
                    println!(
                        "      vs {}: win {} / tie {} / loss {}",
                        away.roster,
                        format_percent(outcome.win),
                        format_percent(outcome.tie),
                        format_percent(outcome.loss)
                    );
                }
            }
            println!("Away lineups:");
            for lineup in report.away_above(away_threshold) {
                println!("   {} {}", format_percent(lineup.probability), lineup.roster);
            }
            println!("Expected home payoff: {:.4}", report.expected_payoff);
        }
        Commands::Player { id } => {
            let client = UtrClient::new(&config.utr)?;
            let profile = client.get_player(&id).await?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
    }

    Ok(())
}
