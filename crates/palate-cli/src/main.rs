mod db;
mod resolve;
mod store;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::db::DbCommands;
use crate::resolve::MatchArgs;

#[derive(Debug, Parser)]
#[command(name = "palate-cli")]
#[command(about = "Restaurant entity resolution command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database and store maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Resolve a place against the configured store and print the match as JSON
    Match(MatchArgs),
    /// Print the great-circle distance in kilometres between two points
    Distance {
        #[arg(allow_negative_numbers = true)]
        lat1: f64,
        #[arg(allow_negative_numbers = true)]
        lng1: f64,
        #[arg(allow_negative_numbers = true)]
        lat2: f64,
        #[arg(allow_negative_numbers = true)]
        lng2: f64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let default_level =
        std::env::var("PALATE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;
    // stdout carries command output; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Db { command }) => db::run(command).await?,
        Some(Commands::Match(args)) => resolve::run(args).await?,
        Some(Commands::Distance {
            lat1,
            lng1,
            lat2,
            lng2,
        }) => {
            println!("{:.6}", palate_resolver::haversine_km((lat1, lng1), (lat2, lng2)));
        }
        None => println!("palate-cli ready; run with --help for commands"),
    }

    Ok(())
}

/// Seed path from `--path`, falling back to `PALATE_SEED_PATH`.
fn seed_path(explicit: Option<PathBuf>, config: &palate_core::AppConfig) -> PathBuf {
    explicit.unwrap_or_else(|| config.seed_path.clone())
}
