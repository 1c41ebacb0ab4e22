//! CLI interface for crosslike

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::{bot, config, stats};

#[derive(Parser)]
#[command(name = "crosslike")]
#[command(about = "Automation client for a dating-platform crossings API", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one full pass: authenticate, fetch crossings, like/dislike (default)
    Run {
        /// Maximum number of crossings to fetch
        #[arg(short, long)]
        limit: Option<u32>,
        /// Path of the liked-users file (overrides the configured one)
        #[arg(long)]
        likes_file: Option<PathBuf>,
    },
    /// Tabulate attribute values across all liked users
    Stats {
        /// Path of the liked-users file (overrides the configured one)
        #[arg(long)]
        likes_file: Option<PathBuf>,
    },
    /// Show the current configuration
    Config,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        // Bare invocation performs one pass and exits
        None => run_pass(None, None).await,
        Some(Commands::Run { limit, likes_file }) => run_pass(limit, likes_file).await,
        Some(Commands::Stats { likes_file }) => {
            let config = config::Config::load()?;
            let path = match likes_file {
                Some(path) => path,
                None => config.store.likes_path()?,
            };
            stats::show_stats(&path)
        }
        Some(Commands::Config) => config::show_config(),
    }
}

async fn run_pass(limit: Option<u32>, likes_file: Option<PathBuf>) -> Result<()> {
    let config = config::Config::load()?;
    let summary = bot::run_once(&config, limit, likes_file).await?;
    println!("{}", summary);
    Ok(())
}
