mod commands;
mod config;
mod data;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::Level;

use commands::rank::RankArgs;
use commands::resolve::ResolveArgs;
use commands::stats::StatsArgs;

#[derive(Parser)]
#[command(name = "board", version)]
#[command(about = "Contest standings and freeze resolver", long_about = None)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file; the extension may be omitted
    #[arg(long, global = true, env = "BOARD_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the ranked standings
    Rank(RankArgs),
    /// Print the solved-count histogram and per-problem counters
    Stats(StatsArgs),
    /// Print the reveal sequence that turns the frozen board into the final one
    Resolve(ResolveArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = config::BoardConfig::load(cli.config.as_deref()).context("Failed to load config")?;

    match &cli.command {
        Commands::Rank(args) => commands::rank::run(args, &config),
        Commands::Stats(args) => commands::stats::run(args, &config),
        Commands::Resolve(args) => commands::resolve::run(args, &config),
    }
}
