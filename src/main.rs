//! Ecole CLI entry point.

use anyhow::Result;
use clap::Parser;

use ecole::cli::commands::{analyst, attempt, play, task};
use ecole::cli::{handle_error, load_config, AppContext, Cli, Commands};
use ecole::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;

    if let Err(err) = run(cli).await {
        handle_error(err, json_mode);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let _logger = LoggerImpl::init(&LogConfig::try_from(&config.logging)?)?;
    let ctx = AppContext::open(config).await?;

    match cli.command {
        Commands::Play(args) => play::execute(args, &ctx, cli.json).await,
        Commands::Task(args) => task::execute(args, &ctx, cli.json).await,
        Commands::Attempt(args) => attempt::execute(args, &ctx, cli.json).await,
        Commands::Analyst(args) => analyst::execute(args, &ctx, cli.json).await,
    }
}
