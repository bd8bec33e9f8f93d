// ABOUTME: Entry point for the flotilla CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use flotilla::config::{self, Config};
use flotilla::error::Result;
use flotilla::output::{Output, OutputMode};
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };
    let mut output = Output::new(mode);

    if let Err(e) = run(cli, &mut output).await {
        output.failure(&e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: &mut Output) -> Result<()> {
    let cwd = env::current_dir()?;

    match cli.command {
        Commands::Init {
            fleet,
            image,
            force,
        } => {
            config::init_config(&cwd, fleet.as_deref(), image.as_deref(), force)?;
            output.success(&format!("Wrote {}", config::CONFIG_FILENAME));
            Ok(())
        }
        Commands::Assign { timeout, delay } => {
            let config = Config::discover(&cwd)?;
            commands::assign(config, timeout, delay, output).await
        }
        Commands::CreateIp { timeout, delay } => {
            let config = Config::discover(&cwd)?;
            commands::create_ip(config, timeout, delay, output).await
        }
        Commands::Status => {
            let config = Config::discover(&cwd)?;
            commands::status(config, output).await
        }
        Commands::List { filter, exclude } => {
            let config = Config::discover(&cwd)?;
            commands::list(config, filter, exclude, output).await
        }
        Commands::Prune { idle, dry_run } => {
            let config = Config::discover(&cwd)?;
            commands::prune(config, idle, dry_run, output).await
        }
        Commands::Wait { retries, delay } => {
            let config = Config::discover(&cwd)?;
            commands::wait(config, retries, delay, output).await
        }
    }
}
