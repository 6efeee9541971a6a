//! CodeCommit CLI
//!
//! Command-line front end for repository lifecycle operations.

mod commands;
mod config;
mod view;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Overrides;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "codecommit")]
#[command(about = "Create, clone, delete and open CodeCommit repositories", long_about = None)]
struct Cli {
    /// Region repositories live in
    #[arg(long, env = "CODECOMMIT_REGION")]
    region: Option<String>,

    /// Service endpoint override (e.g. a local emulator)
    #[arg(long, env = "CODECOMMIT_ENDPOINT")]
    endpoint: Option<String>,

    /// Account shown alongside opened repositories
    #[arg(long, env = "AWS_ACCOUNT_ID")]
    account_id: Option<String>,

    /// Maximum number of operations running at once
    #[arg(long)]
    max_parallel_jobs: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "codecommit_cli=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = config::load_config(Overrides {
        region: cli.region,
        endpoint: cli.endpoint,
        account_id: cli.account_id,
        max_parallel_jobs: cli.max_parallel_jobs,
    })?;

    handle_command(cli.command, config).await
}
