//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod repository;

use anyhow::Result;
use clap::Subcommand;
use codecommit_core::region::CloneProtocol;
use codecommit_lifecycle::Config;
use std::path::PathBuf;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// List repositories
    List,
    /// Create a repository
    Create {
        /// Repository name (100 character limit)
        name: String,

        /// Repository description (1000 character limit)
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a repository permanently
    Delete {
        /// Repository name
        name: String,

        /// Repository name typed again; prompted for when omitted
        #[arg(long)]
        confirm: Option<String>,
    },
    /// Clone a repository with git
    Clone {
        /// Repository name
        name: String,

        /// Target directory, defaults to the repository name
        #[arg(short, long)]
        destination: Option<PathBuf>,

        /// Remote transport (https or ssh)
        #[arg(long)]
        protocol: Option<CloneProtocol>,
    },
    /// Show a repository's details
    Open {
        /// Repository name
        name: String,

        /// Print the reference as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Handle a CLI command
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The resolved configuration
pub async fn handle_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::List => repository::list(&config).await,
        Commands::Create { name, description } => {
            repository::create(config, name, description).await
        }
        Commands::Delete { name, confirm } => repository::delete(config, name, confirm).await,
        Commands::Clone {
            name,
            destination,
            protocol,
        } => {
            let config = match protocol {
                Some(protocol) => config.with_clone_protocol(protocol),
                None => config,
            };
            repository::clone(config, name, destination).await
        }
        Commands::Open { name, json } => repository::open(config, name, json).await,
    }
}
