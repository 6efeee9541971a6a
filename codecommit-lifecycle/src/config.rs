//! Lifecycle configuration
//!
//! Region, endpoint and clone settings passed explicitly into the client
//! and the scheduler. Nothing here is process-wide state.

use anyhow::Context;
use codecommit_core::region::{CloneProtocol, DEFAULT_REGION, Region};
use std::path::{Path, PathBuf};

/// Lifecycle configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Region repositories live in
    pub region: Region,

    /// Overrides the region's service endpoint (e.g., a local emulator)
    pub endpoint: Option<String>,

    /// Account shown alongside opened repositories
    pub account_id: Option<String>,

    /// Max lifecycle jobs running at the same time
    pub max_parallel_jobs: usize,

    /// Git executable used for clones
    pub git_program: String,

    /// Transport of clone remotes
    pub clone_protocol: CloneProtocol,

    /// Base directory for relative clone destinations
    pub clone_root: PathBuf,
}

impl Config {
    /// Creates a configuration for `region` with defaults
    pub fn new(region: Region) -> Self {
        Self {
            region,
            endpoint: None,
            account_id: None,
            max_parallel_jobs: 4,
            git_program: "git".to_string(),
            clone_protocol: CloneProtocol::Https,
            clone_root: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables (all optional):
    /// - CODECOMMIT_REGION, falling back to AWS_REGION (default: us-east-1)
    /// - CODECOMMIT_ENDPOINT
    /// - AWS_ACCOUNT_ID
    /// - CODECOMMIT_MAX_PARALLEL_JOBS (default: 4)
    /// - CODECOMMIT_GIT_PROGRAM (default: git)
    /// - CODECOMMIT_CLONE_PROTOCOL (https or ssh, default: https)
    /// - CODECOMMIT_CLONE_ROOT (default: current directory)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates configuration from `lookup`, read the same way as the
    /// environment in [`from_env`](Self::from_env)
    ///
    /// Empty values count as unset. A malformed value is an error rather
    /// than a silent default.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let region = var("CODECOMMIT_REGION")
            .or_else(|| var("AWS_REGION"))
            .unwrap_or_else(|| DEFAULT_REGION.to_string());
        let region = Region::new(region).context("Invalid region in environment")?;

        let mut config = Self::new(region);

        config.endpoint = var("CODECOMMIT_ENDPOINT");
        config.account_id = var("AWS_ACCOUNT_ID");

        if let Some(jobs) = var("CODECOMMIT_MAX_PARALLEL_JOBS") {
            config.max_parallel_jobs = jobs
                .parse()
                .context("CODECOMMIT_MAX_PARALLEL_JOBS must be a number")?;
        }

        if let Some(program) = var("CODECOMMIT_GIT_PROGRAM") {
            config.git_program = program;
        }

        if let Some(protocol) = var("CODECOMMIT_CLONE_PROTOCOL") {
            config.clone_protocol = protocol
                .parse()
                .map_err(anyhow::Error::msg)
                .context("Invalid CODECOMMIT_CLONE_PROTOCOL")?;
        }

        if let Some(root) = var("CODECOMMIT_CLONE_ROOT") {
            config.clone_root = PathBuf::from(root);
        }

        Ok(config)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    pub fn with_max_parallel_jobs(mut self, max_parallel_jobs: usize) -> Self {
        self.max_parallel_jobs = max_parallel_jobs;
        self
    }

    pub fn with_clone_protocol(mut self, protocol: CloneProtocol) -> Self {
        self.clone_protocol = protocol;
        self
    }

    pub fn with_clone_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.clone_root = root.into();
        self
    }

    pub fn with_git_program(mut self, program: impl Into<String>) -> Self {
        self.git_program = program.into();
        self
    }

    /// Endpoint of the repository service
    pub fn service_endpoint(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| self.region.service_endpoint())
    }

    /// Resolves a clone destination against `clone_root`
    pub fn resolve_destination(&self, destination: &Path) -> PathBuf {
        if destination.is_absolute() {
            destination.to_path_buf()
        } else {
            self.clone_root.join(destination)
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_parallel_jobs == 0 {
            anyhow::bail!("max_parallel_jobs must be greater than 0");
        }

        if let Some(endpoint) = &self.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                anyhow::bail!("endpoint must start with http:// or https://");
            }
        }

        if self.git_program.trim().is_empty() {
            anyhow::bail!("git_program cannot be empty");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Region::default())
    }
}
