//! Configuration module
//!
//! Layers command-line flags over the environment configuration.

use anyhow::{Context, Result};
use codecommit_core::region::Region;
use codecommit_lifecycle::Config;
use tracing::debug;

/// Values given on the command line
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub region: Option<String>,
    pub endpoint: Option<String>,
    pub account_id: Option<String>,
    pub max_parallel_jobs: Option<usize>,
}

/// Loads configuration from the environment, then applies `overrides`
pub fn load_config(overrides: Overrides) -> Result<Config> {
    load_config_from(|key| std::env::var(key).ok(), overrides)
}

/// Loads configuration from `lookup`, then applies `overrides`
///
/// A malformed variable fails the load instead of falling back to defaults.
pub fn load_config_from<F>(lookup: F, overrides: Overrides) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config =
        Config::from_lookup(lookup).context("Invalid configuration in environment")?;

    if let Some(region) = overrides.region {
        config.region = Region::new(region).context("Invalid --region")?;
    }
    if let Some(endpoint) = overrides.endpoint {
        config.endpoint = Some(endpoint);
    }
    if let Some(account_id) = overrides.account_id {
        config.account_id = Some(account_id);
    }
    if let Some(jobs) = overrides.max_parallel_jobs {
        config.max_parallel_jobs = jobs;
    }

    config.validate()?;
    debug!(
        "Using region {} at {}",
        config.region,
        config.service_endpoint()
    );
    Ok(config)
}
