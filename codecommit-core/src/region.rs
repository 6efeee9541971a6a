//! Region and endpoint resolution

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Region used when nothing else is configured
pub const DEFAULT_REGION: &str = "us-east-1";

/// A validated region identifier such as `us-east-1` or `cn-north-1`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Region(String);

impl Region {
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        let parts: Vec<&str> = id.split('-').collect();
        let well_formed = parts.len() >= 3
            && parts.iter().all(|p| {
                !p.is_empty()
                    && p.chars()
                        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            })
            && parts
                .last()
                .is_some_and(|p| p.chars().all(|c| c.is_ascii_digit()));

        if !well_formed {
            return Err(ValidationError::InvalidRegion(id));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// DNS suffix of the partition this region belongs to
    pub fn dns_suffix(&self) -> &'static str {
        if self.0.starts_with("cn-") {
            "amazonaws.com.cn"
        } else {
            "amazonaws.com"
        }
    }

    /// Endpoint of the repository management API
    pub fn service_endpoint(&self) -> String {
        format!("https://codecommit.{}.{}", self.0, self.dns_suffix())
    }

    /// Host serving git traffic
    pub fn git_host(&self) -> String {
        format!("git-codecommit.{}.{}", self.0, self.dns_suffix())
    }

    /// Remote URL used to clone `repository`
    pub fn remote_url(&self, protocol: CloneProtocol, repository: &str) -> String {
        format!(
            "{}://{}/v1/repos/{}",
            protocol.scheme(),
            self.git_host(),
            repository
        )
    }

    /// Web console page for `repository`
    pub fn console_url(&self, repository: &str) -> String {
        format!(
            "https://{region}.console.aws.amazon.com/codesuite/codecommit/repositories/{repository}/browse?region={region}",
            region = self.0,
        )
    }
}

impl Default for Region {
    fn default() -> Self {
        Self(DEFAULT_REGION.to_string())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Region {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Region {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Region> for String {
    fn from(region: Region) -> Self {
        region.0
    }
}

/// Transport used for git remotes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloneProtocol {
    #[default]
    Https,
    Ssh,
}

impl CloneProtocol {
    pub fn scheme(&self) -> &'static str {
        match self {
            CloneProtocol::Https => "https",
            CloneProtocol::Ssh => "ssh",
        }
    }
}

impl fmt::Display for CloneProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scheme())
    }
}

impl FromStr for CloneProtocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "https" | "http" => Ok(CloneProtocol::Https),
            "ssh" => Ok(CloneProtocol::Ssh),
            other => Err(format!("unsupported clone protocol '{}'", other)),
        }
    }
}
