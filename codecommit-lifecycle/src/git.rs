//! Git clone collaborator
//!
//! Clones run through an external git executable. The destination is
//! checked before the tool is ever started.

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::CloneError;

/// Clones a remote repository into a local directory
#[async_trait]
pub trait GitCloner: Send + Sync {
    async fn clone_repository(&self, remote_url: &str, destination: &Path)
    -> Result<(), CloneError>;
}

/// Runs `<program> clone <url> <destination>`
#[derive(Debug, Clone)]
pub struct ProcessGitCloner {
    program: String,
}

impl ProcessGitCloner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Checks that the git executable can be started
    pub async fn check_available(&self) -> Result<String, CloneError> {
        let output = Command::new(&self.program)
            .arg("--version")
            .output()
            .await
            .map_err(|source| CloneError::ToolUnavailable {
                program: self.program.clone(),
                source,
            })?;

        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        debug!("Git is available: {}", version);
        Ok(version)
    }
}

#[async_trait]
impl GitCloner for ProcessGitCloner {
    async fn clone_repository(
        &self,
        remote_url: &str,
        destination: &Path,
    ) -> Result<(), CloneError> {
        info!("Cloning {} into {}", remote_url, destination.display());

        // Dropping the future (job cancellation) kills the child
        let output = Command::new(&self.program)
            .arg("clone")
            .arg("--")
            .arg(remote_url)
            .arg(destination)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| CloneError::ToolUnavailable {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(CloneError::CloneFailed {
                exit_code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

/// Rejects destinations git would refuse to clone into
pub async fn check_destination(destination: &Path) -> Result<(), CloneError> {
    let io_error = |source| CloneError::Io {
        path: destination.to_path_buf(),
        source,
    };

    let metadata = match tokio::fs::metadata(destination).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(io_error(e)),
    };

    if !metadata.is_dir() {
        return Err(CloneError::DestinationIsFile(destination.to_path_buf()));
    }

    let mut entries = tokio::fs::read_dir(destination).await.map_err(io_error)?;
    if entries.next_entry().await.map_err(io_error)?.is_some() {
        return Err(CloneError::DestinationNotEmpty(destination.to_path_buf()));
    }

    Ok(())
}
