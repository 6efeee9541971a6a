//! CodeCommit Client
//!
//! The [`RepositoryClient`] contract the lifecycle core depends on, and an
//! HTTP implementation speaking the service's JSON 1.1 protocol.
//!
//! # Example
//!
//! ```no_run
//! use codecommit_client::{CodeCommitClient, RepositoryClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = CodeCommitClient::new("https://codecommit.us-east-1.amazonaws.com");
//!
//!     for repository in client.list().await? {
//!         println!("{}", repository.name);
//!     }
//!     Ok(())
//! }
//! ```

mod client;
pub mod error;
mod repositories;

pub use client::RepositoryClient;
pub use error::{ClientError, Result};

use codecommit_core::dto::repository::ServiceErrorBody;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// API version prefix of the `X-Amz-Target` header
const TARGET_PREFIX: &str = "CodeCommit_20150413";

/// Content type of the JSON 1.1 protocol
const CONTENT_TYPE: &str = "application/x-amz-json-1.1";

/// HTTP client for the repository service
///
/// Request signing is the transport's concern: pass a preconfigured
/// `reqwest::Client` through [`with_client`](Self::with_client) when the
/// endpoint requires it.
#[derive(Debug, Clone)]
pub struct CodeCommitClient {
    /// Service endpoint (e.g., "https://codecommit.us-east-1.amazonaws.com")
    endpoint: String,
    /// HTTP client instance
    client: Client,
}

impl CodeCommitClient {
    /// Create a new client for the given endpoint
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(endpoint, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use codecommit_client::CodeCommitClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = CodeCommitClient::with_client("http://localhost:4566", http_client);
    /// ```
    pub fn with_client(endpoint: impl Into<String>, client: Client) -> Self {
        let endpoint = endpoint.into();
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the service endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    // =============================================================================
    // Protocol
    // =============================================================================

    /// Invoke a service action and deserialize its JSON output
    async fn call<I, O>(&self, action: &str, input: &I) -> Result<O>
    where
        I: Serialize + ?Sized,
        O: DeserializeOwned,
    {
        debug!("Calling {} on {}", action, self.endpoint);

        let response = self
            .client
            .post(format!("{}/", self.endpoint))
            .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE)
            .header("X-Amz-Target", format!("{}.{}", TARGET_PREFIX, action))
            .body(
                serde_json::to_vec(input)
                    .map_err(|e| ClientError::InternalError(format!("Failed to encode request: {}", e)))?,
            )
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Check the status code and decode either the output or the error body
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(service_error(status.as_u16(), &body));
        }

        // Actions with no output may answer with an empty body
        let body: &[u8] = if body.is_empty() { b"{}" } else { &body };

        serde_json::from_slice(body)
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

/// Build a [`ClientError`] from a non-2xx response body
fn service_error(status: u16, body: &[u8]) -> ClientError {
    let parsed: ServiceErrorBody = serde_json::from_slice(body).unwrap_or_default();
    let code = parsed.code().unwrap_or("UnknownError").to_string();
    let message = parsed.message.unwrap_or_else(|| {
        let text = String::from_utf8_lossy(body).trim().to_string();
        if text.is_empty() {
            format!("Request failed with status {}", status)
        } else {
            text
        }
    });
    ClientError::service(status, code, message)
}
