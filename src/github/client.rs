use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Semaphore, SemaphorePermit};

use crate::error::{AppError, Result};
use crate::models::RemoteEntry;

pub const DEFAULT_API_ROOT: &str = "https://api.github.com";

/// What to do when a single file's content cannot be retrieved.
///
/// Listing failures always abort the fetch; this only governs leaf files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileErrorPolicy {
    /// Log a warning and leave the file out of the snapshot.
    #[default]
    Skip,
    /// Abort the whole fetch with the file's error.
    FailFast,
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub api_root: String,
    pub token: Option<String>,
    /// Maximum entries of one directory fetched at a time.
    pub concurrency: usize,
    /// Maximum HTTP requests in flight across the whole walk.
    pub max_in_flight: usize,
    /// Per-call timeout on the HTTP client.
    pub http_timeout: Duration,
    /// Deadline for a whole repository fetch.
    pub request_timeout: Duration,
    pub file_errors: FileErrorPolicy,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            api_root: DEFAULT_API_ROOT.to_string(),
            token: None,
            concurrency: 8,
            max_in_flight: 32,
            http_timeout: Duration::from_secs(30),
            request_timeout: Duration::from_secs(300),
            file_errors: FileErrorPolicy::default(),
        }
    }
}

pub struct GithubClient {
    http: Client,
    permits: Semaphore,
    config: FetchConfig,
}

impl GithubClient {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );

        if let Some(token) = config.token.as_deref().filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| AppError::Internal("GitHub token is not a valid header value".to_string()))?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        }

        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            http,
            permits: Semaphore::new(config.max_in_flight.max(1)),
            config,
        })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Held for the duration of one request, including reading its body.
    async fn permit(&self) -> Result<SemaphorePermit<'_>> {
        self.permits
            .acquire()
            .await
            .map_err(|_| AppError::Internal("Request limiter closed".to_string()))
    }

    /// Lists one directory. The body must be a JSON array of entries.
    pub async fn list_directory(&self, url: &str) -> Result<Vec<RemoteEntry>> {
        tracing::debug!("Listing {}", url);
        let _permit = self.permit().await?;
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Remote {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let value: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| AppError::Format(format!("{} returned invalid JSON: {}", url, e)))?;

        if !value.is_array() {
            return Err(AppError::Format(format!(
                "expected a list of entries from {}",
                url
            )));
        }

        serde_json::from_value(value)
            .map_err(|e| AppError::Format(format!("malformed entry from {}: {}", url, e)))
    }

    /// Downloads a file's raw content as text.
    pub async fn get_raw(&self, url: &str) -> Result<String> {
        let _permit = self.permit().await?;
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Remote {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

pub type SharedClient = Arc<GithubClient>;
