//! HTTP client for downloading resources

use bytes::Bytes;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::config::DownloadConfig;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("Connection timeout")]
    Timeout,

    #[error("HTTP status {0}")]
    BadStatus(u16),

    #[error("Response too large: {got} bytes exceeds limit of {limit}")]
    TooLarge { got: u64, limit: u64 },
}

pub type Result<T> = std::result::Result<T, DownloadError>;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
    pub max_download_bytes: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(300),
            user_agent: concat!("geofetch/", env!("CARGO_PKG_VERSION")).to_string(),
            max_download_bytes: 8 * 1024 * 1024 * 1024,
        }
    }
}

impl From<&DownloadConfig> for HttpConfig {
    fn from(config: &DownloadConfig) -> Self {
        Self {
            connect_timeout: Duration::from_secs(config.connect_timeout_secs),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            user_agent: config.user_agent.clone(),
            max_download_bytes: config.max_download_bytes.as_u64(),
        }
    }
}

/// HTTP downloader.
///
/// Single attempt per request: retry, backoff, auth and rate limiting
/// are out of scope here.
pub struct HttpClient {
    client: Client,
    config: HttpConfig,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(config: HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| DownloadError::RequestFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// GET a resource into memory, enforcing the configured size cap
    /// against both the advertised length and the received body.
    pub async fn fetch(&self, url: &str) -> Result<Bytes> {
        let limit = self.config.max_download_bytes;

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                DownloadError::Timeout
            } else {
                DownloadError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::BadStatus(status.as_u16()));
        }

        if let Some(len) = response.content_length() {
            if len > limit {
                return Err(DownloadError::TooLarge { got: len, limit });
            }
        }

        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                DownloadError::Timeout
            } else {
                DownloadError::RequestFailed(e.to_string())
            }
        })?;

        if bytes.len() as u64 > limit {
            return Err(DownloadError::TooLarge {
                got: bytes.len() as u64,
                limit,
            });
        }

        debug!(url, size = bytes.len(), "Fetched");
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpConfig::default();
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.request_timeout, Duration::from_secs(300));
        assert!(config.user_agent.starts_with("geofetch/"));
    }

    #[test]
    fn test_config_from_download_section() {
        let section = DownloadConfig::default();
        let config = HttpConfig::from(&section);
        assert_eq!(
            config.connect_timeout,
            Duration::from_secs(section.connect_timeout_secs)
        );
        assert_eq!(config.max_download_bytes, section.max_download_bytes.as_u64());
    }

    #[test]
    fn test_client_builds_from_defaults() {
        assert!(HttpClient::new(HttpConfig::default()).is_ok());
    }
}
