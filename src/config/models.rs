use crate::humanize::ByteSize;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub download: DownloadConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Download client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DownloadConfig {
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Upper bound on a single transfer; oversize responses are
    /// rejected, not truncated.
    #[serde(default = "default_max_download_bytes")]
    pub max_download_bytes: ByteSize,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
            max_download_bytes: default_max_download_bytes(),
        }
    }
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    300
}

fn default_user_agent() -> String {
    concat!("geofetch/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_max_download_bytes() -> ByteSize {
    ByteSize(8 * 1024 * 1024 * 1024) // 8 GB
}

/// Output layout configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Directory fetched files land in unless overridden on the CLI.
    #[serde(default = "default_dest_dir")]
    pub dest_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dest_dir: default_dest_dir(),
        }
    }
}

fn default_dest_dir() -> PathBuf {
    PathBuf::from(".")
}
