use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

use crate::modules::ResultEntry;

/// Hook errors
#[derive(Debug, Error)]
pub enum HookError {
    #[error("invalid hook arguments: {0}")]
    InvalidArgs(String),
    #[error("I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("timestamp formatting failed: {0}")]
    Timestamp(#[from] time::error::Format),
}

/// Context handed to hooks after a successful fetch.
#[derive(Debug, Clone, Copy)]
pub struct HookContext<'a> {
    /// The planned entry the file was fetched from.
    pub entry: &'a ResultEntry,
    /// Where the fetched payload landed on disk.
    pub path: &'a Path,
}

/// One named post-fetch operation.
///
/// Hooks run in the order the preset declares them, once per fetched
/// entry. A failing hook is the runner's problem to log; it must not
/// stop the remaining hooks or entries.
#[async_trait]
pub trait FetchHook: Send + Sync {
    /// Stable name, matching the registry key. Used in logs.
    fn name(&self) -> &'static str;

    /// Apply the operation to a fetched file.
    async fn after_fetch(&self, ctx: &HookContext<'_>) -> Result<(), HookError>;
}
