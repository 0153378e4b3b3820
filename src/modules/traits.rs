use thiserror::Error;

use super::types::ResultEntry;

/// Module errors
#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("invalid options: {0}")]
    InvalidOptions(String),
    #[error("planning failed: {0}")]
    Planning(String),
}

/// Data-source plugin contract.
///
/// A module is constructed from an optional region plus its own named
/// options (construction never fails; see `ModuleArgs`), then `run`
/// plans zero or more entries into the module's result set. A module
/// that needs a region and has none plans nothing — that is a legitimate
/// empty result, not an error.
///
/// `run` is a pure computation over the configuration: no network I/O
/// happens here. Calling it twice appends a second batch of entries.
pub trait FetchModule: Send + Sync {
    /// Stable name, matching the registry key.
    fn name(&self) -> &'static str;

    /// Plan fetchable resources into the result set.
    fn run(&mut self) -> Result<(), ModuleError>;

    /// Entries accumulated so far.
    fn results(&self) -> &[ResultEntry];

    /// Drain accumulated entries for handoff to the download runner.
    fn take_results(&mut self) -> Vec<ResultEntry>;
}
