//! Download executor
//!
//! Fetches each planned entry over HTTP, writes it under the
//! destination directory, and applies the resolved hook pipeline to
//! every successful download. Entries run sequentially and each gets a
//! single attempt; scheduling smarter than that is a different
//! component's job.

pub mod http;
pub mod runner;

pub use http::{DownloadError, HttpClient, HttpConfig};
pub use runner::{RunReport, TaskError, run_entries};
