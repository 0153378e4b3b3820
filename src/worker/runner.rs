//! Sequential executor - fetches planned entries and applies hooks

use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::http::{DownloadError, HttpClient};
use crate::hooks::{FetchHook, HookContext};
use crate::modules::ResultEntry;
use crate::observability::Metrics;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("download failed: {0}")]
    Download(#[from] DownloadError),

    #[error("write failed: {0}")]
    Write(#[from] std::io::Error),
}

/// Totals for one executor run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub completed: usize,
    pub failed: usize,
}

/// Fetch each entry in order and apply the hook pipeline to each
/// successful download. Entries are independent: a failed entry is
/// logged and counted, never fatal to the run. A hook failure skips
/// only that hook.
pub async fn run_entries(
    entries: &[ResultEntry],
    hooks: &[Arc<dyn FetchHook>],
    dest_dir: &Path,
    client: &HttpClient,
    metrics: &Metrics,
) -> std::io::Result<RunReport> {
    tokio::fs::create_dir_all(dest_dir).await?;

    let run_id = Uuid::new_v4();
    let mut report = RunReport::default();

    for entry in entries {
        match process_entry(entry, hooks, dest_dir, client, metrics, run_id).await {
            Ok(()) => {
                report.completed += 1;
                metrics.download_completed();
            }
            Err(e) => {
                error!(%run_id, url = %entry.url, error = %e, "Entry failed");
                report.failed += 1;
                metrics.download_failed();
            }
        }
    }

    info!(
        %run_id,
        completed = report.completed,
        failed = report.failed,
        "Run finished"
    );
    Ok(report)
}

/// Process a single entry: download, write, hooks.
async fn process_entry(
    entry: &ResultEntry,
    hooks: &[Arc<dyn FetchHook>],
    dest_dir: &Path,
    client: &HttpClient,
    metrics: &Metrics,
    run_id: Uuid,
) -> Result<(), TaskError> {
    info!(%run_id, url = %entry.url, dest = %entry.dest_name, "Fetching");

    let bytes = client.fetch(&entry.url).await?;
    let path = dest_dir.join(&entry.dest_name);
    tokio::fs::write(&path, &bytes).await?;

    info!(%run_id, dest = %path.display(), size = bytes.len(), "Stored");

    apply_hooks(entry, &path, hooks, metrics, run_id).await;
    Ok(())
}

/// Apply the pipeline in declared order; a failing hook is logged and
/// the remaining hooks still run.
pub(crate) async fn apply_hooks(
    entry: &ResultEntry,
    path: &Path,
    hooks: &[Arc<dyn FetchHook>],
    metrics: &Metrics,
    run_id: Uuid,
) {
    let ctx = HookContext { entry, path };
    for hook in hooks {
        match hook.after_fetch(&ctx).await {
            Ok(()) => metrics.hook_applied(),
            Err(e) => {
                warn!(%run_id, hook = hook.name(), error = %e, "Hook failed, continuing");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::{AuditHook, ChecksumAlgo, ChecksumHook};
    use crate::modules::DataType;
    use crate::worker::http::HttpConfig;
    use tempfile::TempDir;

    fn entry() -> ResultEntry {
        ResultEntry::builder()
            .url("https://example.com/data.tif")
            .dest_name("data.tif")
            .data_type(DataType::Geotiff)
            .agency("Test")
            .title("Test")
            .build()
    }

    #[tokio::test]
    async fn test_empty_run_creates_dest_dir() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("out");
        let client = HttpClient::new(HttpConfig::default()).unwrap();
        let metrics = Metrics::new();

        let report = run_entries(&[], &[], &dest, &client, &metrics)
            .await
            .unwrap();

        assert_eq!(report, RunReport::default());
        assert!(dest.is_dir());
    }

    #[tokio::test]
    async fn test_failing_hook_does_not_stop_the_pipeline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.tif");
        tokio::fs::write(&path, b"payload").await.unwrap();

        // Audit into a directory that does not exist fails; checksum
        // after it must still run.
        let hooks: Vec<Arc<dyn FetchHook>> = vec![
            Arc::new(AuditHook::new(dir.path().join("missing/audit.json"))),
            Arc::new(ChecksumHook::new(ChecksumAlgo::Sha256)),
        ];

        let metrics = Metrics::new();
        let entry = entry();
        apply_hooks(&entry, &path, &hooks, &metrics, Uuid::new_v4()).await;

        assert!(dir.path().join("data.tif.sha256").exists());
        assert_eq!(metrics.snapshot().hooks_applied, 1);
    }
}
