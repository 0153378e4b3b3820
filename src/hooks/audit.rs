use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tokio::io::AsyncWriteExt;
use tracing::info;

use super::registry::decode_args;
use super::traits::{FetchHook, HookContext, HookError};

fn default_audit_file() -> PathBuf {
    PathBuf::from("fetch_audit.json")
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct AuditArgs {
    file: PathBuf,
}

impl Default for AuditArgs {
    fn default() -> Self {
        Self {
            file: default_audit_file(),
        }
    }
}

#[derive(Debug, Serialize)]
struct AuditRecord<'a> {
    timestamp: String,
    url: &'a str,
    dest_name: &'a str,
    data_type: &'a str,
    size_bytes: u64,
}

/// Appends one JSON line per fetched entry to an audit log file.
///
/// The log is append-only; concurrent runs interleave records rather
/// than clobbering each other.
pub struct AuditHook {
    file: PathBuf,
}

impl AuditHook {
    pub fn new(file: PathBuf) -> Self {
        Self { file }
    }

    pub fn from_args(args: &Value) -> Result<Arc<dyn FetchHook>, HookError> {
        let args: AuditArgs = decode_args(args)?;
        Ok(Arc::new(Self::new(args.file)))
    }
}

#[async_trait]
impl FetchHook for AuditHook {
    fn name(&self) -> &'static str {
        "audit"
    }

    async fn after_fetch(&self, ctx: &HookContext<'_>) -> Result<(), HookError> {
        let size_bytes = tokio::fs::metadata(ctx.path).await?.len();

        let record = AuditRecord {
            timestamp: OffsetDateTime::now_utc().format(&Rfc3339)?,
            url: &ctx.entry.url,
            dest_name: &ctx.entry.dest_name,
            data_type: ctx.entry.data_type.as_str(),
            size_bytes,
        };

        let mut line = serde_json::to_string(&record)?;
        line.push('\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        info!(log = %self.file.display(), url = %ctx.entry.url, "Audit record appended");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::{DataType, ResultEntry};
    use tempfile::TempDir;

    fn entry(url: &str, dest: &str) -> ResultEntry {
        ResultEntry::builder()
            .url(url)
            .dest_name(dest)
            .data_type(DataType::Zip)
            .agency("Test")
            .title("Test")
            .build()
    }

    #[tokio::test]
    async fn test_appends_one_line_per_entry() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("audit.json");
        let payload = dir.path().join("a.zip");
        tokio::fs::write(&payload, b"zip").await.unwrap();

        let hook = AuditHook::new(log.clone());

        for url in ["https://example.com/a", "https://example.com/b"] {
            let entry = entry(url, "a.zip");
            hook.after_fetch(&HookContext {
                entry: &entry,
                path: &payload,
            })
            .await
            .unwrap();
        }

        let contents = std::fs::read_to_string(&log).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["url"], "https://example.com/a");
        assert_eq!(first["size_bytes"], 3);
    }

    #[tokio::test]
    async fn test_file_arg_overrides_default() {
        let dir = TempDir::new().unwrap();
        let custom = dir.path().join("archive_log.json");
        let payload = dir.path().join("b.zip");
        tokio::fs::write(&payload, b"data").await.unwrap();

        let hook = AuditHook::from_args(&serde_json::json!({
            "file": custom.to_str().unwrap()
        }))
        .unwrap();

        let entry = entry("https://example.com/c", "b.zip");
        hook.after_fetch(&HookContext {
            entry: &entry,
            path: &payload,
        })
        .await
        .unwrap();

        assert!(custom.exists());
    }
}
