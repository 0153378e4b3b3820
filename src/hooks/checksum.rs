use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use sha2::{Digest, Sha256, Sha512};
use std::sync::Arc;
use tracing::info;

use super::registry::decode_args;
use super::sidecar_path;
use super::traits::{FetchHook, HookContext, HookError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecksumAlgo {
    #[default]
    Sha256,
    Sha512,
}

impl ChecksumAlgo {
    fn as_str(&self) -> &'static str {
        match self {
            ChecksumAlgo::Sha256 => "sha256",
            ChecksumAlgo::Sha512 => "sha512",
        }
    }

    fn digest_hex(&self, data: &[u8]) -> String {
        match self {
            ChecksumAlgo::Sha256 => hex::encode(Sha256::digest(data)),
            ChecksumAlgo::Sha512 => hex::encode(Sha512::digest(data)),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ChecksumArgs {
    algo: ChecksumAlgo,
}

/// Writes a digest sidecar next to the fetched file.
///
/// The sidecar is named `<file>.<algo>` and uses the coreutils
/// `<hex digest>  <filename>` format, so `sha256sum -c` can verify it.
pub struct ChecksumHook {
    algo: ChecksumAlgo,
}

impl ChecksumHook {
    pub fn new(algo: ChecksumAlgo) -> Self {
        Self { algo }
    }

    pub fn from_args(args: &Value) -> Result<Arc<dyn FetchHook>, HookError> {
        let args: ChecksumArgs = decode_args(args)?;
        Ok(Arc::new(Self::new(args.algo)))
    }
}

#[async_trait]
impl FetchHook for ChecksumHook {
    fn name(&self) -> &'static str {
        "checksum"
    }

    async fn after_fetch(&self, ctx: &HookContext<'_>) -> Result<(), HookError> {
        let data = tokio::fs::read(ctx.path).await?;
        let digest = self.algo.digest_hex(&data);

        let sidecar = sidecar_path(ctx.path, &format!(".{}", self.algo.as_str()));
        let line = format!("{}  {}\n", digest, ctx.entry.dest_name);
        tokio::fs::write(&sidecar, line).await?;

        info!(
            file = %ctx.path.display(),
            algo = self.algo.as_str(),
            digest,
            "Checksum written"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::{DataType, ResultEntry};
    use tempfile::TempDir;

    fn entry(dest: &str) -> ResultEntry {
        ResultEntry::builder()
            .url("https://example.com/file")
            .dest_name(dest)
            .data_type(DataType::Geotiff)
            .agency("Test")
            .title("Test")
            .build()
    }

    #[tokio::test]
    async fn test_writes_sha256_sidecar() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.tif");
        tokio::fs::write(&path, b"hello world").await.unwrap();

        let hook = ChecksumHook::new(ChecksumAlgo::Sha256);
        let entry = entry("data.tif");
        hook.after_fetch(&HookContext {
            entry: &entry,
            path: &path,
        })
        .await
        .unwrap();

        let sidecar = std::fs::read_to_string(dir.path().join("data.tif.sha256")).unwrap();
        assert_eq!(
            sidecar,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9  data.tif\n"
        );
    }

    #[tokio::test]
    async fn test_algo_from_args() {
        let hook =
            ChecksumHook::from_args(&serde_json::json!({"algo": "sha512"})).unwrap();
        assert_eq!(hook.name(), "checksum");

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.bin");
        tokio::fs::write(&path, b"x").await.unwrap();

        let entry = entry("data.bin");
        hook.after_fetch(&HookContext {
            entry: &entry,
            path: &path,
        })
        .await
        .unwrap();

        assert!(dir.path().join("data.bin.sha512").exists());
    }

    #[test]
    fn test_unknown_algo_rejected_at_decode() {
        let result = ChecksumHook::from_args(&serde_json::json!({"algo": "crc32"}));
        assert!(matches!(result, Err(HookError::InvalidArgs(_))));
    }
}
