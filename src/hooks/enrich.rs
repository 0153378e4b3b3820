use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::info;

use super::registry::decode_args;
use super::sidecar_path;
use super::traits::{FetchHook, HookContext, HookError};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EnrichArgs {
    pretty: bool,
}

#[derive(Debug, Serialize)]
struct Sidecar<'a> {
    url: &'a str,
    title: &'a str,
    agency: &'a str,
    data_type: &'a str,
    content_type: String,
    size_bytes: u64,
    fetched_at: String,
}

/// Writes a `<file>.meta.json` sidecar describing the fetched resource:
/// provenance from the planned entry plus on-disk size and fetch time.
pub struct EnrichHook {
    pretty: bool,
}

impl EnrichHook {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    pub fn from_args(args: &Value) -> Result<Arc<dyn FetchHook>, HookError> {
        let args: EnrichArgs = decode_args(args)?;
        Ok(Arc::new(Self::new(args.pretty)))
    }
}

#[async_trait]
impl FetchHook for EnrichHook {
    fn name(&self) -> &'static str {
        "enrich"
    }

    async fn after_fetch(&self, ctx: &HookContext<'_>) -> Result<(), HookError> {
        let size_bytes = tokio::fs::metadata(ctx.path).await?.len();

        let sidecar = Sidecar {
            url: &ctx.entry.url,
            title: &ctx.entry.title,
            agency: &ctx.entry.agency,
            data_type: ctx.entry.data_type.as_str(),
            content_type: ctx.entry.data_type.mime().to_string(),
            size_bytes,
            fetched_at: OffsetDateTime::now_utc().format(&Rfc3339)?,
        };

        let json = if self.pretty {
            serde_json::to_string_pretty(&sidecar)?
        } else {
            serde_json::to_string(&sidecar)?
        };

        let out = sidecar_path(ctx.path, ".meta.json");
        tokio::fs::write(&out, json).await?;

        info!(file = %ctx.path.display(), size_bytes, "Metadata sidecar written");
        Ok(())
    }
}
