//! Post-fetch hook system.
//!
//! A hook is one named, configurable operation applied to each fetched
//! file, in the order a preset declares. Hook names resolve through
//! [`HookRegistry`]; arguments come from the preset file as an untyped
//! JSON mapping and are decoded into each hook's own typed record at
//! the registry boundary.
//!
//! ## Built-in hooks
//!
//! - `checksum` - digest sidecar (`algo`: sha256 | sha512)
//! - `enrich` - metadata sidecar (`pretty`: bool)
//! - `audit` - append-only JSON-lines log (`file`: path)

mod audit;
mod checksum;
mod enrich;
mod registry;
mod traits;

pub use audit::AuditHook;
pub use checksum::{ChecksumAlgo, ChecksumHook};
pub use enrich::EnrichHook;
pub use registry::{HookFactory, HookRegistry, decode_args};
pub use traits::{FetchHook, HookContext, HookError};

use std::path::{Path, PathBuf};

/// Sidecar path next to a fetched file: the file's own path with a
/// suffix appended (not an extension swap, so `a.tif` → `a.tif.sha256`).
pub(crate) fn sidecar_path(path: &Path, suffix: &str) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(suffix);
    PathBuf::from(os)
}
