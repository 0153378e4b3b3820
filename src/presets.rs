//! User presets: named, persisted hook pipelines.
//!
//! A preset is an ordered list of hook specifications stored in a single
//! JSON file at `~/.geofetch/presets.json`:
//!
//! ```json
//! {
//!   "presets": {
//!     "archive-ready": {
//!       "help": "Checksum, enrich, audit to archive_log.json",
//!       "hooks": [
//!         {"name": "checksum", "args": {"algo": "sha256"}},
//!         {"name": "enrich"},
//!         {"name": "audit", "args": {"file": "archive_log.json"}}
//!       ]
//!     }
//!   }
//! }
//! ```
//!
//! The file is read-only to this crate and re-read on every resolution
//! request. A missing or unparsable file degrades to an empty preset
//! set; it never propagates an error.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::hooks::{FetchHook, HookRegistry};

/// One hook invocation inside a preset: registry name plus the untyped
/// argument mapping handed to the hook's factory.
#[derive(Debug, Clone, Deserialize)]
pub struct HookSpec {
    pub name: String,
    #[serde(default)]
    pub args: Value,
}

/// A named, ordered hook pipeline definition.
#[derive(Debug, Clone, Deserialize)]
pub struct Preset {
    #[serde(default)]
    pub help: String,
    #[serde(default)]
    pub hooks: Vec<HookSpec>,
}

#[derive(Debug, Default, Deserialize)]
struct PresetFile {
    #[serde(default)]
    presets: BTreeMap<String, Preset>,
}

/// Read-only view of the user's preset file.
pub struct PresetStore {
    path: Option<PathBuf>,
}

impl PresetStore {
    /// Store backed by the fixed user-scoped path.
    pub fn user() -> Self {
        Self {
            path: home::home_dir().map(|h| h.join(".geofetch").join("presets.json")),
        }
    }

    /// Store backed by an explicit path. Used by tests.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Load all presets fresh from the backing file.
    pub fn load(&self) -> BTreeMap<String, Preset> {
        let Some(path) = &self.path else {
            debug!("No home directory resolved, no user presets");
            return BTreeMap::new();
        };

        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No preset file");
                return BTreeMap::new();
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not read presets");
                return BTreeMap::new();
            }
        };

        match serde_json::from_str::<PresetFile>(&raw) {
            Ok(file) => file.presets,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not parse presets");
                BTreeMap::new()
            }
        }
    }

    /// Resolve one preset by name, reading the file fresh.
    pub fn get(&self, name: &str) -> Option<Preset> {
        self.load().remove(name)
    }
}

/// Resolve hook specifications into live hooks, preserving declared
/// order exactly — execution order is a user-controlled contract
/// ("checksum before audit" matters), so this layer never reorders,
/// dedups, or parallelizes.
///
/// An unknown hook name is skipped without error (see the registry's
/// sentinel policy); a factory that rejects its arguments is logged and
/// skipped the same way.
pub fn hook_pipeline(
    specs: &[HookSpec],
    registry: &HookRegistry,
) -> Vec<Arc<dyn FetchHook>> {
    let mut hooks = Vec::with_capacity(specs.len());
    for spec in specs {
        let Some(factory) = registry.get_hook(&spec.name) else {
            warn!(hook = %spec.name, "Unknown hook in preset, skipping");
            continue;
        };
        match factory(&spec.args) {
            Ok(hook) => hooks.push(hook),
            Err(e) => {
                warn!(hook = %spec.name, error = %e, "Hook rejected its arguments, skipping");
            }
        }
    }
    hooks
}
