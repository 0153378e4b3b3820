use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::traits::{FetchHook, HookError};

/// Constructs a live hook from the untyped argument mapping of a hook
/// specification. Each factory decodes the mapping into its own typed
/// record; the untyped `Value` never crosses this boundary.
pub type HookFactory = fn(&Value) -> Result<Arc<dyn FetchHook>, HookError>;

/// Decode hook arguments into a typed record.
///
/// An absent args object yields the record's defaults; unknown keys are
/// ignored; a type mismatch is a decode error for the caller to handle
/// per its own policy.
pub fn decode_args<T>(args: &Value) -> Result<T, HookError>
where
    T: DeserializeOwned + Default,
{
    if args.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(args.clone())
        .map_err(|e| HookError::InvalidArgs(e.to_string()))
}

/// Registry mapping hook names to factories.
///
/// A lookup table only — it never holds live hook instances. Populated
/// once up front (`with_defaults`), read-only during resolution.
#[derive(Clone)]
pub struct HookRegistry {
    factories: BTreeMap<&'static str, HookFactory>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, name: &'static str, factory: HookFactory) {
        self.factories.insert(name, factory);
    }

    /// Look up a factory by name. `None` is the not-found sentinel;
    /// unresolved names are dropped by the pipeline builder rather than
    /// raised, trading correctness-on-typo for robustness on partial
    /// configuration.
    pub fn get_hook(&self, name: &str) -> Option<HookFactory> {
        self.factories.get(name).copied()
    }

    /// Registered hook names in order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }

    /// Registry with the built-in hooks registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("checksum", super::checksum::ChecksumHook::from_args);
        registry.register("enrich", super::enrich::EnrichHook::from_args);
        registry.register("audit", super::audit::AuditHook::from_args);
        registry
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
