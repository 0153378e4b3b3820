use std::collections::BTreeMap;
use thiserror::Error;

use super::traits::FetchModule;
use super::types::{ModuleArgs, Region};

/// Kind of a module option, used by the CLI layer to render flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Free-form text value.
    Text,
    /// Boolean switch.
    Flag,
}

/// One declared module option: name, help text, kind.
///
/// The core only exposes this schema; argument parsing itself lives in
/// the CLI layer.
#[derive(Debug, Clone, Copy)]
pub struct OptionSpec {
    pub name: &'static str,
    pub help: &'static str,
    pub kind: OptionKind,
}

/// User-facing description of a registered module.
#[derive(Debug, Clone, Copy)]
pub struct ModuleDescriptor {
    pub name: &'static str,
    pub help: &'static str,
    pub options: &'static [OptionSpec],
}

/// Constructs a module from a region and its named options. Construction
/// is infallible; validation is deferred to `run`.
pub type ModuleFactory = fn(Option<Region>, ModuleArgs) -> Box<dyn FetchModule>;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("module not found: {0}")]
    NotFound(String),
}

/// Registry mapping module names to descriptors and factories.
///
/// Registration is append-only and happens before any lookup
/// (`with_defaults` registers the built-in set up front); lookups are
/// read-only thereafter.
#[derive(Clone)]
pub struct ModuleRegistry {
    modules: BTreeMap<&'static str, (ModuleDescriptor, ModuleFactory)>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self {
            modules: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, descriptor: ModuleDescriptor, factory: ModuleFactory) {
        self.modules.insert(descriptor.name, (descriptor, factory));
    }

    /// Look up a module by name. Unlike hook lookup, an unknown module
    /// name is a hard error: it is the one user typo that must not
    /// degrade to an empty run.
    pub fn get(&self, name: &str) -> Result<&ModuleDescriptor, RegistryError> {
        self.modules
            .get(name)
            .map(|(descriptor, _)| descriptor)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    /// Construct a module instance by name.
    pub fn build(
        &self,
        name: &str,
        region: Option<Region>,
        args: ModuleArgs,
    ) -> Result<Box<dyn FetchModule>, RegistryError> {
        let (_, factory) = self
            .modules
            .get(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;
        Ok(factory(region, args))
    }

    /// Registered descriptors in name order.
    pub fn descriptors(&self) -> impl Iterator<Item = &ModuleDescriptor> {
        self.modules.values().map(|(descriptor, _)| descriptor)
    }

    /// Registry with all built-in modules registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(super::gebco::DESCRIPTOR, super::gebco::factory);
        registry
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_contain_gebco() {
        let registry = ModuleRegistry::with_defaults();
        let descriptor = registry.get("gebco").unwrap();
        assert_eq!(descriptor.name, "gebco");
        assert!(!descriptor.options.is_empty());
    }

    #[test]
    fn test_unknown_module_is_an_error() {
        let registry = ModuleRegistry::with_defaults();
        let result = registry.get("nonexistent");
        assert!(matches!(result, Err(RegistryError::NotFound(_))));
    }

    #[test]
    fn test_build_constructs_module() {
        let registry = ModuleRegistry::with_defaults();
        let module = registry
            .build("gebco", None, ModuleArgs::new())
            .unwrap();
        assert_eq!(module.name(), "gebco");
    }

    #[test]
    fn test_descriptors_iterate_in_name_order() {
        let registry = ModuleRegistry::with_defaults();
        let names: Vec<&str> = registry.descriptors().map(|d| d.name).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
