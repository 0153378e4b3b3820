//! Data-source module system.
//!
//! A module encapsulates how to fetch one remote dataset: given a
//! geographic region and module-specific options, it plans zero or more
//! downloadable-resource descriptors. The actual transfer is the
//! runner's job (see [`crate::worker`]).
//!
//! ## Key Components
//!
//! - [`FetchModule`] - contract every data-source plugin implements
//! - [`ModuleRegistry`] - name → factory table for the built-in modules
//! - [`ResultEntry`] - immutable descriptor of one downloadable resource
//! - [`Region`] - W/E/S/N bounding box with a filesystem-safe token
//! - [`Gebco`] - reference module (GEBCO bathymetry)

pub mod gebco;
mod registry;
mod traits;
mod types;

pub use gebco::Gebco;
pub use registry::{
    ModuleDescriptor, ModuleFactory, ModuleRegistry, OptionKind, OptionSpec,
    RegistryError,
};
pub use traits::{FetchModule, ModuleError};
pub use types::{
    DataType, ModuleArgs, Region, RegionParseError, ResultEntry, ResultSet,
};
