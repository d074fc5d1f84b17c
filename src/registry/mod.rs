//! # Capability Registry
//!
//! The static, load-time-fixed table of enabled capabilities. Configuration
//! names the enabled tools, resources, and prompts; those names are
//! cross-referenced against the compiled-in catalog at startup, and unknown
//! names refuse to start the process. After construction the registry is
//! immutable: lookups take no lock and invocations can read it concurrently.

pub mod capability;
pub mod catalog;
#[allow(clippy::module_inception)]
pub mod registry;

pub use capability::{CapabilityDescriptor, CapabilityHandler, CapabilityKind, HandlerError};
pub use catalog::{builtin_catalog, CatalogDeps};
pub use registry::CapabilityRegistry;
