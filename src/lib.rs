//! # Agro MCP
//!
//! Privacy-preserving capability dispatch core for agricultural advisory
//! services. Exposes a fixed, versioned set of named capabilities (tools,
//! resources, prompts), forces every request and response through a
//! zero-retention sanitization boundary, and ships a symptom-to-condition
//! matching engine that returns ranked, confidence-bounded diagnoses.
//!
//! Nothing that passes through this core is persisted: the only durable
//! trace of an invocation is a field-allow-listed, already-sanitized audit
//! line.

pub mod audit;
pub mod config;
pub mod diagnosis;
pub mod dispatch;
pub mod errors;
pub mod prompts;
pub mod protocol;
pub mod providers;
pub mod registry;
pub mod resources;
pub mod sanitize;
pub mod tools;

pub use config::{SanitizationPolicy, ServerConfig};
pub use diagnosis::{DiagnosisEngine, DiagnosisResult};
pub use dispatch::Dispatcher;
pub use errors::{ConfigError, DispatchError};
pub use protocol::{CapabilityRequest, CapabilityResponse};
pub use registry::{builtin_catalog, CapabilityRegistry, CatalogDeps};
pub use sanitize::ZeroRetentionBoundary;

/// Library version.
pub const VERSION: &str = "0.1.0";
