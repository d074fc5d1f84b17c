//! Error types for the capability dispatch core.

use thiserror::Error;

/// Errors surfaced to clients by the dispatcher.
///
/// Every variant maps to a stable machine-readable kind string plus a generic
/// human-readable message. Internal failure detail (handler errors, provider
/// messages) is logged server-side and never carried here.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The requested capability is not present in the registry.
    #[error("unknown capability: {name}")]
    UnknownCapability { name: String },

    /// A required argument was absent from the sanitized request.
    #[error("missing required argument: {argument}")]
    MissingRequiredArgument { argument: String },

    /// The capability handler returned an error.
    #[error("execution failed for capability: {capability}")]
    ExecutionFailed { capability: String },

    /// The capability handler did not complete within the configured timeout.
    #[error("execution timed out for capability: {capability}")]
    ExecutionTimeout { capability: String },

    /// Sanitization itself failed; the payload is withheld.
    #[error("sanitization failed")]
    SanitizationFailed,
}

impl DispatchError {
    /// Stable machine-readable error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownCapability { .. } => "unknown_capability",
            Self::MissingRequiredArgument { .. } => "missing_required_argument",
            Self::ExecutionFailed { .. } => "execution_failed",
            Self::ExecutionTimeout { .. } => "execution_timeout",
            Self::SanitizationFailed => "sanitization_failed",
        }
    }

    /// Generic message safe to echo to clients.
    pub fn client_message(&self) -> String {
        match self {
            Self::UnknownCapability { name } => {
                format!("Capability '{}' is not available", name)
            }
            Self::MissingRequiredArgument { argument } => {
                format!("Required argument '{}' is missing", argument)
            }
            Self::ExecutionFailed { capability } => format!(
                "An error occurred while executing '{}'. Please try again.",
                capability
            ),
            Self::ExecutionTimeout { capability } => {
                format!("Execution of '{}' did not complete in time", capability)
            }
            Self::SanitizationFailed => {
                "The request could not be processed safely".to_string()
            }
        }
    }
}

/// Startup-time configuration errors.
///
/// These are fatal: the process must refuse to start rather than run with a
/// partially valid capability set or an uncompilable sanitization policy.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An enabled capability name does not exist in the compiled-in catalog.
    #[error("unknown {kind} in enabled list: {name}")]
    UnknownEnabledCapability { kind: &'static str, name: String },

    /// An enabled name resolved to a descriptor of a different kind.
    #[error("capability '{name}' is a {actual}, enabled as a {expected}")]
    KindMismatch {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// A PII text pattern failed to compile.
    #[error("invalid PII pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The configuration file could not be read or parsed.
    #[error("failed to load configuration from {path}: {message}")]
    Load { path: String, message: String },
}
