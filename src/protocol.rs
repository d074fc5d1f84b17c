//! Wire-boundary request and response shapes.
//!
//! The generic-map representation lives only here: past this boundary,
//! capability inputs are validated against per-capability schemas and
//! outputs are typed by their handlers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::DispatchError;
use crate::registry::CapabilityKind;

/// A capability invocation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityRequest {
    pub capability_name: String,
    #[serde(default)]
    pub arguments: serde_json::Map<String, Value>,
}

impl CapabilityRequest {
    pub fn new(capability_name: impl Into<String>, arguments: serde_json::Map<String, Value>) -> Self {
        Self {
            capability_name: capability_name.into(),
            arguments,
        }
    }
}

/// A capability invocation response.
///
/// Serializes with a `status` tag: `success` carries the sanitized payload,
/// `error` carries a stable machine-readable kind plus a generic message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CapabilityResponse {
    Success { payload: Value },
    Error { error_kind: String, message: String },
}

impl CapabilityResponse {
    /// Create a success response.
    pub fn success(payload: Value) -> Self {
        Self::Success { payload }
    }

    /// Create an error response from a dispatch error.
    pub fn from_error(err: &DispatchError) -> Self {
        Self::Error {
            error_kind: err.kind().to_string(),
            message: err.client_message(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Descriptor summary returned during capability discovery.
#[derive(Debug, Clone, Serialize)]
pub struct CapabilitySummary {
    pub name: String,
    pub kind: CapabilityKind,
    pub description: String,
    pub input_schema: Value,
}
