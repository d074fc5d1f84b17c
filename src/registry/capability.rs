//! Capability descriptors and the handler contract.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::protocol::CapabilitySummary;

/// The three capability families exposed at the dispatch boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityKind {
    Tool,
    Resource,
    Prompt,
}

impl CapabilityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tool => "tool",
            Self::Resource => "resource",
            Self::Prompt => "prompt",
        }
    }
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type handlers may return. The dispatcher logs it server-side and
/// reports a generic `execution_failed` to the client.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// A capability implementation.
///
/// Handlers only ever receive sanitized arguments and must not retain them.
/// Implementations performing external I/O may suspend; the dispatcher
/// awaits completion under its execution timeout without holding any lock.
#[async_trait]
pub trait CapabilityHandler: Send + Sync {
    async fn handle(&self, arguments: Value) -> Result<Value, HandlerError>;
}

/// An entry in the capability catalog: a unique name, its kind, a
/// client-facing description, the JSON-Schema input contract, and the
/// handler. Immutable once the registry is built.
#[derive(Clone)]
pub struct CapabilityDescriptor {
    pub name: String,
    pub kind: CapabilityKind,
    pub description: String,
    /// JSON-Schema object; its `required` array drives argument validation.
    pub input_schema: Value,
    pub handler: Arc<dyn CapabilityHandler>,
}

impl CapabilityDescriptor {
    pub fn new(
        name: impl Into<String>,
        kind: CapabilityKind,
        description: impl Into<String>,
        input_schema: Value,
        handler: Arc<dyn CapabilityHandler>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
            input_schema,
            handler,
        }
    }

    /// Argument names the input schema declares as required.
    pub fn required_arguments(&self) -> Vec<&str> {
        self.input_schema
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Discovery summary (everything except the handler).
    pub fn summary(&self) -> CapabilitySummary {
        CapabilitySummary {
            name: self.name.clone(),
            kind: self.kind,
            description: self.description.clone(),
            input_schema: self.input_schema.clone(),
        }
    }
}

impl fmt::Debug for CapabilityDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
