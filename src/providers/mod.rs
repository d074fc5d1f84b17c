//! # External Data Providers
//!
//! Contract for the third-party collaborators (weather, soil, search) the
//! tool handlers call. Payloads are opaque to this core: whatever a provider
//! returns goes through the outbound sanitization boundary before it leaves
//! the process, so no provider shape assumptions are made here.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Failure reported by a collaborator.
///
/// The dispatcher catches these, logs the detail server-side, and reports a
/// generic `execution_failed` to the client.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider '{provider}' request failed: {message}")]
    Fetch { provider: String, message: String },

    #[error("provider '{provider}' is not configured")]
    NotConfigured { provider: String },
}

/// A black-box external data source.
#[async_trait]
pub trait ExternalProvider: Send + Sync {
    /// Provider name used in operator logs.
    fn name(&self) -> &str;

    /// Fetch data for the given parameters. The payload is treated as opaque.
    async fn fetch(&self, params: &Value) -> Result<Value, ProviderError>;
}

/// Placeholder provider used when no external integration is wired.
///
/// Always fails with [`ProviderError::NotConfigured`], which the dispatcher
/// reports as a generic execution failure.
pub struct OfflineProvider {
    name: String,
}

impl OfflineProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl ExternalProvider for OfflineProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, _params: &Value) -> Result<Value, ProviderError> {
        Err(ProviderError::NotConfigured {
            provider: self.name.clone(),
        })
    }
}

impl fmt::Debug for OfflineProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OfflineProvider")
            .field("name", &self.name)
            .finish()
    }
}
