//! Search tools backed by an external search provider: government scheme
//! lookup and agricultural research search.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::providers::ExternalProvider;
use crate::registry::{CapabilityHandler, HandlerError};

use super::{str_arg, DEFAULT_REGION};

const DEFAULT_MAX_RESULTS: u64 = 10;
const MAX_RESULTS_CEILING: u64 = 50;

/// Search for government agricultural schemes and subsidies.
pub struct GovernmentSchemesTool {
    provider: Arc<dyn ExternalProvider>,
}

impl GovernmentSchemesTool {
    pub fn new(provider: Arc<dyn ExternalProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl CapabilityHandler for GovernmentSchemesTool {
    async fn handle(&self, arguments: Value) -> Result<Value, HandlerError> {
        let query = str_arg(&arguments, "query");
        let state = {
            let state = str_arg(&arguments, "state");
            if state.is_empty() {
                DEFAULT_REGION.to_string()
            } else {
                state
            }
        };
        // Out-of-range or non-integer values fall back to the default.
        let max_results = arguments
            .get("max_results")
            .and_then(Value::as_u64)
            .filter(|n| (1..=MAX_RESULTS_CEILING).contains(n))
            .unwrap_or(DEFAULT_MAX_RESULTS);

        let results = self
            .provider
            .fetch(&json!({
                "query": format!("{query} government scheme {state}"),
                "max_results": max_results,
            }))
            .await?;

        Ok(json!({
            "status": "success",
            "query": query,
            "state": state,
            "schemes": results,
        }))
    }
}

/// Search agricultural research and best-practice literature.
pub struct AgriculturalResearchTool {
    provider: Arc<dyn ExternalProvider>,
}

impl AgriculturalResearchTool {
    pub fn new(provider: Arc<dyn ExternalProvider>) -> Self {
        Self { provider }
    }
}

const VALID_SEARCH_TYPES: &[&str] = &["general", "agricultural", "scientific"];

#[async_trait]
impl CapabilityHandler for AgriculturalResearchTool {
    async fn handle(&self, arguments: Value) -> Result<Value, HandlerError> {
        let query = str_arg(&arguments, "query");
        let search_type = {
            let requested = str_arg(&arguments, "search_type").to_lowercase();
            if VALID_SEARCH_TYPES.contains(&requested.as_str()) {
                requested
            } else {
                "agricultural".to_string()
            }
        };

        let results = self
            .provider
            .fetch(&json!({"query": query, "search_type": search_type}))
            .await?;

        Ok(json!({
            "status": "success",
            "query": query,
            "search_type": search_type,
            "results": results,
        }))
    }
}
