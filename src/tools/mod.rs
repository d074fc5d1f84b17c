//! # Tool Handlers
//!
//! The tool-kind capabilities: disease analysis backed by the matching
//! engine, and the provider-backed weather, soil, and search tools. Handlers
//! receive sanitized arguments from the dispatcher, and their payloads still
//! pass through the outbound boundary before leaving the process.

pub mod disease;
pub mod search;
pub mod soil;
pub mod weather;

pub use disease::DiseaseAnalysisTool;
pub use search::{AgriculturalResearchTool, GovernmentSchemesTool};
pub use soil::SoilAnalysisTool;
pub use weather::WeatherAnalysisTool;

use serde_json::Value;

/// Default region assumed when a request carries no location.
pub(crate) const DEFAULT_REGION: &str = "Karnataka";

/// Fetch a string argument, trimmed; absent or non-string yields "".
pub(crate) fn str_arg(arguments: &Value, key: &str) -> String {
    arguments
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim()
        .to_string()
}
