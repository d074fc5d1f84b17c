//! Server configuration and the compiled sanitization policy.
//!
//! Configuration is loaded once at process start (YAML file or compiled-in
//! defaults) and treated as immutable for the process lifetime. The raw serde
//! structures compile into a [`SanitizationPolicy`] with lowercased field
//! sets and pre-compiled regex patterns; compilation failures are fatal.

use std::collections::HashSet;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::sanitize::location::LocationPrecision;
use crate::sanitize::patterns::{CompiledPattern, DEFAULT_PATTERN_STRINGS};

// ---------------------------------------------------------------------------
// ServerConfig
// ---------------------------------------------------------------------------

/// Top-level server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server identification reported during capability discovery.
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,

    /// Enabled capability name lists, cross-referenced against the
    /// compiled-in catalog at registry construction.
    #[serde(default = "default_enabled_tools")]
    pub enabled_tools: Vec<String>,
    #[serde(default = "default_enabled_resources")]
    pub enabled_resources: Vec<String>,
    #[serde(default = "default_enabled_prompts")]
    pub enabled_prompts: Vec<String>,

    /// Bounded wait for handler execution, in seconds.
    #[serde(default = "default_execution_timeout_secs")]
    pub execution_timeout_secs: u64,

    #[serde(default)]
    pub sanitization: SanitizationConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            version: default_version(),
            enabled_tools: default_enabled_tools(),
            enabled_resources: default_enabled_resources(),
            enabled_prompts: default_enabled_prompts(),
            execution_timeout_secs: default_execution_timeout_secs(),
            sanitization: SanitizationConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a YAML file.
    pub fn load_yaml(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Load {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        serde_yaml::from_str(&content).map_err(|e| ConfigError::Load {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

fn default_name() -> String {
    "agro-mcp".to_string()
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_enabled_tools() -> Vec<String> {
    [
        "disease_analysis",
        "weather_analysis",
        "soil_analysis",
        "government_schemes_search",
        "agricultural_research_search",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_enabled_resources() -> Vec<String> {
    ["crop_calendar", "disease_database"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_enabled_prompts() -> Vec<String> {
    [
        "disease_diagnosis",
        "crop_planning",
        "weather_advisory",
        "soil_advisory",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_execution_timeout_secs() -> u64 {
    30
}

// ---------------------------------------------------------------------------
// SanitizationConfig
// ---------------------------------------------------------------------------

/// Raw sanitization settings as they appear in configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitizationConfig {
    /// Field names stripped from inbound requests (case-insensitive).
    #[serde(default = "default_pii_fields")]
    pub pii_fields: Vec<String>,

    /// Ordered text patterns with their replacement tokens.
    #[serde(default = "default_pii_patterns")]
    pub pii_patterns: Vec<PiiPattern>,

    /// Field names stripped from outbound responses (case-insensitive).
    #[serde(default = "default_response_strip_fields")]
    pub response_strip_fields: Vec<String>,

    #[serde(default)]
    pub location_precision: LocationPrecision,

    /// Strict allow-list of fields an audit record may carry.
    #[serde(default = "default_audit_allowed_fields")]
    pub audit_allowed_fields: Vec<String>,
}

impl Default for SanitizationConfig {
    fn default() -> Self {
        Self {
            pii_fields: default_pii_fields(),
            pii_patterns: default_pii_patterns(),
            response_strip_fields: default_response_strip_fields(),
            location_precision: LocationPrecision::default(),
            audit_allowed_fields: default_audit_allowed_fields(),
        }
    }
}

impl SanitizationConfig {
    /// Compile the raw settings into a read-only policy.
    ///
    /// Pattern compilation failures are configuration errors: the process
    /// must not start with a partially applied redaction list.
    pub fn compile(&self) -> Result<SanitizationPolicy, ConfigError> {
        let mut patterns = Vec::with_capacity(self.pii_patterns.len());
        for entry in &self.pii_patterns {
            let regex = Regex::new(&entry.pattern).map_err(|source| ConfigError::InvalidPattern {
                pattern: entry.pattern.clone(),
                source,
            })?;
            patterns.push(CompiledPattern::new(regex, entry.replacement.clone()));
        }
        Ok(SanitizationPolicy {
            pii_field_names: lowercase_set(&self.pii_fields),
            patterns,
            response_strip_fields: lowercase_set(&self.response_strip_fields),
            location_precision: self.location_precision,
            audit_allowed_fields: self.audit_allowed_fields.iter().cloned().collect(),
        })
    }
}

/// A text pattern entry as written in configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PiiPattern {
    pub pattern: String,
    pub replacement: String,
}

fn lowercase_set(names: &[String]) -> HashSet<String> {
    names.iter().map(|name| name.to_lowercase()).collect()
}

fn default_pii_fields() -> Vec<String> {
    [
        "phone",
        "email",
        "name",
        "address",
        "user_id",
        "farmer_id",
        "contact",
        "personal_id",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_pii_patterns() -> Vec<PiiPattern> {
    DEFAULT_PATTERN_STRINGS
        .iter()
        .map(|(pattern, replacement)| PiiPattern {
            pattern: (*pattern).to_string(),
            replacement: (*replacement).to_string(),
        })
        .collect()
}

fn default_response_strip_fields() -> Vec<String> {
    [
        "id",
        "user_id",
        "farmer_id",
        "database_id",
        "internal_id",
        "session_id",
        "auth_token",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_audit_allowed_fields() -> Vec<String> {
    ["location", "crop_type", "request_type"]
        .into_iter()
        .map(String::from)
        .collect()
}

// ---------------------------------------------------------------------------
// SanitizationPolicy
// ---------------------------------------------------------------------------

/// Compiled sanitization policy.
///
/// Built once at startup and shared read-only across invocations; safe for
/// unsynchronized concurrent reads because nothing mutates it post-build.
#[derive(Debug, Clone)]
pub struct SanitizationPolicy {
    /// Lowercased field names stripped from inbound requests.
    pub pii_field_names: HashSet<String>,
    /// Ordered, compiled redaction patterns.
    pub patterns: Vec<CompiledPattern>,
    /// Lowercased field names stripped from outbound responses.
    pub response_strip_fields: HashSet<String>,
    pub location_precision: LocationPrecision,
    /// Allow-listed audit fields (exact names).
    pub audit_allowed_fields: HashSet<String>,
}

impl Default for SanitizationPolicy {
    fn default() -> Self {
        // The default config always compiles; its patterns are the same
        // compiled-in set exercised by the sanitizer tests.
        SanitizationConfig::default()
            .compile()
            .expect("default sanitization config must compile")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_compiles() {
        let policy = SanitizationConfig::default().compile().unwrap();
        assert!(policy.pii_field_names.contains("farmer_id"));
        assert!(policy.response_strip_fields.contains("auth_token"));
        assert_eq!(policy.location_precision, LocationPrecision::City);
        assert!(!policy.patterns.is_empty());
    }

    #[test]
    fn test_invalid_pattern_is_fatal() {
        let mut config = SanitizationConfig::default();
        config.pii_patterns.push(PiiPattern {
            pattern: "(unclosed".to_string(),
            replacement: "[X]".to_string(),
        });
        let err = config.compile().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { .. }));
    }

    #[test]
    fn test_field_sets_are_lowercased() {
        let config = SanitizationConfig {
            pii_fields: vec!["Phone".to_string(), "EMAIL".to_string()],
            ..SanitizationConfig::default()
        };
        let policy = config.compile().unwrap();
        assert!(policy.pii_field_names.contains("phone"));
        assert!(policy.pii_field_names.contains("email"));
    }

    #[test]
    fn test_load_yaml_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "enabled_tools:\n  - disease_analysis\nexecution_timeout_secs: 5\nsanitization:\n  location_precision: district\n"
        )
        .unwrap();
        let config = ServerConfig::load_yaml(file.path()).unwrap();
        assert_eq!(config.enabled_tools, vec!["disease_analysis"]);
        assert_eq!(config.execution_timeout_secs, 5);
        assert_eq!(
            config.sanitization.location_precision,
            LocationPrecision::District
        );
        // Unspecified sections fall back to defaults.
        assert_eq!(config.enabled_resources.len(), 2);
    }

    #[test]
    fn test_load_yaml_missing_file() {
        let err = ServerConfig::load_yaml("/nonexistent/agro-mcp.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Load { .. }));
    }
}
