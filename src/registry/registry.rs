//! Load-time-fixed capability registry.

use std::collections::HashMap;

use crate::config::ServerConfig;
use crate::errors::ConfigError;
use crate::protocol::CapabilitySummary;

use super::capability::{CapabilityDescriptor, CapabilityKind};

/// The enabled capability table.
///
/// Built once at startup from the enabled name lists cross-referenced against
/// the compiled-in catalog, immutable thereafter. Lookup is O(1); listing is
/// O(k). Reads need no synchronization.
#[derive(Debug)]
pub struct CapabilityRegistry {
    by_name: HashMap<String, CapabilityDescriptor>,
}

impl CapabilityRegistry {
    /// Build the registry from configuration.
    ///
    /// Every name in an enabled list must resolve to a catalog descriptor of
    /// the matching kind; anything else is a fatal configuration error
    /// rather than a silently ignored entry.
    pub fn from_config(
        config: &ServerConfig,
        catalog: Vec<CapabilityDescriptor>,
    ) -> Result<Self, ConfigError> {
        let mut available: HashMap<String, CapabilityDescriptor> = HashMap::new();
        for descriptor in catalog {
            available.insert(descriptor.name.clone(), descriptor);
        }

        let groups: [(&[String], CapabilityKind); 3] = [
            (&config.enabled_tools, CapabilityKind::Tool),
            (&config.enabled_resources, CapabilityKind::Resource),
            (&config.enabled_prompts, CapabilityKind::Prompt),
        ];

        let mut by_name = HashMap::new();
        for (names, kind) in groups {
            for name in names {
                let descriptor = available.get(name).ok_or_else(|| {
                    ConfigError::UnknownEnabledCapability {
                        kind: kind.as_str(),
                        name: name.clone(),
                    }
                })?;
                if descriptor.kind != kind {
                    return Err(ConfigError::KindMismatch {
                        name: name.clone(),
                        expected: kind.as_str(),
                        actual: descriptor.kind.as_str(),
                    });
                }
                by_name.insert(name.clone(), descriptor.clone());
            }
        }

        Ok(Self { by_name })
    }

    /// Look up a capability by name.
    pub fn get(&self, name: &str) -> Option<&CapabilityDescriptor> {
        self.by_name.get(name)
    }

    /// List all enabled capabilities, sorted by name for stable discovery
    /// output.
    pub fn list(&self) -> Vec<&CapabilityDescriptor> {
        let mut all: Vec<_> = self.by_name.values().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    /// Discovery summaries for every enabled capability.
    pub fn summaries(&self) -> Vec<CapabilitySummary> {
        self.list().into_iter().map(|d| d.summary()).collect()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::capability::{CapabilityHandler, HandlerError};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Arc;

    #[derive(Debug)]
    struct Noop;

    #[async_trait]
    impl CapabilityHandler for Noop {
        async fn handle(&self, _arguments: Value) -> Result<Value, HandlerError> {
            Ok(json!({}))
        }
    }

    fn descriptor(name: &str, kind: CapabilityKind) -> CapabilityDescriptor {
        CapabilityDescriptor::new(
            name,
            kind,
            format!("{name} capability"),
            json!({"type": "object"}),
            Arc::new(Noop),
        )
    }

    fn config(tools: &[&str], resources: &[&str], prompts: &[&str]) -> ServerConfig {
        ServerConfig {
            enabled_tools: tools.iter().map(|s| s.to_string()).collect(),
            enabled_resources: resources.iter().map(|s| s.to_string()).collect(),
            enabled_prompts: prompts.iter().map(|s| s.to_string()).collect(),
            ..ServerConfig::default()
        }
    }

    #[test]
    fn test_from_config_builds_enabled_subset() {
        let catalog = vec![
            descriptor("disease_analysis", CapabilityKind::Tool),
            descriptor("weather_analysis", CapabilityKind::Tool),
            descriptor("crop_calendar", CapabilityKind::Resource),
        ];
        let registry = CapabilityRegistry::from_config(
            &config(&["disease_analysis"], &["crop_calendar"], &[]),
            catalog,
        )
        .unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.get("disease_analysis").is_some());
        // In the catalog but not enabled.
        assert!(registry.get("weather_analysis").is_none());
    }

    #[test]
    fn test_unknown_enabled_name_fails_fast() {
        let catalog = vec![descriptor("disease_analysis", CapabilityKind::Tool)];
        let err = CapabilityRegistry::from_config(
            &config(&["disease_analysis", "weed_detection"], &[], &[]),
            catalog,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnknownEnabledCapability { kind: "tool", .. }
        ));
    }

    #[test]
    fn test_kind_mismatch_fails_fast() {
        let catalog = vec![descriptor("crop_calendar", CapabilityKind::Resource)];
        let err =
            CapabilityRegistry::from_config(&config(&["crop_calendar"], &[], &[]), catalog)
                .unwrap_err();
        assert!(matches!(err, ConfigError::KindMismatch { .. }));
    }

    #[test]
    fn test_list_is_sorted_by_name() {
        let catalog = vec![
            descriptor("weather_analysis", CapabilityKind::Tool),
            descriptor("disease_analysis", CapabilityKind::Tool),
        ];
        let registry = CapabilityRegistry::from_config(
            &config(&["weather_analysis", "disease_analysis"], &[], &[]),
            catalog,
        )
        .unwrap();
        let names: Vec<_> = registry.list().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["disease_analysis", "weather_analysis"]);
    }
}
