//! Pattern-based PII sanitization.
//!
//! Pure helpers that redact known PII shapes from strings and strip named PII
//! fields from structured data. Both operations are total: malformed or
//! unrecognized fragments pass through untouched rather than erroring.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Replacement token for redacted phone numbers.
pub const PHONE_REDACTED: &str = "[PHONE_REDACTED]";
/// Replacement token for redacted email addresses.
pub const EMAIL_REDACTED: &str = "[EMAIL_REDACTED]";
/// Replacement token for redacted identifier fields.
pub const ID_REDACTED: &str = "[ID_REDACTED]";

/// A compiled text pattern paired with its fixed replacement token.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub regex: Regex,
    pub replacement: String,
}

impl CompiledPattern {
    pub fn new(regex: Regex, replacement: impl Into<String>) -> Self {
        Self {
            regex,
            replacement: replacement.into(),
        }
    }
}

/// Default ordered (pattern, replacement) pairs.
///
/// Declared order matters: punctuated phone forms first, then keyed
/// identifier runs, then email, then loose digit runs. A keyed run like
/// `user_id: 123` must be consumed before the bare digit pattern can chew on
/// its value.
pub const DEFAULT_PATTERN_STRINGS: &[(&str, &str)] = &[
    (r"\+91\s[0-9]{5}\s[0-9]{5}", PHONE_REDACTED),
    (r"\+91[0-9]{10}", PHONE_REDACTED),
    (
        r#""?\b(?:user_id|farmer_id|database_id|id)\b"?\s*:\s*[0-9]+"#,
        ID_REDACTED,
    ),
    (
        r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b",
        EMAIL_REDACTED,
    ),
    (r"\b91[0-9]{10}\b", PHONE_REDACTED),
    (r"\b[0-9]{10}\b", PHONE_REDACTED),
];

static DEFAULT_PATTERNS: Lazy<Vec<CompiledPattern>> = Lazy::new(|| {
    DEFAULT_PATTERN_STRINGS
        .iter()
        .map(|(pattern, replacement)| {
            CompiledPattern::new(Regex::new(pattern).unwrap(), *replacement)
        })
        .collect()
});

/// Default ordered pattern set (Indian phone formats, emails, keyed ids).
pub fn default_patterns() -> Vec<CompiledPattern> {
    DEFAULT_PATTERNS.clone()
}

/// Redacts PII text patterns and strips PII-named fields.
///
/// Explicitly constructed from policy and injected where needed; holds no
/// global state.
#[derive(Debug, Clone)]
pub struct PatternSanitizer {
    /// Lowercased field names stripped from structured data.
    pii_field_names: HashSet<String>,
    /// Ordered redaction patterns.
    patterns: Vec<CompiledPattern>,
}

impl PatternSanitizer {
    /// Create a sanitizer from a field name list and an ordered pattern set.
    ///
    /// Field names are matched case-insensitively; they are lowercased here
    /// once rather than per lookup.
    pub fn new(
        pii_field_names: impl IntoIterator<Item = String>,
        patterns: Vec<CompiledPattern>,
    ) -> Self {
        Self {
            pii_field_names: pii_field_names
                .into_iter()
                .map(|name| name.to_lowercase())
                .collect(),
            patterns,
        }
    }

    /// Sanitizer with the default field list and pattern set.
    pub fn with_defaults() -> Self {
        Self::new(
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
            .map(String::from),
            default_patterns(),
        )
    }

    /// Whether a key names a PII field (case-insensitive).
    pub fn is_pii_field(&self, key: &str) -> bool {
        self.pii_field_names.contains(&key.to_lowercase())
    }

    /// Apply every pattern in declared order, replacing each match with its
    /// fixed token. Unmatched text passes through unchanged.
    pub fn redact_text(&self, text: &str) -> String {
        let mut redacted = text.to_string();
        for pattern in &self.patterns {
            redacted = pattern
                .regex
                .replace_all(&redacted, pattern.replacement.as_str())
                .into_owned();
        }
        redacted
    }

    /// Remove every key whose case-insensitive name is a PII field, recursing
    /// into nested mappings and sequences-of-mappings. Scalar values pass
    /// through unchanged. Returns a new structure.
    pub fn strip_pii_fields(&self, value: &Value) -> Value {
        match value {
            Value::Object(map) => {
                let mut out = serde_json::Map::new();
                for (key, val) in map {
                    if self.is_pii_field(key) {
                        continue;
                    }
                    out.insert(key.clone(), self.strip_pii_fields(val));
                }
                Value::Object(out)
            }
            Value::Array(items) => {
                Value::Array(items.iter().map(|item| self.strip_pii_fields(item)).collect())
            }
            other => other.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_redacts_phone_formats() {
        let sanitizer = PatternSanitizer::with_defaults();
        for text in [
            "call me at +919876543210",
            "call me at +91 98765 43210",
            "call me at 919876543210",
            "call me at 9876543210",
        ] {
            let redacted = sanitizer.redact_text(text);
            assert!(redacted.contains(PHONE_REDACTED), "not redacted: {text}");
            assert!(!redacted.contains("9876543210"), "leaked: {redacted}");
        }
    }

    #[test]
    fn test_redacts_email() {
        let sanitizer = PatternSanitizer::with_defaults();
        let redacted = sanitizer.redact_text("reach farmer.anand@example.co.in today");
        assert_eq!(redacted, format!("reach {} today", EMAIL_REDACTED));
    }

    #[test]
    fn test_redacts_keyed_identifier_before_digit_run() {
        let sanitizer = PatternSanitizer::with_defaults();
        let redacted = sanitizer.redact_text("user_id: 9876543210");
        assert_eq!(redacted, ID_REDACTED);
    }

    #[test]
    fn test_unmatched_text_passes_through() {
        let sanitizer = PatternSanitizer::with_defaults();
        let text = "yellowing leaves on 3 of 12 plants since May 2025";
        assert_eq!(sanitizer.redact_text(text), text);
    }

    #[test]
    fn test_redaction_is_idempotent() {
        let sanitizer = PatternSanitizer::with_defaults();
        let once = sanitizer.redact_text("id: 42 or +919876543210 or a@b.com");
        assert_eq!(sanitizer.redact_text(&once), once);
    }

    #[test]
    fn test_strip_pii_fields_recurses() {
        let sanitizer = PatternSanitizer::with_defaults();
        let input = json!({
            "crop_type": "tomato",
            "Phone": "9876543210",
            "profile": {
                "EMAIL": "a@b.com",
                "farm_size": 2.5,
                "contacts": [{"name": "x", "village": "Hosur"}]
            }
        });
        let stripped = sanitizer.strip_pii_fields(&input);
        assert_eq!(
            stripped,
            json!({
                "crop_type": "tomato",
                "profile": {
                    "farm_size": 2.5,
                    "contacts": [{"village": "Hosur"}]
                }
            })
        );
    }

    #[test]
    fn test_strip_leaves_scalars_and_input_untouched() {
        let sanitizer = PatternSanitizer::with_defaults();
        let input = json!({"count": 3, "ok": true, "note": null});
        assert_eq!(sanitizer.strip_pii_fields(&input), input);
    }
}
