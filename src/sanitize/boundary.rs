//! Zero-retention sanitization boundary.
//!
//! Composes field stripping and text redaction into the two operations every
//! request and response passes through: `sanitize_inbound` before a handler
//! runs, `sanitize_outbound` after it returns. Both produce a fresh
//! structure; the boundary never mutates or retains its input.
//!
//! Failure mode: the walk is depth-bounded, and exceeding the bound yields a
//! typed [`SanitizeError`] instead of the payload. Callers fail closed — the
//! unsanitized content is never released.

use std::collections::HashSet;

use serde_json::Value;
use thiserror::Error;

use crate::config::SanitizationPolicy;
use crate::sanitize::patterns::PatternSanitizer;

/// Maximum nesting depth the boundary will walk before failing closed.
const MAX_SANITIZE_DEPTH: usize = 128;

/// Sanitization failure. The offending payload is withheld from the message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SanitizeError {
    #[error("sanitization aborted: nesting depth exceeds {}", MAX_SANITIZE_DEPTH)]
    DepthExceeded,
}

/// The inbound/outbound sanitization pass, built once from policy.
#[derive(Debug, Clone)]
pub struct ZeroRetentionBoundary {
    sanitizer: PatternSanitizer,
    /// Lowercased response field names stripped on the way out.
    response_strip_fields: HashSet<String>,
}

impl ZeroRetentionBoundary {
    pub fn new(policy: &SanitizationPolicy) -> Self {
        Self {
            sanitizer: PatternSanitizer::new(
                policy.pii_field_names.iter().cloned(),
                policy.patterns.clone(),
            ),
            response_strip_fields: policy.response_strip_fields.clone(),
        }
    }

    /// Sanitize an inbound request: strip PII-named fields, then redact text
    /// patterns in every string value, in one recursive pass.
    pub fn sanitize_inbound(&self, request: &Value) -> Result<Value, SanitizeError> {
        self.walk(request, &|key| self.sanitizer.is_pii_field(key), 0)
    }

    /// Sanitize an outbound response: same pass with the response strip list,
    /// plus the internal-identifier convention (any `*_id`-suffixed key).
    pub fn sanitize_outbound(&self, response: &Value) -> Result<Value, SanitizeError> {
        self.walk(
            response,
            &|key| {
                let key = key.to_lowercase();
                self.response_strip_fields.contains(&key) || key.ends_with("_id")
            },
            0,
        )
    }

    // Fields are checked before values are redacted, so a stripped field's
    // content never reaches the pattern stage.
    fn walk(
        &self,
        value: &Value,
        should_strip: &dyn Fn(&str) -> bool,
        depth: usize,
    ) -> Result<Value, SanitizeError> {
        if depth > MAX_SANITIZE_DEPTH {
            return Err(SanitizeError::DepthExceeded);
        }
        match value {
            Value::Object(map) => {
                let mut out = serde_json::Map::new();
                for (key, val) in map {
                    if should_strip(key) {
                        continue;
                    }
                    out.insert(key.clone(), self.walk(val, should_strip, depth + 1)?);
                }
                Ok(Value::Object(out))
            }
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(self.walk(item, should_strip, depth + 1)?);
                }
                Ok(Value::Array(out))
            }
            Value::String(text) => Ok(Value::String(self.sanitizer.redact_text(text))),
            other => Ok(other.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn boundary() -> ZeroRetentionBoundary {
        ZeroRetentionBoundary::new(&SanitizationPolicy::default())
    }

    #[test]
    fn test_inbound_strips_and_redacts() {
        let request = json!({
            "crop_type": "tomato",
            "phone": "9876543210",
            "symptoms_text": "dark spots, contact me at a@b.com",
            "details": {
                "farmer_id": 42,
                "notes": ["ring +919876543210", {"email": "x@y.org", "row": 3}]
            }
        });
        let sanitized = boundary().sanitize_inbound(&request).unwrap();
        assert_eq!(
            sanitized,
            json!({
                "crop_type": "tomato",
                "symptoms_text": "dark spots, contact me at [EMAIL_REDACTED]",
                "details": {
                    "notes": ["ring [PHONE_REDACTED]", {"row": 3}]
                }
            })
        );
    }

    #[test]
    fn test_outbound_strips_internal_identifiers_at_depth() {
        let response = json!({
            "status": "success",
            "id": 7,
            "session_id": "abc",
            "report": {
                "database_id": 99,
                "record_id": 12,
                "summary": "treatment plan ready"
            }
        });
        let sanitized = boundary().sanitize_outbound(&response).unwrap();
        assert_eq!(
            sanitized,
            json!({
                "status": "success",
                "report": {"summary": "treatment plan ready"}
            })
        );
    }

    #[test]
    fn test_outbound_keeps_pii_named_request_fields() {
        // The outbound pass uses the response strip list, not the PII list;
        // a `location` echo survives while `auth_token` never does.
        let response = json!({"location": "Mysore", "auth_token": "t0ps3cret"});
        let sanitized = boundary().sanitize_outbound(&response).unwrap();
        assert_eq!(sanitized, json!({"location": "Mysore"}));
    }

    #[test]
    fn test_sanitization_is_idempotent() {
        let response = json!({
            "summary": "call 9876543210",
            "user_id": 1,
            "nested": [{"session_id": "s", "ok": true}]
        });
        let b = boundary();
        let once = b.sanitize_outbound(&response).unwrap();
        let twice = b.sanitize_outbound(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_depth_bound_fails_closed() {
        let mut value = json!("leaf");
        for _ in 0..(MAX_SANITIZE_DEPTH + 10) {
            value = json!([value]);
        }
        let err = boundary().sanitize_inbound(&value).unwrap_err();
        assert_eq!(err, SanitizeError::DepthExceeded);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let request = json!({"phone": "9876543210", "crop_type": "rice"});
        let before = request.clone();
        let _ = boundary().sanitize_inbound(&request).unwrap();
        assert_eq!(request, before);
    }
}
