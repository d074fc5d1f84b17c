//! # Audit Recording
//!
//! Emits field-allow-listed summaries of each capability invocation. The
//! recorder only ever sees already-sanitized input, applies a strict
//! allow-list (absence from the list means exclusion, so a new request field
//! never silently leaks into audit lines), and swallows sink failures so a
//! logging problem can never fail a capability call.

use std::collections::HashSet;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write as IoWrite};
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;

use crate::sanitize::location::{generalize, LocationPrecision};

// ---------------------------------------------------------------------------
// Sinks
// ---------------------------------------------------------------------------

/// Append-only destination for audit lines.
///
/// Implementations must keep each `append` line-atomic under concurrent use.
pub trait AuditSink: Send + Sync {
    fn append(&self, line: &str) -> io::Result<()>;
}

/// Sink that forwards lines to the `audit` log target.
#[derive(Debug, Default)]
pub struct LogSink;

impl AuditSink for LogSink {
    fn append(&self, line: &str) -> io::Result<()> {
        log::info!(target: "audit", "{line}");
        Ok(())
    }
}

/// Sink that appends lines to a file.
///
/// The whole line (including the trailing newline) goes through a single
/// `write_all` under the lock, so concurrent appends never interleave.
pub struct FileSink {
    file: Mutex<File>,
}

impl FileSink {
    /// Open (or create) the audit file in append mode.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl AuditSink for FileSink {
    fn append(&self, line: &str) -> io::Result<()> {
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');
        let mut file = self.file.lock();
        file.write_all(buf.as_bytes())
    }
}

impl fmt::Debug for FileSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileSink").finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// InvocationRecord
// ---------------------------------------------------------------------------

/// One audit line. Constructed per invocation, serialized, then dropped —
/// never retained beyond the logging call.
#[derive(Debug, Clone, Serialize)]
pub struct InvocationRecord {
    pub capability_name: String,
    pub timestamp: DateTime<Utc>,
    pub success: bool,
    /// Allow-listed subset of the sanitized request.
    #[serde(flatten)]
    pub fields: serde_json::Map<String, Value>,
}

// ---------------------------------------------------------------------------
// AuditRecorder
// ---------------------------------------------------------------------------

/// Builds and emits [`InvocationRecord`]s.
pub struct AuditRecorder {
    allowed_fields: HashSet<String>,
    sink: Arc<dyn AuditSink>,
}

impl AuditRecorder {
    pub fn new(allowed_fields: HashSet<String>, sink: Arc<dyn AuditSink>) -> Self {
        Self {
            allowed_fields,
            sink,
        }
    }

    /// Record one invocation outcome.
    ///
    /// `sanitized_request` must already have passed the inbound boundary; the
    /// recorder never receives raw input. Only allow-listed fields are
    /// copied. A `location` field, when allow-listed, is generalized at city
    /// precision unconditionally — audit lines outlive a single response, so
    /// the configured response precision does not apply here.
    ///
    /// Sink failures are swallowed and reported via `log::warn!`; they never
    /// surface to the caller.
    pub fn record(&self, capability_name: &str, sanitized_request: &Value, success: bool) {
        let mut fields = serde_json::Map::new();
        if let Value::Object(map) = sanitized_request {
            for (key, value) in map {
                if !self.allowed_fields.contains(key) {
                    continue;
                }
                if key == "location" {
                    if let Some(location) = value.as_str() {
                        fields.insert(
                            key.clone(),
                            Value::String(generalize(location, LocationPrecision::City)),
                        );
                    }
                    continue;
                }
                fields.insert(key.clone(), value.clone());
            }
        }

        let record = InvocationRecord {
            capability_name: capability_name.to_string(),
            timestamp: Utc::now(),
            success,
            fields,
        };

        match serde_json::to_string(&record) {
            Ok(line) => {
                if let Err(e) = self.sink.append(&line) {
                    log::warn!("audit append failed for '{capability_name}': {e}");
                }
            }
            Err(e) => {
                log::warn!("audit serialization failed for '{capability_name}': {e}");
            }
        }
    }
}

impl fmt::Debug for AuditRecorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuditRecorder")
            .field("allowed_fields", &self.allowed_fields)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Captures appended lines for assertions.
    #[derive(Default)]
    struct VecSink {
        lines: Mutex<Vec<String>>,
    }

    impl AuditSink for VecSink {
        fn append(&self, line: &str) -> io::Result<()> {
            self.lines.lock().push(line.to_string());
            Ok(())
        }
    }

    struct FailingSink;

    impl AuditSink for FailingSink {
        fn append(&self, _line: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink down"))
        }
    }

    fn recorder(sink: Arc<dyn AuditSink>) -> AuditRecorder {
        let allowed = ["location", "crop_type", "request_type"]
            .into_iter()
            .map(String::from)
            .collect();
        AuditRecorder::new(allowed, sink)
    }

    #[test]
    fn test_only_allow_listed_fields_are_recorded() {
        let sink = Arc::new(VecSink::default());
        let rec = recorder(sink.clone());
        // `symptoms_text` survives the response sanitizer, but it is not on
        // the audit allow-list, so it must not appear in the line.
        rec.record(
            "disease_analysis",
            &json!({"crop_type": "rice", "symptoms_text": "dark spots on leaves"}),
            true,
        );
        let lines = sink.lines.lock();
        let parsed: Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(parsed["capability_name"], "disease_analysis");
        assert_eq!(parsed["success"], true);
        assert_eq!(parsed["crop_type"], "rice");
        assert!(parsed.get("symptoms_text").is_none());
    }

    #[test]
    fn test_location_is_generalized_to_city() {
        let sink = Arc::new(VecSink::default());
        let rec = recorder(sink.clone());
        rec.record(
            "weather_analysis",
            &json!({"location": "Bangalore, Karnataka, India"}),
            true,
        );
        let lines = sink.lines.lock();
        let parsed: Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(parsed["location"], "Bangalore");
    }

    #[test]
    fn test_failure_outcome_is_recorded() {
        let sink = Arc::new(VecSink::default());
        let rec = recorder(sink.clone());
        rec.record("soil_analysis", &json!({}), false);
        let lines = sink.lines.lock();
        let parsed: Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(parsed["success"], false);
    }

    #[test]
    fn test_sink_failure_is_swallowed() {
        let rec = recorder(Arc::new(FailingSink));
        // Must not panic or propagate.
        rec.record("disease_analysis", &json!({"crop_type": "rice"}), true);
    }

    #[test]
    fn test_file_sink_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.log");
        let sink = FileSink::open(&path).unwrap();
        sink.append("{\"a\":1}").unwrap();
        sink.append("{\"b\":2}").unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "{\"a\":1}\n{\"b\":2}\n");
    }
}
