//! Crop disease analysis tool.
//!
//! Tokenizes a free-text symptom description, runs the matching engine, and
//! returns the ranked diagnosis. Locations are generalized to the configured
//! precision before they appear in any payload.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::diagnosis::DiagnosisEngine;
use crate::registry::{CapabilityHandler, HandlerError};
use crate::sanitize::location::{generalize, LocationPrecision};

use super::{str_arg, DEFAULT_REGION};

pub struct DiseaseAnalysisTool {
    engine: Arc<DiagnosisEngine>,
    location_precision: LocationPrecision,
}

impl DiseaseAnalysisTool {
    pub fn new(engine: Arc<DiagnosisEngine>, location_precision: LocationPrecision) -> Self {
        Self {
            engine,
            location_precision,
        }
    }
}

/// Split a symptom description into lower-cased fragments on sentence and
/// list punctuation. Fragments keep their inner wording so containment
/// matching can find keywords inside them.
fn tokenize_symptoms(text: &str) -> Vec<String> {
    text.split([',', ';', '.', '\n'])
        .map(|fragment| fragment.trim().to_lowercase())
        .filter(|fragment| !fragment.is_empty())
        .collect()
}

#[async_trait]
impl CapabilityHandler for DiseaseAnalysisTool {
    async fn handle(&self, arguments: Value) -> Result<Value, HandlerError> {
        let crop_type = str_arg(&arguments, "crop_type");
        let symptoms_text = str_arg(&arguments, "symptoms_text");

        let location = str_arg(&arguments, "location");
        let location = if location.is_empty() {
            DEFAULT_REGION.to_string()
        } else {
            generalize(&location, self.location_precision)
        };

        let tokens = tokenize_symptoms(&symptoms_text);
        let diagnosis = self.engine.diagnose(&tokens, &crop_type);
        log::info!(
            "disease analysis for crop '{}': {} (confidence {:.2})",
            crop_type,
            diagnosis.condition_name,
            diagnosis.confidence
        );

        Ok(json!({
            "status": "success",
            "crop_type": crop_type,
            "location": location,
            "diagnosis": diagnosis,
        }))
    }
}
