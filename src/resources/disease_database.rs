//! Crop disease database resource.
//!
//! The disease entries are derived from the matching engine's catalog so the
//! database a client reads and the conditions the engine can diagnose never
//! drift apart.

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use crate::diagnosis::{builtin_conditions, CropScope};
use crate::registry::{CapabilityHandler, HandlerError};

#[derive(Debug, Default)]
pub struct DiseaseDatabaseResource;

fn crops_value(scope: &CropScope) -> Value {
    match scope {
        CropScope::All => json!("all"),
        CropScope::Only(crops) => json!(crops),
    }
}

#[async_trait]
impl CapabilityHandler for DiseaseDatabaseResource {
    async fn handle(&self, _arguments: Value) -> Result<Value, HandlerError> {
        let catalog = builtin_conditions();

        let mut diseases = Map::new();
        let mut crops_covered: Vec<String> = Vec::new();
        for condition in &catalog {
            if let CropScope::Only(crops) = &condition.applicable_crops {
                for crop in crops {
                    if !crops_covered.contains(crop) {
                        crops_covered.push(crop.clone());
                    }
                }
            }
            diseases.insert(
                condition.id.clone(),
                json!({
                    "name": condition.display_name,
                    "symptoms": condition.symptom_keywords,
                    "affected_crops": crops_value(&condition.applicable_crops),
                    "treatments": condition.treatments,
                    "expected_timeline": condition.expected_timeline,
                }),
            );
        }

        Ok(json!({
            "status": "success",
            "database_info": {
                "total_diseases": catalog.len(),
                "crops_covered": crops_covered,
            },
            "categories": {
                "fungal": {
                    "name": "Fungal Diseases",
                    "description": "Thrive in warm, humid conditions and spread through spores",
                    "common_symptoms": ["Spots on leaves", "Wilting", "Rotting", "Powdery growth"],
                },
                "bacterial": {
                    "name": "Bacterial Diseases",
                    "description": "Spread through water and insects; hard to control once established",
                    "common_symptoms": ["Leaf spots", "Wilting", "Cankers", "Bacterial ooze"],
                },
                "deficiency": {
                    "name": "Nutrient Deficiencies",
                    "description": "Systemic symptoms from missing soil nutrients",
                    "common_symptoms": ["Yellowing", "Stunting", "Poor yield"],
                },
            },
            "diseases": diseases,
            "prevention_principles": [
                "Use certified, disease-free seeds",
                "Follow crop rotation practices",
                "Maintain field sanitation",
                "Monitor crops regularly",
                "Prefer resistant varieties when available",
            ],
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_database_mirrors_engine_catalog() {
        let payload = DiseaseDatabaseResource.handle(json!({})).await.unwrap();
        let diseases = payload["diseases"].as_object().unwrap();
        assert_eq!(
            diseases.len(),
            builtin_conditions().len(),
            "database and engine catalog must stay in sync"
        );
        assert_eq!(diseases["late_blight"]["name"], "Late Blight");
        assert_eq!(diseases["nitrogen_deficiency"]["affected_crops"], "all");
    }

    #[tokio::test]
    async fn test_crops_covered_lists_scoped_crops() {
        let payload = DiseaseDatabaseResource.handle(json!({})).await.unwrap();
        let covered = payload["database_info"]["crops_covered"]
            .as_array()
            .unwrap();
        assert!(covered.contains(&json!("tomato")));
        assert!(covered.contains(&json!("rice")));
    }
}
