//! Soil analysis tool backed by an external soil data provider.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::providers::ExternalProvider;
use crate::registry::{CapabilityHandler, HandlerError};

pub struct SoilAnalysisTool {
    provider: Arc<dyn ExternalProvider>,
}

impl SoilAnalysisTool {
    pub fn new(provider: Arc<dyn ExternalProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl CapabilityHandler for SoilAnalysisTool {
    async fn handle(&self, arguments: Value) -> Result<Value, HandlerError> {
        let latitude = arguments.get("latitude").and_then(Value::as_f64);
        let longitude = arguments.get("longitude").and_then(Value::as_f64);

        // Presence is enforced by the dispatcher; value-level validity is a
        // soft error payload, not a dispatch error kind.
        let (latitude, longitude) = match (latitude, longitude) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => {
                return Ok(json!({
                    "error": "invalid_coordinates",
                    "message": "latitude and longitude must be numbers",
                }))
            }
        };

        if !(-90.0..=90.0).contains(&latitude) {
            return Ok(json!({
                "error": "invalid_latitude",
                "message": "Latitude must be between -90 and 90 degrees",
            }));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Ok(json!({
                "error": "invalid_longitude",
                "message": "Longitude must be between -180 and 180 degrees",
            }));
        }

        let soil = self
            .provider
            .fetch(&json!({"latitude": latitude, "longitude": longitude}))
            .await?;

        Ok(json!({
            "status": "success",
            "coordinates": {"latitude": latitude, "longitude": longitude},
            "soil": soil,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ProviderError;

    struct StubProvider;

    #[async_trait]
    impl ExternalProvider for StubProvider {
        fn name(&self) -> &str {
            "soil-stub"
        }

        async fn fetch(&self, _params: &Value) -> Result<Value, ProviderError> {
            Ok(json!({"ph": 6.4, "texture": "clay loam"}))
        }
    }

    #[tokio::test]
    async fn test_valid_coordinates_fetch_soil_data() {
        let tool = SoilAnalysisTool::new(Arc::new(StubProvider));
        let payload = tool
            .handle(json!({"latitude": 12.97, "longitude": 77.59}))
            .await
            .unwrap();
        assert_eq!(payload["status"], "success");
        assert_eq!(payload["soil"]["ph"], 6.4);
        assert_eq!(payload["coordinates"]["longitude"], 77.59);
    }

    #[tokio::test]
    async fn test_out_of_range_latitude() {
        let tool = SoilAnalysisTool::new(Arc::new(StubProvider));
        let payload = tool
            .handle(json!({"latitude": 91.0, "longitude": 10.0}))
            .await
            .unwrap();
        assert_eq!(payload["error"], "invalid_latitude");
    }

    #[tokio::test]
    async fn test_out_of_range_longitude() {
        let tool = SoilAnalysisTool::new(Arc::new(StubProvider));
        let payload = tool
            .handle(json!({"latitude": 10.0, "longitude": -200.0}))
            .await
            .unwrap();
        assert_eq!(payload["error"], "invalid_longitude");
    }

    #[tokio::test]
    async fn test_non_numeric_coordinates() {
        let tool = SoilAnalysisTool::new(Arc::new(StubProvider));
        let payload = tool
            .handle(json!({"latitude": "twelve", "longitude": 77.0}))
            .await
            .unwrap();
        assert_eq!(payload["error"], "invalid_coordinates");
    }
}
