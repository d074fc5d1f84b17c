//! Weather analysis tool backed by an external weather provider.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::providers::ExternalProvider;
use crate::registry::{CapabilityHandler, HandlerError};

use super::str_arg;

pub struct WeatherAnalysisTool {
    provider: Arc<dyn ExternalProvider>,
}

impl WeatherAnalysisTool {
    pub fn new(provider: Arc<dyn ExternalProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl CapabilityHandler for WeatherAnalysisTool {
    async fn handle(&self, arguments: Value) -> Result<Value, HandlerError> {
        let location = str_arg(&arguments, "location");
        let latitude = arguments.get("latitude").and_then(Value::as_f64);
        let longitude = arguments.get("longitude").and_then(Value::as_f64);

        if location.is_empty() && (latitude.is_none() || longitude.is_none()) {
            return Ok(json!({
                "error": "missing_location",
                "message": "Either location name or coordinates (latitude, longitude) are required",
            }));
        }

        let mut params = serde_json::Map::new();
        if !location.is_empty() {
            params.insert("location".to_string(), json!(location));
        }
        if let (Some(lat), Some(lon)) = (latitude, longitude) {
            params.insert("latitude".to_string(), json!(lat));
            params.insert("longitude".to_string(), json!(lon));
        }

        // Provider failures propagate; the dispatcher reports them
        // generically and keeps the detail server-side.
        let weather = self.provider.fetch(&Value::Object(params)).await?;

        Ok(json!({
            "status": "success",
            "location": location,
            "weather": weather,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ProviderError;
    use parking_lot::Mutex;

    struct StubProvider {
        response: Value,
        seen: Mutex<Option<Value>>,
    }

    impl StubProvider {
        fn new(response: Value) -> Self {
            Self {
                response,
                seen: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl ExternalProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        async fn fetch(&self, params: &Value) -> Result<Value, ProviderError> {
            *self.seen.lock() = Some(params.clone());
            Ok(self.response.clone())
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl ExternalProvider for FailingProvider {
        fn name(&self) -> &str {
            "failing"
        }

        async fn fetch(&self, _params: &Value) -> Result<Value, ProviderError> {
            Err(ProviderError::Fetch {
                provider: "failing".to_string(),
                message: "upstream 503".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_fetches_by_location() {
        let provider = Arc::new(StubProvider::new(json!({"temperature_avg": 27})));
        let tool = WeatherAnalysisTool::new(provider.clone());
        let payload = tool
            .handle(json!({"location": "Hubli"}))
            .await
            .unwrap();
        assert_eq!(payload["status"], "success");
        assert_eq!(payload["weather"]["temperature_avg"], 27);
        assert_eq!(provider.seen.lock().clone().unwrap()["location"], "Hubli");
    }

    #[tokio::test]
    async fn test_missing_location_and_coordinates() {
        let tool = WeatherAnalysisTool::new(Arc::new(StubProvider::new(json!({}))));
        let payload = tool.handle(json!({})).await.unwrap();
        assert_eq!(payload["error"], "missing_location");
    }

    #[tokio::test]
    async fn test_coordinates_alone_are_accepted() {
        let provider = Arc::new(StubProvider::new(json!({})));
        let tool = WeatherAnalysisTool::new(provider.clone());
        let payload = tool
            .handle(json!({"latitude": 12.97, "longitude": 77.59}))
            .await
            .unwrap();
        assert_eq!(payload["status"], "success");
        let seen = provider.seen.lock().clone().unwrap();
        assert_eq!(seen["latitude"], 12.97);
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let tool = WeatherAnalysisTool::new(Arc::new(FailingProvider));
        let err = tool.handle(json!({"location": "Hubli"})).await.unwrap_err();
        assert!(err.to_string().contains("failing"));
    }
}
