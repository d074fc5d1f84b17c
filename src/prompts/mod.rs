//! # Prompt Handlers
//!
//! Prompt-kind capabilities: fixed templates a client can fill to get a
//! structured expert prompt. Missing arguments fall back to neutral
//! placeholders rather than failing, so a partially specified request still
//! yields a usable prompt.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::registry::{CapabilityHandler, HandlerError};

fn arg_or(arguments: &Value, key: &str, fallback: &str) -> String {
    let value = arguments
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim()
        .to_string();
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

fn prompt_payload(name: &str, prompt: String) -> Value {
    json!({
        "description": format!("Generated {name} prompt"),
        "prompt": prompt,
    })
}

/// Structured prompt for crop disease diagnosis.
#[derive(Debug, Default)]
pub struct DiseaseDiagnosisPrompt;

#[async_trait]
impl CapabilityHandler for DiseaseDiagnosisPrompt {
    async fn handle(&self, arguments: Value) -> Result<Value, HandlerError> {
        let crop_type = arg_or(&arguments, "crop_type", "unknown crop");
        let symptoms = arg_or(&arguments, "symptoms", "no symptoms provided");
        let location = arg_or(&arguments, "location", "unspecified location");
        let prompt = format!(
            "You are an expert agricultural pathologist. Analyze the following crop \
             health issue and provide comprehensive recommendations.\n\n\
             Crop Type: {crop_type}\n\
             Location: {location}\n\
             Observed Symptoms: {symptoms}\n\n\
             Provide: 1) most likely disease(s) with pathogen name and confidence, \
             2) disease cycle and spread mechanism, 3) treatment options (cultural, \
             chemical, biological) with dosages, 4) prevention strategies for next \
             season, 5) expected recovery timeline."
        );
        Ok(prompt_payload("disease_diagnosis", prompt))
    }
}

/// Structured prompt for seasonal crop planning.
#[derive(Debug, Default)]
pub struct CropPlanningPrompt;

#[async_trait]
impl CapabilityHandler for CropPlanningPrompt {
    async fn handle(&self, arguments: Value) -> Result<Value, HandlerError> {
        let crop_type = arg_or(&arguments, "crop_type", "unknown crop");
        let season = arg_or(&arguments, "season", "unspecified season");
        let soil_type = arg_or(&arguments, "soil_type", "unknown soil type");
        let prompt = format!(
            "You are an experienced agronomist. Prepare a crop management plan.\n\n\
             Crop: {crop_type}\n\
             Season: {season}\n\
             Soil Type: {soil_type}\n\n\
             Cover: 1) variety selection and seed rate, 2) land preparation and \
             sowing window, 3) nutrient and irrigation schedule, 4) pest and disease \
             watch-points for the season, 5) expected yield and harvest timing."
        );
        Ok(prompt_payload("crop_planning", prompt))
    }
}

/// Structured prompt for weather-based advisories.
#[derive(Debug, Default)]
pub struct WeatherAdvisoryPrompt;

#[async_trait]
impl CapabilityHandler for WeatherAdvisoryPrompt {
    async fn handle(&self, arguments: Value) -> Result<Value, HandlerError> {
        let location = arg_or(&arguments, "location", "unspecified location");
        let current_weather = arg_or(&arguments, "current_weather", "unknown conditions");
        let forecast = arg_or(&arguments, "forecast", "no forecast available");
        let prompt = format!(
            "You are an agricultural meteorology advisor. Prepare a farm advisory.\n\n\
             Location: {location}\n\
             Current Weather: {current_weather}\n\
             Forecast: {forecast}\n\n\
             Advise on: 1) field operations safe to carry out this week, 2) \
             irrigation adjustments, 3) disease and pest risk from the expected \
             weather, 4) protective measures for standing crops."
        );
        Ok(prompt_payload("weather_advisory", prompt))
    }
}

/// Structured prompt for soil report interpretation.
#[derive(Debug, Default)]
pub struct SoilAdvisoryPrompt;

#[async_trait]
impl CapabilityHandler for SoilAdvisoryPrompt {
    async fn handle(&self, arguments: Value) -> Result<Value, HandlerError> {
        let soil_data = arg_or(&arguments, "soil_data", "no soil data provided");
        let crop_plans = arg_or(&arguments, "crop_plans", "no crop plans specified");
        let location = arg_or(&arguments, "location", "unspecified location");
        let prompt = format!(
            "You are a soil scientist. Interpret the following soil information for \
             a farmer.\n\n\
             Soil Data: {soil_data}\n\
             Planned Crops: {crop_plans}\n\
             Location: {location}\n\n\
             Provide: 1) soil health assessment, 2) amendment and fertilization \
             recommendations with quantities, 3) crop suitability for the planned \
             crops, 4) long-term soil management practices."
        );
        Ok(prompt_payload("soil_advisory", prompt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disease_prompt_includes_arguments() {
        let payload = DiseaseDiagnosisPrompt
            .handle(json!({"crop_type": "tomato", "symptoms": "dark spots"}))
            .await
            .unwrap();
        let prompt = payload["prompt"].as_str().unwrap();
        assert!(prompt.contains("Crop Type: tomato"));
        assert!(prompt.contains("dark spots"));
        assert!(prompt.contains("unspecified location"));
    }

    #[tokio::test]
    async fn test_missing_arguments_use_placeholders() {
        let payload = CropPlanningPrompt.handle(json!({})).await.unwrap();
        let prompt = payload["prompt"].as_str().unwrap();
        assert!(prompt.contains("unknown crop"));
        assert!(prompt.contains("unspecified season"));
    }
}
