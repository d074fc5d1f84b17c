//! The compiled-in capability catalog.
//!
//! Construction wires every known descriptor to its handler; configuration
//! then selects the enabled subset at registry build time.

use std::sync::Arc;

use serde_json::json;

use crate::diagnosis::DiagnosisEngine;
use crate::prompts::{
    CropPlanningPrompt, DiseaseDiagnosisPrompt, SoilAdvisoryPrompt, WeatherAdvisoryPrompt,
};
use crate::providers::ExternalProvider;
use crate::resources::{CropCalendarResource, DiseaseDatabaseResource};
use crate::sanitize::location::LocationPrecision;
use crate::tools::{
    AgriculturalResearchTool, DiseaseAnalysisTool, GovernmentSchemesTool, SoilAnalysisTool,
    WeatherAnalysisTool,
};

use super::capability::{CapabilityDescriptor, CapabilityKind};

/// External collaborators the catalog wires into provider-backed tools.
pub struct CatalogDeps {
    pub weather: Arc<dyn ExternalProvider>,
    pub soil: Arc<dyn ExternalProvider>,
    pub search: Arc<dyn ExternalProvider>,
}

/// Build every known capability descriptor.
pub fn builtin_catalog(
    location_precision: LocationPrecision,
    deps: &CatalogDeps,
) -> Vec<CapabilityDescriptor> {
    let engine = Arc::new(DiagnosisEngine::with_builtin_catalog());

    vec![
        // -- tools ----------------------------------------------------------
        CapabilityDescriptor::new(
            "disease_analysis",
            CapabilityKind::Tool,
            "Analyze crop diseases from symptom descriptions with ranked diagnosis",
            json!({
                "type": "object",
                "properties": {
                    "crop_type": {
                        "type": "string",
                        "description": "Type of crop being analyzed (e.g., Wheat, Rice, Tomato)",
                    },
                    "symptoms_text": {
                        "type": "string",
                        "description": "Detailed description of observed symptoms",
                    },
                    "location": {
                        "type": "string",
                        "description": "Location of the crop (city, state)",
                    },
                },
                "required": ["crop_type", "symptoms_text"],
            }),
            Arc::new(DiseaseAnalysisTool::new(engine, location_precision)),
        ),
        CapabilityDescriptor::new(
            "weather_analysis",
            CapabilityKind::Tool,
            "Get weather data and agricultural forecasts for farming decisions",
            json!({
                "type": "object",
                "properties": {
                    "location": {
                        "type": "string",
                        "description": "Location for weather data (city, state)",
                    },
                    "latitude": {"type": "number", "description": "Latitude coordinate (optional)"},
                    "longitude": {"type": "number", "description": "Longitude coordinate (optional)"},
                },
                "required": ["location"],
            }),
            Arc::new(WeatherAnalysisTool::new(deps.weather.clone())),
        ),
        CapabilityDescriptor::new(
            "soil_analysis",
            CapabilityKind::Tool,
            "Analyze soil properties and get recommendations for crop planning",
            json!({
                "type": "object",
                "properties": {
                    "latitude": {"type": "number", "description": "Latitude coordinate"},
                    "longitude": {"type": "number", "description": "Longitude coordinate"},
                },
                "required": ["latitude", "longitude"],
            }),
            Arc::new(SoilAnalysisTool::new(deps.soil.clone())),
        ),
        CapabilityDescriptor::new(
            "government_schemes_search",
            CapabilityKind::Tool,
            "Search for government agricultural schemes, subsidies, and assistance programs",
            json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search query (e.g., 'crop insurance', 'fertilizer subsidy')",
                    },
                    "state": {
                        "type": "string",
                        "description": "State name (default: Karnataka)",
                        "default": "Karnataka",
                    },
                    "max_results": {
                        "type": "integer",
                        "description": "Maximum number of results to return",
                        "default": 10,
                    },
                },
                "required": ["query"],
            }),
            Arc::new(GovernmentSchemesTool::new(deps.search.clone())),
        ),
        CapabilityDescriptor::new(
            "agricultural_research_search",
            CapabilityKind::Tool,
            "Search agricultural research, best practices, and scientific literature",
            json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string", "description": "Research query"},
                    "search_type": {
                        "type": "string",
                        "enum": ["general", "agricultural", "scientific"],
                        "description": "Type of search to perform",
                        "default": "agricultural",
                    },
                },
                "required": ["query"],
            }),
            Arc::new(AgriculturalResearchTool::new(deps.search.clone())),
        ),
        // -- resources ------------------------------------------------------
        CapabilityDescriptor::new(
            "crop_calendar",
            CapabilityKind::Resource,
            "Seasonal crop planting and harvesting calendar for Karnataka",
            json!({"type": "object", "properties": {}}),
            Arc::new(CropCalendarResource),
        ),
        CapabilityDescriptor::new(
            "disease_database",
            CapabilityKind::Resource,
            "Database of common crop diseases, symptoms, and treatments",
            json!({"type": "object", "properties": {}}),
            Arc::new(DiseaseDatabaseResource),
        ),
        // -- prompts --------------------------------------------------------
        CapabilityDescriptor::new(
            "disease_diagnosis",
            CapabilityKind::Prompt,
            "Structured prompt for crop disease diagnosis and treatment recommendations",
            json!({
                "type": "object",
                "properties": {
                    "crop_type": {"type": "string", "description": "Type of crop being analyzed"},
                    "symptoms": {"type": "string", "description": "Observed symptoms and signs"},
                    "location": {"type": "string", "description": "Geographic location"},
                },
                "required": ["crop_type", "symptoms"],
            }),
            Arc::new(DiseaseDiagnosisPrompt),
        ),
        CapabilityDescriptor::new(
            "crop_planning",
            CapabilityKind::Prompt,
            "Comprehensive crop planning and management guidance",
            json!({
                "type": "object",
                "properties": {
                    "crop_type": {"type": "string", "description": "Intended crop to grow"},
                    "season": {"type": "string", "description": "Planting season (Kharif/Rabi/Summer)"},
                    "soil_type": {"type": "string", "description": "Soil type and properties"},
                },
                "required": ["crop_type", "season"],
            }),
            Arc::new(CropPlanningPrompt),
        ),
        CapabilityDescriptor::new(
            "weather_advisory",
            CapabilityKind::Prompt,
            "Weather-based field operation and crop protection advisory",
            json!({
                "type": "object",
                "properties": {
                    "location": {"type": "string", "description": "Farm location"},
                    "current_weather": {"type": "string", "description": "Current conditions"},
                    "forecast": {"type": "string", "description": "Forecast summary"},
                },
                "required": ["location"],
            }),
            Arc::new(WeatherAdvisoryPrompt),
        ),
        CapabilityDescriptor::new(
            "soil_advisory",
            CapabilityKind::Prompt,
            "Soil report interpretation and amendment guidance",
            json!({
                "type": "object",
                "properties": {
                    "soil_data": {"type": "string", "description": "Soil test results"},
                    "crop_plans": {"type": "string", "description": "Planned crops"},
                    "location": {"type": "string", "description": "Farm location"},
                },
                "required": ["soil_data"],
            }),
            Arc::new(SoilAdvisoryPrompt),
        ),
    ]
}
