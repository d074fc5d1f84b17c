//! Karnataka crop calendar resource.

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use serde_json::{json, Value};

use crate::registry::{CapabilityHandler, HandlerError};

/// Static seasonal planting and harvesting calendar, with the current season
/// computed from the clock at read time.
#[derive(Debug, Default)]
pub struct CropCalendarResource;

/// Season for a calendar month. June belongs to kharif: monsoon sowing takes
/// precedence over the tail of the summer window.
fn season_for_month(month: u32) -> &'static str {
    match month {
        6..=10 => "kharif",
        11 | 12 | 1..=3 => "rabi",
        _ => "summer",
    }
}

#[async_trait]
impl CapabilityHandler for CropCalendarResource {
    async fn handle(&self, _arguments: Value) -> Result<Value, HandlerError> {
        let current_month = Utc::now().month();
        Ok(json!({
            "status": "success",
            "region": "Karnataka, India",
            "current_season": season_for_month(current_month),
            "seasons": {
                "kharif": {
                    "name": "Kharif (Monsoon Season)",
                    "period": "June - October",
                    "months": [6, 7, 8, 9, 10],
                    "description": "Monsoon-dependent crops grown during the rainy season",
                    "major_crops": ["Rice", "Cotton", "Sugarcane", "Maize", "Pulses"],
                },
                "rabi": {
                    "name": "Rabi (Winter Season)",
                    "period": "November - March",
                    "months": [11, 12, 1, 2, 3],
                    "description": "Winter crops grown with irrigation support",
                    "major_crops": ["Wheat", "Barley", "Gram", "Mustard", "Vegetables"],
                },
                "summer": {
                    "name": "Summer (Zaid Season)",
                    "period": "April - June",
                    "months": [4, 5, 6],
                    "description": "Short-duration crops under intensive irrigation",
                    "major_crops": ["Fodder crops", "Vegetables", "Watermelon", "Cucumber"],
                },
            },
            "crops": {
                "rice": {
                    "season": "Kharif",
                    "planting_months": [6, 7],
                    "harvesting_months": [10, 11],
                    "duration_days": 120,
                    "water_requirement": "High",
                    "soil_type": "Clay, clay loam",
                },
                "ragi": {
                    "season": "Kharif",
                    "planting_months": [6, 7, 8],
                    "harvesting_months": [11, 12],
                    "duration_days": 110,
                    "water_requirement": "Low",
                    "soil_type": "Red loam, sandy loam",
                },
                "cotton": {
                    "season": "Kharif",
                    "planting_months": [5, 6],
                    "harvesting_months": [11, 12, 1],
                    "duration_days": 180,
                    "water_requirement": "Medium",
                    "soil_type": "Black cotton soil",
                },
                "tomato": {
                    "season": "All seasons with irrigation",
                    "planting_months": [1, 2, 6, 7, 10, 11],
                    "harvesting_months": [4, 5, 9, 10, 1, 2],
                    "duration_days": 90,
                    "water_requirement": "Medium",
                    "soil_type": "Well-drained loam",
                },
            },
            "general_guidelines": [
                "Ensure proper drainage during heavy monsoon rains",
                "Use disease-resistant varieties during high humidity months",
                "Plan irrigation before the summer season begins",
                "Rotate cereals with pulses to maintain soil fertility",
            ],
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_boundaries() {
        assert_eq!(season_for_month(6), "kharif");
        assert_eq!(season_for_month(10), "kharif");
        assert_eq!(season_for_month(11), "rabi");
        assert_eq!(season_for_month(3), "rabi");
        assert_eq!(season_for_month(4), "summer");
        assert_eq!(season_for_month(5), "summer");
    }

    #[tokio::test]
    async fn test_calendar_payload_shape() {
        let payload = CropCalendarResource.handle(json!({})).await.unwrap();
        assert_eq!(payload["status"], "success");
        assert_eq!(payload["region"], "Karnataka, India");
        assert!(payload["seasons"]["kharif"]["major_crops"]
            .as_array()
            .unwrap()
            .contains(&json!("Rice")));
        let season = payload["current_season"].as_str().unwrap();
        assert!(["kharif", "rabi", "summer"].contains(&season));
    }
}
