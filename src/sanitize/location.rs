//! Location generalization.
//!
//! Reduces a free-text location string to a configured precision tier so that
//! responses and audit lines never carry more geography than policy allows.

use serde::{Deserialize, Serialize};

/// Precision tier for location generalization.
///
/// The tier names the *last* segment kept: `City` keeps one comma-separated
/// segment, `District` two, `State` three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationPrecision {
    City,
    District,
    State,
}

impl Default for LocationPrecision {
    fn default() -> Self {
        Self::City
    }
}

impl LocationPrecision {
    /// Number of comma-separated segments retained at this tier.
    pub fn segments(self) -> usize {
        match self {
            Self::City => 1,
            Self::District => 2,
            Self::State => 3,
        }
    }
}

/// Generalize a location string to the given precision.
///
/// Splits on commas, trims each segment, and joins the first N segments with
/// `", "`. Fewer segments than the tier asks for are returned as-is; the
/// result is never padded. Empty input is returned unchanged.
pub fn generalize(location: &str, precision: LocationPrecision) -> String {
    if location.is_empty() {
        return String::new();
    }
    location
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .take(precision.segments())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_precision() {
        assert_eq!(
            generalize("Bangalore, Karnataka, India", LocationPrecision::City),
            "Bangalore"
        );
    }

    #[test]
    fn test_district_precision() {
        assert_eq!(
            generalize("Bangalore, Karnataka, India", LocationPrecision::District),
            "Bangalore, Karnataka"
        );
    }

    #[test]
    fn test_state_precision() {
        assert_eq!(
            generalize("Bangalore, Karnataka, India", LocationPrecision::State),
            "Bangalore, Karnataka, India"
        );
    }

    #[test]
    fn test_fewer_segments_than_tier() {
        assert_eq!(generalize("SoloCity", LocationPrecision::State), "SoloCity");
        assert_eq!(
            generalize("Mysore, Karnataka", LocationPrecision::State),
            "Mysore, Karnataka"
        );
    }

    #[test]
    fn test_empty_input_unchanged() {
        assert_eq!(generalize("", LocationPrecision::City), "");
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        assert_eq!(
            generalize("  Hubli ,  Dharwad , Karnataka", LocationPrecision::District),
            "Hubli, Dharwad"
        );
    }
}
