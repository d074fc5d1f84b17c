//! The fixed condition catalog the matching engine scores against.

/// Crops a condition applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CropScope {
    /// Applies regardless of crop (nutrient deficiencies and the like).
    All,
    /// Applies only to the listed crops (matched case-insensitively).
    Only(Vec<String>),
}

/// One catalog entry: a known condition with its matchable symptom keywords,
/// treatments, and recovery timeline.
#[derive(Debug, Clone)]
pub struct ConditionEntry {
    pub id: String,
    pub display_name: String,
    /// Lowercase keyword fragments matched against symptom tokens.
    pub symptom_keywords: Vec<String>,
    pub applicable_crops: CropScope,
    pub treatments: Vec<String>,
    pub expected_timeline: String,
}

impl ConditionEntry {
    /// Whether this entry applies to the given crop filter
    /// (case-insensitive; `All` always applies).
    pub fn applies_to(&self, crop_filter: &str) -> bool {
        match &self.applicable_crops {
            CropScope::All => true,
            CropScope::Only(crops) => crops
                .iter()
                .any(|crop| crop.eq_ignore_ascii_case(crop_filter)),
        }
    }
}

fn entry(
    id: &str,
    display_name: &str,
    keywords: &[&str],
    crops: CropScope,
    treatments: &[&str],
    timeline: &str,
) -> ConditionEntry {
    ConditionEntry {
        id: id.to_string(),
        display_name: display_name.to_string(),
        symptom_keywords: keywords.iter().map(|k| k.to_string()).collect(),
        applicable_crops: crops,
        treatments: treatments.iter().map(|t| t.to_string()).collect(),
        expected_timeline: timeline.to_string(),
    }
}

fn only(crops: &[&str]) -> CropScope {
    CropScope::Only(crops.iter().map(|c| c.to_string()).collect())
}

/// The compiled-in condition catalog.
///
/// Iteration order is part of the engine contract: it is the deterministic
/// tie-break when two conditions score equally.
pub fn builtin_conditions() -> Vec<ConditionEntry> {
    vec![
        entry(
            "late_blight",
            "Late Blight",
            &["dark spots", "white mold", "brown lesions", "leaf decay"],
            only(&["tomato", "potato"]),
            &[
                "Apply copper-based fungicide immediately",
                "Remove infected plant material",
                "Improve air circulation",
                "Avoid overhead watering",
            ],
            "7-14 days for improvement",
        ),
        entry(
            "powdery_mildew",
            "Powdery Mildew",
            &["white powder", "yellowing", "stunted growth"],
            only(&["grape", "wheat", "rose"]),
            &[
                "Apply sulfur-based fungicide",
                "Use milk spray (1:10 ratio with water)",
                "Increase plant spacing",
                "Prune for better airflow",
            ],
            "5-10 days for improvement",
        ),
        entry(
            "bacterial_wilt",
            "Bacterial Wilt",
            &["wilting", "yellowing", "vascular browning"],
            only(&["tomato", "potato", "eggplant"]),
            &[
                "Remove infected plants immediately",
                "Apply copper compounds to healthy plants",
                "Improve soil drainage",
                "Rotate crops next season",
            ],
            "14-21 days for improvement",
        ),
        entry(
            "rice_blast",
            "Rice Blast",
            &[
                "diamond shaped lesions",
                "gray centers",
                "brown borders",
                "neck rot",
            ],
            only(&["rice", "paddy"]),
            &[
                "Apply tricyclazole 75% WP at 0.6g/L",
                "Drain the field and reduce nitrogen",
                "Remove infected debris",
                "Switch to resistant varieties next season",
            ],
            "10-14 days for improvement",
        ),
        entry(
            "wheat_rust",
            "Wheat Rust",
            &["orange pustules", "red pustules", "rust", "yellowing leaves"],
            only(&["wheat", "barley"]),
            &[
                "Apply propiconazole 25% EC at 1ml/L",
                "Remove volunteer plants",
                "Avoid dense planting",
                "Use resistant varieties",
            ],
            "10-14 days for improvement",
        ),
        entry(
            "nitrogen_deficiency",
            "Nitrogen Deficiency",
            &["yellowing leaves", "stunted growth", "poor yield"],
            CropScope::All,
            &[
                "Apply nitrogen-rich fertilizer",
                "Use fish emulsion or blood meal",
                "Apply compost",
                "Monitor soil pH",
            ],
            "7-14 days for improvement",
        ),
    ]
}
