//! Symptom-to-condition matching engine.
//!
//! A greedy single-pass scan over the fixed catalog, O(conditions × keywords
//! × tokens); acceptable because the catalog is small and static. The engine
//! never errors and never returns "no result": below the match threshold it
//! returns a fixed low-confidence fallback whose floor confidence signals
//! low reliability to downstream consumers.

use serde::{Deserialize, Serialize};

use super::catalog::{builtin_conditions, ConditionEntry};

/// Minimum best score required to report a catalog condition.
pub const MATCH_THRESHOLD: f64 = 0.3;

/// Confidence floor reported by the fallback result.
pub const FALLBACK_CONFIDENCE: f64 = 0.2;

/// A ranked diagnosis. Constructed fresh per call; the caller owns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    pub condition_name: String,
    /// In `[0, 1]`; exactly [`FALLBACK_CONFIDENCE`] for the fallback.
    pub confidence: f64,
    pub matched_symptom_tokens: Vec<String>,
    pub treatments: Vec<String>,
    pub timeline: String,
}

/// Scores symptom tokens against the condition catalog.
#[derive(Debug, Clone)]
pub struct DiagnosisEngine {
    catalog: Vec<ConditionEntry>,
}

impl DiagnosisEngine {
    pub fn new(catalog: Vec<ConditionEntry>) -> Self {
        Self { catalog }
    }

    pub fn with_builtin_catalog() -> Self {
        Self::new(builtin_conditions())
    }

    /// Diagnose from lower-cased free-text symptom fragments and an optional
    /// crop filter (empty string means no filter).
    ///
    /// A token matches a condition when any keyword is contained in the token
    /// or contains it, case-insensitively. Score is matched tokens over the
    /// condition's keyword count (zero for an empty keyword set, capped at
    /// 1.0). The strictly highest score wins; on ties the first condition in
    /// catalog order is kept — iteration order is the deterministic
    /// tie-break, not an accident of implementation.
    pub fn diagnose(&self, symptom_tokens: &[String], crop_filter: &str) -> DiagnosisResult {
        let mut best: Option<(&ConditionEntry, f64, Vec<String>)> = None;

        for condition in &self.catalog {
            if !crop_filter.is_empty() && !condition.applies_to(crop_filter) {
                continue;
            }
            if condition.symptom_keywords.is_empty() {
                continue;
            }

            let mut matched = Vec::new();
            for token in symptom_tokens {
                let token_lower = token.to_lowercase();
                let hit = condition.symptom_keywords.iter().any(|keyword| {
                    token_lower.contains(keyword.as_str()) || keyword.contains(&token_lower)
                });
                if hit {
                    matched.push(token.clone());
                }
            }

            let score =
                (matched.len() as f64 / condition.symptom_keywords.len() as f64).min(1.0);
            let improves = match &best {
                Some((_, best_score, _)) => score > *best_score,
                None => score > 0.0,
            };
            if improves {
                best = Some((condition, score, matched));
            }
        }

        match best {
            Some((condition, score, matched)) if score > MATCH_THRESHOLD => DiagnosisResult {
                condition_name: condition.display_name.clone(),
                confidence: score,
                matched_symptom_tokens: matched,
                treatments: condition.treatments.clone(),
                timeline: condition.expected_timeline.clone(),
            },
            _ => Self::fallback(),
        }
    }

    /// The fixed low-confidence result returned when nothing scores above the
    /// threshold.
    pub fn fallback() -> DiagnosisResult {
        DiagnosisResult {
            condition_name: "Unknown Condition".to_string(),
            confidence: FALLBACK_CONFIDENCE,
            matched_symptom_tokens: Vec::new(),
            treatments: vec![
                "Consult your local agricultural extension office for expert review".to_string(),
                "Consider laboratory analysis of affected plant tissue".to_string(),
            ],
            timeline: "Pending expert review".to_string(),
        }
    }
}
