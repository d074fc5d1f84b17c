//! # Diagnosis Matching Engine
//!
//! Scores free-text symptom observations against a fixed condition catalog
//! and returns a ranked, confidence-bounded result. Pure and bounded: no
//! I/O, no retries, and ambiguous input degrades to a low-confidence
//! fallback rather than an error.

pub mod catalog;
pub mod engine;

pub use catalog::{builtin_conditions, ConditionEntry, CropScope};
pub use engine::{DiagnosisEngine, DiagnosisResult, FALLBACK_CONFIDENCE, MATCH_THRESHOLD};
