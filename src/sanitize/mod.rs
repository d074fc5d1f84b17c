//! # Sanitization
//!
//! Pure PII sanitization primitives and the zero-retention boundary that
//! composes them. Everything here is constructed from policy at startup and
//! holds no mutable state: the pattern sanitizer and location generalizer are
//! pure functions over their input, and the boundary produces fresh
//! structures without retaining what passes through it.

pub mod boundary;
pub mod location;
pub mod patterns;

pub use boundary::{SanitizeError, ZeroRetentionBoundary};
pub use location::{generalize, LocationPrecision};
pub use patterns::{CompiledPattern, PatternSanitizer};
