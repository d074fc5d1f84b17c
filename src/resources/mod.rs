//! # Resource Handlers
//!
//! Static reference data exposed as resource-kind capabilities. Resources
//! take no meaningful arguments; their payloads still pass through the
//! outbound sanitization boundary like any other response.

pub mod crop_calendar;
pub mod disease_database;

pub use crop_calendar::CropCalendarResource;
pub use disease_database::DiseaseDatabaseResource;
