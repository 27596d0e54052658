//! `TourGuide` - rule-based travel assistant
//!
//! This library answers natural-language travel queries: it extracts a
//! place name from free text, fetches current weather and a ranked list of
//! tourist attractions for that place, and composes one text answer.

pub mod attractions;
pub mod composer;
pub mod config;
pub mod error;
pub mod geocode;
pub mod models;
pub mod query;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use attractions::{AttractionService, AttractionSet, FeatureProvider, OverpassClient};
pub use composer::ResponseComposer;
pub use config::TourGuideConfig;
pub use error::TourGuideError;
pub use geocode::{Geocoder, NominatimClient};
pub use models::{Coordinates, CurrentConditions, Feature, Intent, WeatherReading};
pub use weather::{OpenMeteoClient, WeatherProvider, WeatherService};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
