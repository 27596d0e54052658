//! Data models shared across the query pipeline
//!
//! This module contains the data structures exchanged between the query
//! interpreter, the provider clients, and the response composer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A resolved place: coordinates plus the provider's canonical display name.
///
/// Produced once per query by the geocoder and consumed by both fetchers.
/// Never cached across queries.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Canonical display name reported by the geocoder
    pub display_name: String,
}

impl Coordinates {
    /// Create a new resolved place
    pub fn new(latitude: f64, longitude: f64, display_name: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            display_name: display_name.into(),
        }
    }

    /// Format coordinates as a string
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Raw current conditions as reported by the weather provider.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CurrentConditions {
    /// Temperature in Celsius
    pub temperature: f64,
    /// Precipitation probability in percent, absent when the provider
    /// doesn't report one
    pub precipitation_probability: Option<f64>,
}

/// A current weather reading, reduced to what the answer sentence needs.
///
/// Values are truncated toward zero, not rounded.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WeatherReading {
    /// Temperature in whole degrees Celsius
    pub temperature_celsius: i32,
    /// Precipitation probability in whole percent
    pub precipitation_probability_percent: i32,
    /// When this reading was retrieved
    pub retrieved_at: DateTime<Utc>,
}

impl From<&CurrentConditions> for WeatherReading {
    fn from(current: &CurrentConditions) -> Self {
        Self {
            temperature_celsius: current.temperature as i32,
            precipitation_probability_percent: current.precipitation_probability.unwrap_or(0.0)
                as i32,
            retrieved_at: Utc::now(),
        }
    }
}

/// One tagged element returned by the geographic-feature query provider.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Feature {
    /// Raw tag mapping of the feature
    pub tags: HashMap<String, String>,
}

impl Feature {
    /// Create a feature from tag pairs
    pub fn from_tags<K, V, I>(tags: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            tags: tags
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// The feature's name tag, trimmed; `None` when absent or empty
    pub fn name(&self) -> Option<&str> {
        self.tags
            .get("name")
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
    }

    /// Look up a tag value, empty string when absent
    pub fn tag(&self, key: &str) -> &str {
        self.tags.get(key).map(String::as_str).unwrap_or("")
    }
}

/// What the user asked for, derived from keyword rules.
///
/// Computed for every query but not used to gate execution: both fetchers
/// always run once a place name was extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intent {
    /// The query mentions weather terms
    pub wants_weather: bool,
    /// The query mentions places or trip-planning terms
    pub wants_places: bool,
}
