//! Geocoding client for Nominatim
//!
//! Resolves a free-text place name to coordinates plus the provider's
//! canonical display name. An empty result set means "place not found" and
//! is reported as `None` rather than an error.

use crate::config::TourGuideConfig;
use crate::models::Coordinates;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Resolves place names to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve a place name; `None` when the provider has no match.
    async fn resolve(&self, place_name: &str) -> Result<Option<Coordinates>>;
}

/// Nominatim search API client
pub struct NominatimClient {
    client: Client,
    base_url: String,
}

/// One entry of the Nominatim search response. Latitude and longitude are
/// returned as strings by the API.
#[derive(Debug, Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
    display_name: Option<String>,
}

impl NominatimClient {
    /// Create a new geocoding client
    pub fn new(config: &TourGuideConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.providers.timeout_seconds.into());

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(config.providers.user_agent.clone())
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.providers.geocoding_base_url.clone(),
        })
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn resolve(&self, place_name: &str) -> Result<Option<Coordinates>> {
        info!("Geocoding place: '{}'", place_name);

        let url = format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url,
            urlencoding::encode(place_name)
        );
        debug!("Nominatim request URL: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Geocoding request failed for '{place_name}'"))?
            .error_for_status()
            .with_context(|| format!("Geocoding request rejected for '{place_name}'"))?;

        let results: Vec<SearchResult> = response
            .json()
            .await
            .with_context(|| "Failed to parse Nominatim search response")?;

        let Some(best) = results.into_iter().next() else {
            warn!("No geocoding results for '{}'", place_name);
            return Ok(None);
        };

        let latitude: f64 = best
            .lat
            .parse()
            .with_context(|| format!("Invalid latitude in geocoding response: {}", best.lat))?;
        let longitude: f64 = best
            .lon
            .parse()
            .with_context(|| format!("Invalid longitude in geocoding response: {}", best.lon))?;
        let display_name = best
            .display_name
            .unwrap_or_else(|| place_name.to_string());

        let coordinates = Coordinates::new(latitude, longitude, display_name);
        info!(
            "Resolved '{}' to ({})",
            place_name,
            coordinates.format_coordinates()
        );

        Ok(Some(coordinates))
    }
}
