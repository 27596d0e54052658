//! Weather fetching via the Open-Meteo forecast API
//!
//! The client retrieves current temperature and precipitation probability
//! for resolved coordinates; the service turns a place name into the final
//! weather sentence, absorbing every failure into a user-readable string.

use crate::config::TourGuideConfig;
use crate::geocode::Geocoder;
use crate::models::{Coordinates, CurrentConditions, WeatherReading};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Provides current weather conditions for a coordinate pair.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current conditions; `None` when the provider response carries no
    /// current block.
    async fn current(&self, latitude: f64, longitude: f64) -> Result<Option<CurrentConditions>>;
}

/// Open-Meteo forecast API client
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
}

/// `OpenMeteo` API response structures
mod openmeteo {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub current: Option<CurrentData>,
    }

    #[derive(Debug, Deserialize)]
    pub struct CurrentData {
        #[serde(rename = "temperature_2m")]
        pub temperature: f64,
        pub precipitation_probability: Option<f64>,
    }
}

impl OpenMeteoClient {
    /// Create a new weather client
    pub fn new(config: &TourGuideConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.providers.timeout_seconds.into());

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(config.providers.user_agent.clone())
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.providers.weather_base_url.clone(),
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    async fn current(&self, latitude: f64, longitude: f64) -> Result<Option<CurrentConditions>> {
        info!(
            "Getting current weather for coordinates: {:.4}, {:.4}",
            latitude, longitude
        );

        let url = format!(
            "{}/forecast?latitude={latitude}&longitude={longitude}&current=temperature_2m,precipitation_probability&timezone=auto",
            self.base_url
        );
        debug!("OpenMeteo request URL: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| "Weather request failed")?
            .error_for_status()
            .with_context(|| "Weather request rejected")?;

        let forecast: openmeteo::ForecastResponse = response
            .json()
            .await
            .with_context(|| "Failed to parse OpenMeteo forecast response")?;

        let Some(current) = forecast.current else {
            warn!(
                "No current weather block for {:.4}, {:.4}",
                latitude, longitude
            );
            return Ok(None);
        };

        Ok(Some(CurrentConditions {
            temperature: current.temperature,
            precipitation_probability: current.precipitation_probability,
        }))
    }
}

/// Turns a place name into the weather sentence of the final answer.
pub struct WeatherService {
    geocoder: Arc<dyn Geocoder>,
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherService {
    pub fn new(geocoder: Arc<dyn Geocoder>, provider: Arc<dyn WeatherProvider>) -> Self {
        Self { geocoder, provider }
    }

    /// Produce the weather sentence for a place. Never fails: every error is
    /// absorbed into the returned string.
    pub async fn report(&self, place_name: &str) -> String {
        match self.fetch(place_name).await {
            Ok(sentence) => sentence,
            Err(error) => {
                warn!("Weather fetch failed for '{}': {:#}", place_name, error);
                format!("Error fetching weather data: {error}")
            }
        }
    }

    async fn fetch(&self, place_name: &str) -> Result<String> {
        let coordinates = match self.geocoder.resolve(place_name).await {
            Ok(Some(coordinates)) => coordinates,
            Ok(None) => return Ok(unknown_place_sentence(place_name)),
            Err(error) => {
                // A geocoder the service cannot reach is indistinguishable
                // from a place it does not know.
                warn!("Geocoding failed for '{}': {:#}", place_name, error);
                return Ok(unknown_place_sentence(place_name));
            }
        };

        let Some(current) = self
            .provider
            .current(coordinates.latitude, coordinates.longitude)
            .await?
        else {
            return Ok(format!("Could not fetch weather data for {place_name}"));
        };

        let reading = WeatherReading::from(&current);
        Ok(weather_sentence(place_name, &reading))
    }
}

fn unknown_place_sentence(place_name: &str) -> String {
    format!("I don't know if this place exists: {place_name}")
}

fn weather_sentence(place_name: &str, reading: &WeatherReading) -> String {
    format!(
        "In {place_name} it's currently {}°C with a chance of {}% to rain.",
        reading.temperature_celsius, reading.precipitation_probability_percent
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedGeocoder {
        result: Option<Coordinates>,
    }

    #[async_trait]
    impl Geocoder for FixedGeocoder {
        async fn resolve(&self, _place_name: &str) -> Result<Option<Coordinates>> {
            Ok(self.result.clone())
        }
    }

    struct FixedWeather {
        conditions: Option<CurrentConditions>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl WeatherProvider for FixedWeather {
        async fn current(
            &self,
            _latitude: f64,
            _longitude: f64,
        ) -> Result<Option<CurrentConditions>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.conditions.clone())
        }
    }

    fn service(
        geocoder_result: Option<Coordinates>,
        conditions: Option<CurrentConditions>,
    ) -> (WeatherService, Arc<FixedWeather>) {
        let provider = Arc::new(FixedWeather {
            conditions,
            calls: AtomicUsize::new(0),
        });
        let service = WeatherService::new(
            Arc::new(FixedGeocoder {
                result: geocoder_result,
            }),
            Arc::clone(&provider) as Arc<dyn WeatherProvider>,
        );
        (service, provider)
    }

    #[tokio::test]
    async fn report_truncates_instead_of_rounding() {
        let (service, _) = service(
            Some(Coordinates::new(13.3409, 74.7421, "Udupi, Karnataka, India")),
            Some(CurrentConditions {
                temperature: 28.7,
                precipitation_probability: Some(65.0),
            }),
        );
        assert_eq!(
            service.report("Udupi").await,
            "In Udupi it's currently 28°C with a chance of 65% to rain."
        );
    }

    #[tokio::test]
    async fn report_names_unknown_places_without_calling_provider() {
        let (service, provider) = service(None, None);
        assert_eq!(
            service.report("Nowhereville").await,
            "I don't know if this place exists: Nowhereville"
        );
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn report_handles_missing_current_block() {
        let (service, _) = service(Some(Coordinates::new(0.0, 0.0, "Atlantis")), None);
        assert_eq!(
            service.report("Atlantis").await,
            "Could not fetch weather data for Atlantis"
        );
    }

    #[test]
    fn forecast_response_parsing() {
        let body = r#"{"latitude": 13.25, "longitude": 74.75,
            "current": {"time": "2024-05-01T10:00", "temperature_2m": 28.7,
            "precipitation_probability": 65}}"#;
        let forecast: openmeteo::ForecastResponse = serde_json::from_str(body).unwrap();
        let current = forecast.current.unwrap();
        assert_eq!(current.temperature, 28.7);
        assert_eq!(current.precipitation_probability, Some(65.0));
    }
}
