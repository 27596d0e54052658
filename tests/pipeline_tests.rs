//! End-to-end tests for the query pipeline
//!
//! Drive `process_query` against mock providers so the whole path — place
//! extraction, geocoding, both fetchers, composition — runs without any
//! network access. The mocks count their calls so tests can assert which
//! providers were reached.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Result, anyhow};
use async_trait::async_trait;

use tourguide::attractions::AttractionService;
use tourguide::composer::ResponseComposer;
use tourguide::config::SearchConfig;
use tourguide::geocode::Geocoder;
use tourguide::models::{Coordinates, CurrentConditions, Feature};
use tourguide::weather::{WeatherProvider, WeatherService};
use tourguide::FeatureProvider;

struct MockGeocoder {
    known: HashMap<String, Coordinates>,
    calls: AtomicUsize,
}

impl MockGeocoder {
    fn with(places: &[(&str, f64, f64, &str)]) -> Self {
        Self {
            known: places
                .iter()
                .map(|(name, lat, lon, display)| {
                    (name.to_string(), Coordinates::new(*lat, *lon, *display))
                })
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }

    fn empty() -> Self {
        Self::with(&[])
    }
}

#[async_trait]
impl Geocoder for MockGeocoder {
    async fn resolve(&self, place_name: &str) -> Result<Option<Coordinates>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.known.get(place_name).cloned())
    }
}

struct MockWeather {
    conditions: Result<Option<CurrentConditions>, String>,
    calls: AtomicUsize,
}

impl MockWeather {
    fn reporting(temperature: f64, precipitation_probability: f64) -> Self {
        Self {
            conditions: Ok(Some(CurrentConditions {
                temperature,
                precipitation_probability: Some(precipitation_probability),
            })),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            conditions: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl WeatherProvider for MockWeather {
    async fn current(&self, _latitude: f64, _longitude: f64) -> Result<Option<CurrentConditions>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.conditions {
            Ok(conditions) => Ok(conditions.clone()),
            Err(message) => Err(anyhow!("{message}")),
        }
    }
}

struct MockFeatures {
    features: Vec<Feature>,
    calls: AtomicUsize,
}

impl MockFeatures {
    fn with(tag_sets: &[&[(&str, &str)]]) -> Self {
        Self {
            features: tag_sets
                .iter()
                .map(|tags| Feature::from_tags(tags.iter().copied()))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl FeatureProvider for MockFeatures {
    async fn features_around(
        &self,
        _latitude: f64,
        _longitude: f64,
        _radius_m: u32,
    ) -> Result<Vec<Feature>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.features.clone())
    }
}

struct Harness {
    composer: ResponseComposer,
    geocoder: Arc<MockGeocoder>,
    weather: Arc<MockWeather>,
    features: Arc<MockFeatures>,
}

fn harness(geocoder: MockGeocoder, weather: MockWeather, features: MockFeatures) -> Harness {
    let geocoder = Arc::new(geocoder);
    let weather = Arc::new(weather);
    let features = Arc::new(features);

    let weather_service = WeatherService::new(
        Arc::clone(&geocoder) as Arc<dyn Geocoder>,
        Arc::clone(&weather) as Arc<dyn WeatherProvider>,
    );
    let attraction_service = AttractionService::new(
        Arc::clone(&geocoder) as Arc<dyn Geocoder>,
        Arc::clone(&features) as Arc<dyn FeatureProvider>,
        &SearchConfig::default(),
    );

    Harness {
        composer: ResponseComposer::new(weather_service, attraction_service),
        geocoder,
        weather,
        features,
    }
}

fn udupi_harness() -> Harness {
    harness(
        MockGeocoder::with(&[("Udupi", 13.3409, 74.7421, "Udupi, Karnataka, India")]),
        MockWeather::reporting(28.7, 65.0),
        MockFeatures::with(&[
            &[("name", "Malpe Beach"), ("natural", "beach")],
            &[("name", "End Point Viewpoint"), ("tourism", "viewpoint")],
            &[("name", "City Mall"), ("tourism", "attraction")],
            &[("name", "ABC Corp Office"), ("building", "government")],
            &[("name", "Seaside Cafe"), ("amenity", "cafe")],
        ]),
    )
}

#[tokio::test]
async fn unrecognized_input_returns_guidance_without_provider_calls() {
    let harness = harness(MockGeocoder::empty(), MockWeather::reporting(20.0, 0.0), MockFeatures::with(&[]));

    let response = harness.composer.process_query("hello there").await;

    assert!(response.starts_with("I couldn't identify the place name"));
    assert_eq!(harness.geocoder.calls.load(Ordering::SeqCst), 0);
    assert_eq!(harness.weather.calls.load(Ordering::SeqCst), 0);
    assert_eq!(harness.features.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn udupi_query_composes_weather_and_ranked_places() {
    let harness = udupi_harness();

    let response = harness
        .composer
        .process_query("I'm going to Udupi, what are the places I can visit?")
        .await;

    // Exact weather fragment: truncation, not rounding.
    assert!(
        response.starts_with("In Udupi it's currently 28°C with a chance of 65% to rain."),
        "unexpected response: {response}"
    );
    assert!(response.contains("And these are the places you can go:"));

    // Curated entries precede every feature-query entry.
    let temple = response.find("Udupi Sri Krishna Temple").unwrap();
    let beach_from_query = response.find("End Point Viewpoint").unwrap();
    assert!(temple < beach_from_query);

    // "Malpe Beach" is both curated and feature-sourced; it appears once.
    assert_eq!(response.matches("Malpe Beach").count(), 1);

    // Commercial names never appear, whatever their tags say.
    assert!(!response.contains("City Mall"));
    assert!(!response.contains("ABC Corp Office"));
    assert!(!response.contains("Seaside Cafe"));
}

#[tokio::test]
async fn repeated_queries_are_deterministic() {
    let harness = udupi_harness();

    let first = harness
        .composer
        .process_query("I'm going to Udupi, what are the places I can visit?")
        .await;
    let second = harness
        .composer
        .process_query("I'm going to Udupi, what are the places I can visit?")
        .await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn unresolvable_place_yields_both_sentences_space_joined() {
    let harness = harness(
        MockGeocoder::empty(),
        MockWeather::reporting(20.0, 0.0),
        MockFeatures::with(&[]),
    );

    let response = harness.composer.process_query("visit Nowhereville").await;

    assert_eq!(
        response,
        "I don't know if this place exists: Nowhereville \
         I don't know if this place exists: Nowhereville"
    );
    // Place couldn't be resolved, so neither provider was called.
    assert_eq!(harness.weather.calls.load(Ordering::SeqCst), 0);
    assert_eq!(harness.features.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn weather_failure_does_not_suppress_places() {
    let harness = harness(
        MockGeocoder::with(&[("Udupi", 13.3409, 74.7421, "Udupi, Karnataka, India")]),
        MockWeather::failing("connection reset by peer"),
        MockFeatures::with(&[&[("name", "End Point Viewpoint"), ("tourism", "viewpoint")]]),
    );

    let response = harness.composer.process_query("visit Udupi").await;

    assert!(response.starts_with("Error fetching weather data:"));
    assert!(response.contains("connection reset by peer"));
    assert!(response.contains("And these are the places you can go:"));
    assert!(response.contains("Udupi Sri Krishna Temple"));
}

#[tokio::test]
async fn no_attractions_found_gets_its_own_sentence() {
    let harness = harness(
        MockGeocoder::with(&[("Springfield", 39.8, -89.6, "Springfield, Illinois")]),
        MockWeather::reporting(20.2, 0.0),
        MockFeatures::with(&[]),
    );

    let response = harness.composer.process_query("visit Springfield").await;

    assert!(response.starts_with("In Springfield it's currently 20°C with a chance of 0% to rain."));
    assert!(response.contains("Could not find specific tourist attractions for Springfield."));
    assert!(!response.contains("And these are the places you can go:"));
}

#[tokio::test]
async fn attraction_list_is_capped_at_twenty() {
    let named: Vec<(String, String)> = (0..40)
        .map(|i| (format!("Viewpoint Number {i}"), "viewpoint".to_string()))
        .collect();
    let tag_sets: Vec<Vec<(&str, &str)>> = named
        .iter()
        .map(|(name, tourism)| vec![("name", name.as_str()), ("tourism", tourism.as_str())])
        .collect();
    let tag_refs: Vec<&[(&str, &str)]> = tag_sets.iter().map(Vec::as_slice).collect();

    let harness = harness(
        MockGeocoder::with(&[("Springfield", 39.8, -89.6, "Springfield, Illinois")]),
        MockWeather::reporting(20.0, 0.0),
        MockFeatures::with(&tag_refs),
    );

    let response = harness.composer.process_query("visit Springfield").await;

    let list = response
        .split("And these are the places you can go:")
        .nth(1)
        .expect("response should contain a places list");
    assert_eq!(list.trim().lines().count(), 20);
}
