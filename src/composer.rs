//! Response composition
//!
//! Orchestrates the query interpreter and the two fetchers and merges their
//! sentence fragments into one reply. `process_query` is the single entry
//! point the front ends call; it never fails — every failure path has
//! already been absorbed into a sentence by the time it returns.

use crate::attractions::AttractionService;
use crate::query;
use crate::weather::WeatherService;
use anyhow::Result;
use tracing::{debug, info};

/// Fixed reply when no place name could be extracted. The only branch where
/// the fetchers are not invoked.
const GUIDANCE: &str = "I couldn't identify the place name in your query. \
     Please mention the place you want to visit (e.g., 'I'm going to Bangalore').";

/// Marker phrase the attraction sentence starts its list with; the composer
/// splices the list out of it.
const PLACES_MARKER: &str = "these are the places you can go";

/// Composes the final reply from the weather and attraction fragments.
pub struct ResponseComposer {
    weather: WeatherService,
    attractions: AttractionService,
}

impl ResponseComposer {
    pub fn new(weather: WeatherService, attractions: AttractionService) -> Self {
        Self {
            weather,
            attractions,
        }
    }

    /// Process one user query. Always returns a human-readable string.
    pub async fn process_query(&self, user_input: &str) -> String {
        match self.respond(user_input).await {
            Ok(response) => response,
            Err(error) => format!("Error processing query: {error}"),
        }
    }

    async fn respond(&self, user_input: &str) -> Result<String> {
        let place_name = query::extract_place_name(user_input);
        if place_name.is_empty() {
            info!("No place name found in query");
            return Ok(GUIDANCE.to_string());
        }

        let intent = query::classify_intent(user_input);
        debug!(?intent, %place_name, "interpreted query");

        // Both fetchers always run, weather first; intent does not gate
        // execution. A failure in one never suppresses the other.
        let weather_text = self.weather.report(&place_name).await;
        let places_text = self.attractions.report(&place_name).await;

        Ok(combine(&weather_text, &places_text))
    }
}

/// Merge the two fragments. When the attraction sentence carries its list,
/// splice the list onto the weather sentence; otherwise join the fragments
/// with a space (error sentences, empty-result sentence).
fn combine(weather_text: &str, places_text: &str) -> String {
    let Some(marker_start) = find_ignore_ascii_case(places_text, PLACES_MARKER) else {
        return format!("{weather_text} {places_text}");
    };

    let mut remainder = places_text[marker_start + PLACES_MARKER.len()..].trim();
    if let Some(stripped) = remainder.strip_prefix(',') {
        remainder = stripped.trim();
    }
    let newline = if remainder.starts_with('\n') { "" } else { "\n" };
    format!("{weather_text} And these are the places you can go:{newline}{remainder}")
}

/// Byte offset of the first ASCII-case-insensitive occurrence of `needle`.
fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}
