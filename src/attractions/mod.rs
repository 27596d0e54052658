//! Attraction lookup pipeline
//!
//! Merges the curated city table with a radius feature query, classifies
//! and filters the raw features, deduplicates case-insensitively, and caps
//! the ranked list. Curated entries always rank before feature-query
//! entries; feature-query entries keep provider-return order.

pub mod classify;
pub mod curated;
pub mod overpass;

pub use overpass::{FeatureProvider, OverpassClient};

use crate::config::SearchConfig;
use crate::geocode::Geocoder;
use anyhow::Result;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// An ordered set of unique attraction names, capped at a fixed size.
///
/// Uniqueness is case-insensitive on the lower-cased name; insertion order
/// is ranking order.
#[derive(Debug)]
pub struct AttractionSet {
    names: Vec<String>,
    seen: HashSet<String>,
    cap: usize,
}

impl AttractionSet {
    pub fn new(cap: usize) -> Self {
        Self {
            names: Vec::new(),
            seen: HashSet::new(),
            cap,
        }
    }

    /// Insert a name unless it is empty, already present, or the set is
    /// full. Returns whether the name was added.
    pub fn push(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.is_full() {
            return false;
        }
        if !self.seen.insert(name.to_lowercase()) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(&name.trim().to_lowercase())
    }

    pub fn is_full(&self) -> bool {
        self.names.len() >= self.cap
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// Turns a place name into the attractions sentence of the final answer.
pub struct AttractionService {
    geocoder: Arc<dyn Geocoder>,
    provider: Arc<dyn FeatureProvider>,
    radius_m: u32,
    max_attractions: usize,
}

impl AttractionService {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        provider: Arc<dyn FeatureProvider>,
        search: &SearchConfig,
    ) -> Self {
        Self {
            geocoder,
            provider,
            radius_m: search.radius_km * 1000,
            max_attractions: search.max_attractions as usize,
        }
    }

    /// Produce the attractions sentence for a place. Never fails: every
    /// error is absorbed into the returned string.
    pub async fn report(&self, place_name: &str) -> String {
        match self.fetch(place_name).await {
            Ok(sentence) => sentence,
            Err(error) => {
                warn!("Attraction fetch failed for '{}': {:#}", place_name, error);
                format!("Error fetching places data: {error}")
            }
        }
    }

    async fn fetch(&self, place_name: &str) -> Result<String> {
        let coordinates = match self.geocoder.resolve(place_name).await {
            Ok(Some(coordinates)) => coordinates,
            Ok(None) => return Ok(unknown_place_sentence(place_name)),
            Err(error) => {
                warn!("Geocoding failed for '{}': {:#}", place_name, error);
                return Ok(unknown_place_sentence(place_name));
            }
        };

        let mut attractions = AttractionSet::new(self.max_attractions);

        // Curated entries rank first, ahead of anything the query returns.
        for name in curated::places_for(place_name) {
            attractions.push(name);
        }
        if !attractions.is_empty() {
            debug!(
                "Seeded {} curated attractions for '{}'",
                attractions.len(),
                place_name
            );
        }

        let features = self
            .provider
            .features_around(coordinates.latitude, coordinates.longitude, self.radius_m)
            .await?;

        for feature in &features {
            if attractions.is_full() {
                break;
            }
            let Some(name) = feature.name() else {
                continue;
            };
            if attractions.contains(name) || classify::name_is_excluded(name) {
                continue;
            }
            if classify::qualify(feature).is_none() {
                continue;
            }
            attractions.push(name);
        }

        info!(
            "Collected {} attractions for '{}'",
            attractions.len(),
            place_name
        );

        if attractions.is_empty() {
            return Ok(format!(
                "Could not find specific tourist attractions for {place_name}. \
                 The place might exist, but no tourist attractions were found in the area."
            ));
        }

        Ok(format!(
            "In {place_name} these are the places you can go,\n\n{}",
            attractions.names().join("\n")
        ))
    }
}

fn unknown_place_sentence(place_name: &str) -> String {
    format!("I don't know if this place exists: {place_name}")
}
