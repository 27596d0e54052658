//! Overpass API client for geographic-feature queries
//!
//! Issues one radius query per lookup, selecting the eleven tag groups the
//! attraction pipeline classifies. The query asks for center-point geometry
//! so ways and relations come back as a single coordinate each.

use crate::config::TourGuideConfig;
use crate::models::Feature;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};

/// Provides tagged features within a radius of a point.
#[async_trait]
pub trait FeatureProvider: Send + Sync {
    async fn features_around(
        &self,
        latitude: f64,
        longitude: f64,
        radius_m: u32,
    ) -> Result<Vec<Feature>>;
}

/// Overpass interpreter client
pub struct OverpassClient {
    client: Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    tags: HashMap<String, String>,
}

/// Tag selectors of the eleven category groups, in query order: zoos, art
/// galleries, national parks and nature reserves, beaches, peaks and hiking
/// trails, viewpoints, adventure venues, places of worship, government
/// buildings and palaces, named streets, and the landmark catch-all.
const SELECTORS: &[&str] = &[
    // zoos & biological parks
    r#"node["tourism"="zoo"]"#,
    r#"way["tourism"="zoo"]"#,
    r#"relation["tourism"="zoo"]"#,
    // art galleries
    r#"node["tourism"="gallery"]"#,
    r#"node["amenity"="arts_centre"]"#,
    r#"way["tourism"="gallery"]"#,
    r#"way["amenity"="arts_centre"]"#,
    // national parks & nature reserves
    r#"node["leisure"="nature_reserve"]"#,
    r#"node["boundary"="national_park"]"#,
    r#"way["leisure"="nature_reserve"]"#,
    r#"way["boundary"="national_park"]"#,
    r#"relation["boundary"="national_park"]"#,
    r#"relation["leisure"="nature_reserve"]"#,
    // beaches
    r#"node["natural"="beach"]"#,
    r#"node["leisure"="beach_resort"]"#,
    r#"way["natural"="beach"]"#,
    r#"way["leisure"="beach_resort"]"#,
    // hiking trails & peaks
    r#"node["natural"="peak"]"#,
    r#"node["natural"="volcano"]"#,
    r#"node["natural"="hill"]"#,
    r#"way["route"="hiking"]"#,
    r#"way["leisure"="track"]["sport"="hiking"]"#,
    // viewpoints
    r#"node["tourism"="viewpoint"]"#,
    r#"way["tourism"="viewpoint"]"#,
    // adventure venues
    r#"node["tourism"="theme_park"]"#,
    r#"node["leisure"="adult_gaming_centre"]"#,
    r#"node["leisure"="water_park"]"#,
    r#"node["sport"~"^(climbing|paragliding|rafting|canoeing|kayaking|surfing|diving|skydiving)$"]"#,
    r#"way["tourism"="theme_park"]"#,
    r#"way["leisure"="water_park"]"#,
    r#"way["sport"~"^(climbing|paragliding|rafting|canoeing|kayaking|surfing|diving|skydiving)$"]"#,
    // places of worship & historic religious structures
    r#"node["amenity"="place_of_worship"]"#,
    r#"node["historic"~"^(temple|church|mosque|shrine|monastery|abbey|cathedral|basilica)$"]"#,
    r#"way["amenity"="place_of_worship"]"#,
    r#"way["historic"~"^(temple|church|mosque|shrine|monastery|abbey|cathedral|basilica)$"]"#,
    r#"relation["amenity"="place_of_worship"]"#,
    // government buildings & palaces
    r#"node["building"="government"]"#,
    r#"node["historic"="palace"]"#,
    r#"way["building"="government"]"#,
    r#"way["historic"="palace"]"#,
    r#"relation["historic"="palace"]"#,
    // named streets
    r#"way["highway"~"^(primary|secondary|tertiary|residential|pedestrian|living_street)$"]["name"~"."]"#,
    // landmark catch-all
    r#"node["tourism"~"^(attraction|museum|artwork)$"]"#,
    r#"node["historic"~"^(monument|castle|tower|ruins|tomb|fort|memorial|archaeological_site)$"]"#,
    r#"node["leisure"~"^(park|stadium|golf_course|marina)$"]"#,
    r#"node["amenity"~"^(theatre|cinema|library|planetarium)$"]"#,
    r#"way["tourism"~"^(attraction|museum|artwork)$"]"#,
    r#"way["historic"~"^(monument|castle|tower|ruins|tomb|fort|memorial|archaeological_site)$"]"#,
    r#"way["leisure"~"^(park|stadium|golf_course|marina)$"]"#,
    r#"way["amenity"~"^(theatre|cinema|library|planetarium)$"]"#,
];

/// Build the Overpass QL query for one radius lookup.
fn build_query(latitude: f64, longitude: f64, radius_m: u32) -> String {
    let mut query = String::from("[out:json][timeout:60];\n(\n");
    for selector in SELECTORS {
        query.push_str(&format!(
            "  {selector}(around:{radius_m},{latitude},{longitude});\n"
        ));
    }
    query.push_str(");\nout center;\n");
    query
}

impl OverpassClient {
    /// Create a new feature-query client
    pub fn new(config: &TourGuideConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.providers.features_timeout_seconds.into());

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(config.providers.user_agent.clone())
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            url: config.providers.features_url.clone(),
        })
    }
}

#[async_trait]
impl FeatureProvider for OverpassClient {
    async fn features_around(
        &self,
        latitude: f64,
        longitude: f64,
        radius_m: u32,
    ) -> Result<Vec<Feature>> {
        info!(
            "Querying features within {}m of {:.4}, {:.4}",
            radius_m, latitude, longitude
        );

        let query = build_query(latitude, longitude, radius_m);
        debug!("Overpass query:\n{}", query);

        let response = self
            .client
            .post(&self.url)
            .form(&[("data", query)])
            .send()
            .await
            .with_context(|| "Feature query request failed")?
            .error_for_status()
            .with_context(|| "Feature query request rejected")?;

        let parsed: OverpassResponse = response
            .json()
            .await
            .with_context(|| "Failed to parse Overpass response")?;

        let features: Vec<Feature> = parsed
            .elements
            .into_iter()
            .filter(|element| matches!(element.kind.as_str(), "node" | "way" | "relation"))
            .map(|element| Feature { tags: element.tags })
            .collect();

        info!("Feature query returned {} tagged elements", features.len());
        Ok(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_covers_radius_and_category_groups() {
        let query = build_query(12.9716, 77.5946, 100_000);
        assert!(query.starts_with("[out:json]"));
        assert!(query.ends_with("out center;\n"));
        assert!(query.contains("(around:100000,12.9716,77.5946)"));
        assert!(query.contains(r#"node["tourism"="zoo"]"#));
        assert!(query.contains(r#"way["highway"~"^(primary|secondary|tertiary|residential|pedestrian|living_street)$"]["name"~"."]"#));
        assert!(query.contains(r#"node["amenity"="place_of_worship"]"#));
    }

    #[test]
    fn response_parsing_keeps_tag_maps() {
        let body = r#"{"version": 0.6, "elements": [
            {"type": "node", "id": 1, "lat": 12.9, "lon": 77.5,
             "tags": {"name": "Cubbon Park", "leisure": "park"}},
            {"type": "way", "id": 2, "center": {"lat": 12.8, "lon": 77.6},
             "tags": {"name": "MG Road", "highway": "primary"}},
            {"type": "node", "id": 3, "lat": 12.7, "lon": 77.4}
        ]}"#;
        let parsed: OverpassResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.elements.len(), 3);
        assert_eq!(
            parsed.elements[0].tags.get("name").map(String::as_str),
            Some("Cubbon Park")
        );
        assert!(parsed.elements[2].tags.is_empty());
    }

    #[test]
    fn client_creation_uses_configured_endpoint() {
        let config = TourGuideConfig::default();
        let client = OverpassClient::new(&config).unwrap();
        assert_eq!(client.url, "https://overpass-api.de/api/interpreter");
    }
}
