//! Curated table of well-known attractions per city
//!
//! Radius queries against open geographic data miss some famous places or
//! rank them behind noise, so a small curated table guarantees they appear
//! first. The table is an explicitly ordered slice: key matching is
//! substring containment against the lower-cased place name and the first
//! matching key wins, so overlapping keys resolve deterministically.

/// City key → attraction names, in ranking order.
const CURATED_PLACES: &[(&str, &[&str])] = &[
    (
        "bangalore",
        &[
            "Bannerghatta National Park",
            "Vidhana Soudha",
            "Tipu Sultan Palace",
            "ISKCON Temple Bangalore",
            "Nandi Hills",
            "Lalbagh Botanical Garden",
            "Cubbon Park",
            "Bangalore Palace",
            "Ulsoor Lake",
            "Wonderla Bangalore",
            "Innovative Film City",
            "Bannerghatta Biological Park",
        ],
    ),
    (
        "bengaluru",
        &[
            "Bannerghatta National Park",
            "Vidhana Soudha",
            "Tipu Sultan Palace",
            "ISKCON Temple Bangalore",
            "Nandi Hills",
            "Lalbagh Botanical Garden",
            "Cubbon Park",
            "Bangalore Palace",
        ],
    ),
    (
        "mysore",
        &[
            "Mysore Palace",
            "Chamundi Hills",
            "Brindavan Gardens",
            "St. Philomena's Church",
            "Jaganmohan Palace",
            "Somnathpur Temple",
        ],
    ),
    (
        "udupi",
        &[
            "Udupi Sri Krishna Temple",
            "Malpe Beach",
            "St. Mary's Island",
            "Kaup Beach",
        ],
    ),
];

/// Curated attraction names for a place, first matching city key wins.
/// Empty for cities the table doesn't know.
pub fn places_for(place_name: &str) -> &'static [&'static str] {
    let normalized = place_name.to_lowercase();
    CURATED_PLACES
        .iter()
        .find(|(key, _)| normalized.contains(key))
        .map(|(_, places)| *places)
        .unwrap_or(&[])
}
