//! Attraction classification over geographic-feature tags
//!
//! A feature qualifies as an attraction when an ordered list of
//! (category, predicate) rules accepts it; the first matching rule wins, so
//! a feature carrying tags of several categories classifies by the earliest
//! one. Two reject lists and a name-keyword filter weed out hotels,
//! restaurants, shops, and other non-tourist entities the tag query still
//! returns.

use crate::models::Feature;

/// Attraction categories, in rule priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Zoo,
    Gallery,
    NatureReserve,
    Beach,
    PeakOrTrail,
    Viewpoint,
    Adventure,
    PlaceOfWorship,
    GovernmentOrPalace,
    NamedStreet,
    Landmark,
}

/// Name keywords that mark commercial or office entities, never attractions.
const EXCLUDE_KEYWORDS: &[&str] = &[
    "store",
    "shop",
    "mall",
    "market",
    "company",
    "corp",
    "ltd",
    "inc",
    "lab",
    "office",
    "building",
    "commercial",
    "warehouse",
    "factory",
    "industrial",
    "business",
    "enterprise",
];

/// Tourism values that disqualify a feature outright.
const EXCLUDED_TOURISM: &[&str] = &["information", "hotel", "hostel", "apartment", "guest_house"];

/// Amenity values that disqualify a feature unless an earlier rule already
/// classified it.
const EXCLUDED_AMENITIES: &[&str] = &[
    "restaurant",
    "cafe",
    "fast_food",
    "pharmacy",
    "bank",
    "atm",
    "hospital",
    "clinic",
    "school",
    "university",
];

const ADVENTURE_SPORTS: &[&str] = &[
    "climbing",
    "paragliding",
    "rafting",
    "canoeing",
    "kayaking",
    "surfing",
    "diving",
    "skydiving",
];

const WORSHIP_HISTORIC: &[&str] = &[
    "temple",
    "church",
    "mosque",
    "shrine",
    "monastery",
    "abbey",
    "cathedral",
    "basilica",
];

const LANDMARK_HISTORIC: &[&str] = &[
    "monument",
    "castle",
    "tower",
    "ruins",
    "tomb",
    "fort",
    "memorial",
    "archaeological_site",
];

fn is_zoo(feature: &Feature) -> bool {
    feature.tag("tourism") == "zoo"
}

fn is_gallery(feature: &Feature) -> bool {
    feature.tag("tourism") == "gallery" || feature.tag("amenity") == "arts_centre"
}

fn is_nature_reserve(feature: &Feature) -> bool {
    feature.tag("leisure") == "nature_reserve" || feature.tag("boundary") == "national_park"
}

fn is_beach(feature: &Feature) -> bool {
    feature.tag("natural") == "beach" || feature.tag("leisure") == "beach_resort"
}

fn is_peak_or_trail(feature: &Feature) -> bool {
    matches!(feature.tag("natural"), "peak" | "volcano")
        || feature.tag("sport") == "hiking"
        || feature.tag("leisure") == "track"
}

fn is_viewpoint(feature: &Feature) -> bool {
    feature.tag("tourism") == "viewpoint"
}

fn is_adventure(feature: &Feature) -> bool {
    feature.tag("tourism") == "theme_park"
        || matches!(feature.tag("leisure"), "adult_gaming_centre" | "water_park")
        || ADVENTURE_SPORTS.contains(&feature.tag("sport"))
}

fn is_place_of_worship(feature: &Feature) -> bool {
    feature.tag("amenity") == "place_of_worship"
        || WORSHIP_HISTORIC.contains(&feature.tag("historic"))
}

fn is_government_or_palace(feature: &Feature) -> bool {
    feature.tag("building") == "government" || feature.tag("historic") == "palace"
}

/// Named streets qualify only when long enough to be a real name and either
/// carrying a historic/tourism tag or being a major road class.
fn is_named_street(feature: &Feature) -> bool {
    let highway = feature.tag("highway");
    if highway.is_empty() {
        return false;
    }
    let Some(name) = feature.name() else {
        return false;
    };
    name.len() > 5
        && (!feature.tag("historic").is_empty()
            || !feature.tag("tourism").is_empty()
            || matches!(highway, "primary" | "secondary" | "tertiary" | "pedestrian"))
}

fn is_landmark(feature: &Feature) -> bool {
    matches!(feature.tag("tourism"), "attraction" | "museum" | "artwork")
        || LANDMARK_HISTORIC.contains(&feature.tag("historic"))
        || matches!(
            feature.tag("leisure"),
            "park" | "stadium" | "golf_course" | "marina"
        )
        || matches!(
            feature.tag("amenity"),
            "theatre" | "cinema" | "library" | "planetarium"
        )
}

/// The ordered rule list. Evaluated top to bottom, first match wins.
const RULES: &[(Category, fn(&Feature) -> bool)] = &[
    (Category::Zoo, is_zoo),
    (Category::Gallery, is_gallery),
    (Category::NatureReserve, is_nature_reserve),
    (Category::Beach, is_beach),
    (Category::PeakOrTrail, is_peak_or_trail),
    (Category::Viewpoint, is_viewpoint),
    (Category::Adventure, is_adventure),
    (Category::PlaceOfWorship, is_place_of_worship),
    (Category::GovernmentOrPalace, is_government_or_palace),
    (Category::NamedStreet, is_named_street),
    (Category::Landmark, is_landmark),
];

/// Classify a feature into its attraction category, if any.
pub fn classify(feature: &Feature) -> Option<Category> {
    RULES
        .iter()
        .find(|(_, predicate)| predicate(feature))
        .map(|(category, _)| *category)
}

/// Classify and apply the reject lists. `None` means the feature does not
/// belong in the attraction list.
pub fn qualify(feature: &Feature) -> Option<Category> {
    let category = classify(feature);

    if EXCLUDED_TOURISM.contains(&feature.tag("tourism")) {
        return None;
    }
    if EXCLUDED_AMENITIES.contains(&feature.tag("amenity")) && category.is_none() {
        return None;
    }

    category
}

/// Whether a feature name carries a commercial/office keyword.
pub fn name_is_excluded(name: &str) -> bool {
    let lower = name.to_lowercase();
    EXCLUDE_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}
