//! Query interpretation: place-name extraction and intent classification
//!
//! Extraction tries an ordered list of phrase patterns; the first pattern
//! that matches wins. A token-based fallback handles inputs none of the
//! patterns recognize. Intent classification is a keyword membership test
//! and is informational only: both fetchers run regardless of intent.

use crate::models::Intent;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Phrase patterns tried in priority order, most specific lead-in first.
static PLACE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)going to go to ([A-Za-z][A-Za-z\s]+?)(?:,|\.|$|\?|what|where|let|plan|trip)",
        r"(?i)going to ([A-Za-z][A-Za-z\s]+?)(?:,|\.|$|\?|what|where|let|plan|trip)",
        r"(?i)visit ([A-Za-z][A-Za-z\s]+?)(?:,|\.|$|\?|what|where|let|plan|trip)",
        r"(?i)in ([A-Za-z][A-Za-z\s]+?)(?:,|\.|$|\?|what|where|let|plan|trip)",
        r"(?i)to ([A-Za-z][A-Za-z\s]+?)(?:,|\.|$|\?|what|where|let|plan|trip)",
        r"(?i)from ([A-Za-z][A-Za-z\s]+?)(?:,|\.|$|\?|what|where|let|plan|trip)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("invalid place pattern"))
    .collect()
});

/// Trailing sentence clause that leaked into a capture, e.g. "Mysore what is".
static TRAILING_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+(?:what|where|when|how|let|plan|trip|from|to|going|visit).*$")
        .expect("invalid trailing clause pattern")
});

/// Leading article before the place name.
static LEADING_ARTICLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(?:the|a|an)\s+").expect("invalid article pattern"));

/// Tokens the fallback never treats as part of a place name.
const STOP_WORDS: &[&str] = &[
    "i", "i'm", "im", "let's", "lets", "let", "going", "to", "go", "visit", "from", "in", "the",
    "a", "an", "what", "where", "when", "how", "plan", "trip", "is", "are", "there", "and", "or",
    "but", "hello", "hi", "hey", "please", "thanks",
];

const WEATHER_KEYWORDS: &[&str] = &[
    "temperature",
    "temp",
    "weather",
    "rain",
    "precipitation",
    "forecast",
    "climate",
    "hot",
    "cold",
    "sunny",
    "cloudy",
];

const PLACES_KEYWORDS: &[&str] = &[
    "places",
    "attractions",
    "visit",
    "see",
    "tourist",
    "sightseeing",
    "plan",
    "trip",
    "go",
    "explore",
];

/// Extract a place name from free text.
///
/// Returns an empty string when no candidate qualifies; this is the hard
/// failure signal the response composer checks before fetching anything.
pub fn extract_place_name(text: &str) -> String {
    for pattern in PLACE_PATTERNS.iter() {
        let Some(captures) = pattern.captures(text) else {
            continue;
        };
        let raw = captures[1].trim().to_string();
        let place = TRAILING_CLAUSE.replace(&raw, "");
        let place = LEADING_ARTICLE.replace(place.trim(), "");
        let place = capitalize_words(place.trim());
        if place.len() > 2 {
            debug!(%place, "extracted place name from phrase pattern");
            return place;
        }
    }

    let place = fallback_place_name(text);
    if !place.is_empty() {
        debug!(%place, "extracted place name from token fallback");
    }
    place
}

/// Fallback extraction: the first run of one or two significant tokens.
fn fallback_place_name(text: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();

    for (i, word) in words.iter().enumerate() {
        let cleaned = strip_punctuation(word);
        let lower = cleaned.to_lowercase();
        if cleaned.is_empty() || STOP_WORDS.contains(&lower.as_str()) {
            continue;
        }

        let capitalized = cleaned.chars().next().is_some_and(char::is_uppercase);
        if !capitalized && lower.len() <= 3 {
            continue;
        }

        let mut picked = vec![cleaned];
        if let Some(next) = words.get(i + 1) {
            let next_cleaned = strip_punctuation(next);
            let next_lower = next_cleaned.to_lowercase();
            let next_capitalized = next_cleaned.chars().next().is_some_and(char::is_uppercase);
            if !next_cleaned.is_empty()
                && !STOP_WORDS.contains(&next_lower.as_str())
                && (next_lower.len() > 2 || next_capitalized)
            {
                picked.push(next_cleaned);
            }
        }
        return capitalize_words(&picked.join(" "));
    }

    String::new()
}

/// Classify what the user asked for.
pub fn classify_intent(text: &str) -> Intent {
    let lower = text.to_lowercase();

    let wants_weather = WEATHER_KEYWORDS.iter().any(|keyword| lower.contains(keyword));
    let mut wants_places = PLACES_KEYWORDS.iter().any(|keyword| lower.contains(keyword));

    // Trip-planning phrasings imply places even without an explicit keyword
    if !wants_weather
        && !wants_places
        && ["plan", "trip", "visit", "go to"]
            .iter()
            .any(|phrase| lower.contains(phrase))
    {
        wants_places = true;
    }

    if (lower.contains("and") || lower.contains("both")) && (wants_weather || wants_places) {
        return Intent {
            wants_weather: true,
            wants_places: true,
        };
    }

    Intent {
        wants_weather,
        wants_places,
    }
}

fn strip_punctuation(word: &str) -> &str {
    word.trim_matches(|c: char| ".,!?;:".contains(c))
}

/// Capitalize each word: first letter upper, remainder lower.
fn capitalize_words(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
