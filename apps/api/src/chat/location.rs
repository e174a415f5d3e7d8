//! Location Extractor: guesses a geographic filter from free text.
//!
//! Matchers are strategies behind `LocationMatcher`; `MatcherChain` tries them in
//! order and the first hit wins. The default chain is the phrase patterns
//! followed by the city gazetteer.

use regex::Regex;

pub trait LocationMatcher: Send + Sync {
    fn find_location(&self, message: &str) -> Option<String>;
}

/// Phrase patterns, tried in order. Group 1 is the place.
/// Prepositions start at a word boundary so "What skills" is not read as "at skills".
pub const DEFAULT_PATTERNS: &[&str] = &[
    r"(?i)\b(?:jobs?|positions?|opportunities?|openings?)\s+(?:in|near|at|around)\s+([A-Z][a-zA-Z\s]+?)(?:\s|$|,|\.|\?)",
    r"(?i)\b(?:in|near|at|around)\s+([A-Z][a-zA-Z\s]+?)(?:\s|$|,|\.|\?)",
    r"(?i)\b(?:show|find|search|get|list)\s+(?:me\s+)?(?:jobs?|positions?)\s+(?:in|near|at|around)\s+([A-Z][a-zA-Z\s]+?)(?:\s|$|,|\.|\?)",
];

pub const INDIAN_CITIES: &[&str] = &[
    "mumbai",
    "delhi",
    "bangalore",
    "hyderabad",
    "chennai",
    "pune",
    "kolkata",
    "ahmedabad",
    "jaipur",
    "surat",
];

pub struct PatternMatcher {
    patterns: Vec<Regex>,
}

impl PatternMatcher {
    pub fn new(patterns: &[&str]) -> Result<Self, regex::Error> {
        let patterns = patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }
}

impl LocationMatcher for PatternMatcher {
    fn find_location(&self, message: &str) -> Option<String> {
        self.patterns.iter().find_map(|re| {
            re.captures(message)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim().to_string())
                .filter(|place| !place.is_empty())
        })
    }
}

/// Fixed list of place names matched by lowercase containment.
pub struct GazetteerMatcher {
    places: Vec<String>,
}

impl GazetteerMatcher {
    pub fn new<I, S>(places: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            places: places
                .into_iter()
                .map(|p| p.as_ref().to_lowercase())
                .collect(),
        }
    }
}

impl LocationMatcher for GazetteerMatcher {
    fn find_location(&self, message: &str) -> Option<String> {
        let lower = message.to_lowercase();
        self.places
            .iter()
            .find(|place| lower.contains(place.as_str()))
            .map(|place| capitalize_first(place))
    }
}

#[derive(Default)]
pub struct MatcherChain {
    matchers: Vec<Box<dyn LocationMatcher>>,
}

impl MatcherChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, matcher: impl LocationMatcher + 'static) -> Self {
        self.matchers.push(Box::new(matcher));
        self
    }
}

impl LocationMatcher for MatcherChain {
    fn find_location(&self, message: &str) -> Option<String> {
        self.matchers.iter().find_map(|m| m.find_location(message))
    }
}

pub fn default_location_matcher() -> Result<MatcherChain, regex::Error> {
    Ok(MatcherChain::new()
        .with(PatternMatcher::new(DEFAULT_PATTERNS)?)
        .with(GazetteerMatcher::new(INDIAN_CITIES)))
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> MatcherChain {
        default_location_matcher().unwrap()
    }

    #[test]
    fn test_jobs_in_phrase_matches_first_pattern() {
        assert_eq!(
            matcher().find_location("Show me jobs in Pune please"),
            Some("Pune".to_string())
        );
    }

    #[test]
    fn test_near_phrase_keeps_original_case() {
        // A phrase pattern wins before the gazetteer would capitalize it.
        assert_eq!(
            matcher().find_location("looking for work near mumbai"),
            Some("mumbai".to_string())
        );
    }

    #[test]
    fn test_no_location_cue_returns_none() {
        assert_eq!(matcher().find_location("What skills should I learn?"), None);
    }

    #[test]
    fn test_trailing_punctuation_is_not_captured() {
        assert_eq!(
            matcher().find_location("Any openings around Chennai?"),
            Some("Chennai".to_string())
        );
        assert_eq!(
            matcher().find_location("positions at Noida, full time"),
            Some("Noida".to_string())
        );
    }

    #[test]
    fn test_gazetteer_runs_only_when_patterns_fail() {
        assert_eq!(
            matcher().find_location("Hiring trends for pune developers"),
            Some("Pune".to_string())
        );
    }

    #[test]
    fn test_gazetteer_order_decides_between_cities() {
        let gazetteer = GazetteerMatcher::new(INDIAN_CITIES);
        assert_eq!(
            gazetteer.find_location("pune or delhi, whichever pays more"),
            Some("Delhi".to_string())
        );
    }

    #[test]
    fn test_preposition_inside_word_does_not_match() {
        let patterns = PatternMatcher::new(DEFAULT_PATTERNS).unwrap();
        assert_eq!(patterns.find_location("I keep looking everywhere"), None);
    }

    #[test]
    fn test_chain_is_pluggable() {
        struct Always;
        impl LocationMatcher for Always {
            fn find_location(&self, _message: &str) -> Option<String> {
                Some("Remote".to_string())
            }
        }
        let chain = MatcherChain::new()
            .with(GazetteerMatcher::new(["berlin"]))
            .with(Always);
        assert_eq!(chain.find_location("moving to Berlin"), Some("Berlin".to_string()));
        assert_eq!(chain.find_location("anything"), Some("Remote".to_string()));
        assert_eq!(MatcherChain::new().find_location("jobs in Pune"), None);
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        assert!(PatternMatcher::new(&["(unclosed"]).is_err());
    }
}
