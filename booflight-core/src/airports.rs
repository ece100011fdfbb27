use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

static AIRPORTS_JSON: &str = include_str!("airports.json");
static GLOBAL_INDEX: OnceLock<AirportIndex> = OnceLock::new();

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Airport {
    pub iata: String,
    pub name: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// In-memory airport lookup over the embedded static dataset.
/// Loaded once per process and never mutated afterwards.
pub struct AirportIndex {
    airports: Vec<Airport>,
}

impl AirportIndex {
    pub fn from_records(airports: Vec<Airport>) -> Self {
        Self { airports }
    }

    pub fn global() -> &'static AirportIndex {
        GLOBAL_INDEX.get_or_init(|| {
            let airports: Vec<Airport> = serde_json::from_str(AIRPORTS_JSON)
                .expect("embedded airport dataset is valid JSON");
            tracing::debug!("Loaded {} airports from embedded dataset", airports.len());
            AirportIndex::from_records(airports)
        })
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    pub fn records(&self) -> &[Airport] {
        &self.airports
    }

    /// Best-guess IATA code for a free-text field.
    ///
    /// A standalone run of exactly three uppercase ASCII letters is trusted
    /// as a user-typed code. Otherwise the trimmed, lowercased input is
    /// matched as a substring against city, name and country; ties are broken
    /// by exact field match first, then shortest airport name, then dataset
    /// order. `None` means "could not resolve" and is a normal outcome.
    pub fn resolve(&self, input: &str) -> Option<String> {
        if let Some(code) = standalone_code(input) {
            return Some(code.to_string());
        }

        let q = input.trim().to_lowercase();
        if q.is_empty() {
            return None;
        }

        self.airports
            .iter()
            .enumerate()
            .filter_map(|(idx, a)| match_rank(a, &q).map(|rank| (rank, a.name.len(), idx, a)))
            .min_by_key(|(rank, name_len, idx, _)| (*rank, *name_len, *idx))
            .map(|(_, _, _, a)| a.iata.clone())
    }

    /// Typeahead suggestions: case-insensitive substring over city, code,
    /// name and country. Queries under two characters yield nothing.
    pub fn suggest(&self, query: &str, limit: usize) -> Vec<&Airport> {
        if query.trim().len() < 2 {
            return Vec::new();
        }
        let q = query.trim().to_lowercase();
        self.airports
            .iter()
            .filter(|a| {
                a.city.to_lowercase().contains(&q)
                    || a.iata.to_lowercase().contains(&q)
                    || a.name.to_lowercase().contains(&q)
                    || a
                        .country
                        .as_deref()
                        .is_some_and(|c| c.to_lowercase().contains(&q))
            })
            .take(limit)
            .collect()
    }
}

/// First maximal alphabetic run of exactly three uppercase letters, if any.
/// `DEL` qualifies; the `DEL` inside `DELHI` does not.
fn standalone_code(input: &str) -> Option<&str> {
    let bytes = input.as_bytes();
    let mut start = 0;
    while start < bytes.len() {
        if !bytes[start].is_ascii_alphabetic() {
            start += 1;
            continue;
        }
        let mut end = start;
        while end < bytes.len() && bytes[end].is_ascii_alphabetic() {
            end += 1;
        }
        let run = &input[start..end];
        if run.len() == 3 && run.bytes().all(|b| b.is_ascii_uppercase()) {
            return Some(run);
        }
        start = end;
    }
    None
}

/// 0 = exact field match, 1 = substring match, None = no match.
fn match_rank(airport: &Airport, q: &str) -> Option<u8> {
    let city = airport.city.to_lowercase();
    let name = airport.name.to_lowercase();
    let country = airport.country.as_deref().map(str::to_lowercase);

    if city == q || name == q || country.as_deref() == Some(q) {
        return Some(0);
    }
    if city.contains(q)
        || name.contains(q)
        || country.as_deref().is_some_and(|c| c.contains(q))
    {
        return Some(1);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> &'static AirportIndex {
        AirportIndex::global()
    }

    #[test]
    fn trusts_standalone_three_letter_codes() {
        assert_eq!(index().resolve("DEL"), Some("DEL".to_string()));
        assert_eq!(index().resolve("New Delhi (DEL)"), Some("DEL".to_string()));
        // Not in the dataset, still trusted as user-typed.
        assert_eq!(index().resolve("XYZ"), Some("XYZ".to_string()));
    }

    #[test]
    fn embedded_code_inside_longer_word_is_not_a_token() {
        // "DELHI" is a five-letter run, so the substring path runs instead.
        assert_eq!(index().resolve("DELHI"), Some("DEL".to_string()));
    }

    #[test]
    fn resolves_city_and_country_substrings() {
        assert_eq!(index().resolve("mumbai"), Some("BOM".to_string()));
        assert_eq!(index().resolve("bengaluru"), Some("BLR".to_string()));
        assert_eq!(index().resolve("  Kochi  "), Some("COK".to_string()));
        assert_eq!(index().resolve("qatar"), Some("DOH".to_string()));
    }

    #[test]
    fn unresolvable_input_is_none_not_a_panic() {
        assert_eq!(index().resolve("atlantis"), None);
        assert_eq!(index().resolve(""), None);
        assert_eq!(index().resolve("   "), None);
    }

    #[test]
    fn exact_city_match_beats_earlier_substring_match() {
        // "nice" is a substring of Venice (VCE, earlier in the dataset) but an
        // exact city match for NCE.
        assert_eq!(index().resolve("nice"), Some("NCE".to_string()));
    }

    #[test]
    fn equal_rank_ties_break_on_shortest_name() {
        // CDG and ORY are both exact city matches for "paris"; Orly has the
        // shorter airport name despite appearing later in the dataset.
        assert_eq!(index().resolve("paris"), Some("ORY".to_string()));
    }

    #[test]
    fn code_round_trips_through_resolution() {
        for airport in index().records() {
            assert_eq!(
                index().resolve(&airport.iata),
                Some(airport.iata.clone()),
                "code {} did not round-trip",
                airport.iata
            );
        }
    }

    #[test]
    fn suggestions_require_two_chars_and_honor_limit() {
        assert!(index().suggest("d", 8).is_empty());
        let hits = index().suggest("in", 8);
        assert!(!hits.is_empty());
        assert!(hits.len() <= 8);
    }

    #[test]
    fn selecting_a_suggestion_by_city_resolves_to_its_own_code() {
        let hits = index().suggest("hyderabad", 8);
        let airport = hits.first().expect("hyderabad should be suggested");
        assert_eq!(index().resolve(&airport.city), Some(airport.iata.clone()));
    }
}
