use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Placeholder for any field the extractor could not resolve.
pub const SENTINEL: &str = "N/A";

/// One scraped job listing. Field names double as the output columns.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct JobRecord {
    pub name: String,
    pub company: String,
    pub state: String,
    pub city: String,
    pub salary: String,
    pub location: String,
    pub currency: String,
    pub region: String,
    #[serde(rename = "Years of Experience")]
    pub years_of_experience: String,
    pub year: String,
    pub url: String,
}

impl PartialEq for JobRecord {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

impl Eq for JobRecord {}

impl Hash for JobRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.url.hash(state);
    }
}

/// A single search: role keyword plus place slug, e.g.
/// ("data-scientist", "new-york-ny"). Lives only for one run.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub keyword: String,
    pub place: String,
}

impl SearchQuery {
    pub fn new(keyword: impl Into<String>, place: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            place: place.into(),
        }
    }

    /// Human-readable location for the search form:
    /// "new-york-ny" becomes "New York NY".
    pub fn display_location(&self) -> String {
        let mut text = title_case(&self.place.replace('-', " "));
        if self.place.to_lowercase().contains("ny") {
            text = text.replace("Ny", "NY");
        }
        text
    }
}

pub(crate) fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_display_location() {
        let query = SearchQuery::new("data-scientist", "new-york-ny");
        assert_eq!(query.display_location(), "New York NY");

        let query = SearchQuery::new("data-scientist", "boston");
        assert_eq!(query.display_location(), "Boston");
    }

    #[test]
    fn test_records_compare_by_url() {
        let mut a = JobRecord {
            name: "Data Scientist".to_owned(),
            company: "Acme".to_owned(),
            state: SENTINEL.to_owned(),
            city: SENTINEL.to_owned(),
            salary: SENTINEL.to_owned(),
            location: SENTINEL.to_owned(),
            currency: "USD".to_owned(),
            region: SENTINEL.to_owned(),
            years_of_experience: SENTINEL.to_owned(),
            year: SENTINEL.to_owned(),
            url: "https://example.com/job-listing/a".to_owned(),
        };
        let b = a.clone();
        assert_eq!(a, b);
        a.name = "Analyst".to_owned();
        assert_eq!(a, b);
        a.url = "https://example.com/job-listing/b".to_owned();
        assert_ne!(a, b);
    }
}
