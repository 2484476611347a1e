use crate::types::JobRecord;

/// Expected keywords for a place slug, by priority: country aliases
/// first, then the no-filter escape for overly broad national queries,
/// then known city aliases, then the first slug token as a generic
/// fallback. `None` means "do not filter".
fn expected_keywords(place: &str) -> Option<Vec<String>> {
    let place = place.to_lowercase();
    if place.contains("canada") {
        return Some(owned(&[
            "canada", "toronto", "vancouver", "montreal", "calgary", "ottawa", "edmonton",
            "winnipeg", "quebec", "on", "bc", "qc", "ab", "mb", "sk",
        ]));
    }
    if place.contains("united states") || place.contains("usa") || place.contains("us") {
        return None;
    }
    if place.contains("new-york") || place.contains("ny") {
        return Some(owned(&["new york", "nyc", "new-york", "ny"]));
    }
    if place.contains("boston") {
        return Some(owned(&["boston", "ma"]));
    }
    if place.contains("hyderabad") {
        return Some(owned(&["hyderabad"]));
    }
    if place.contains("mumbai") {
        return Some(owned(&["mumbai"]));
    }
    if place.contains("bangalore") {
        return Some(owned(&["bangalore", "bengaluru"]));
    }
    let city = place.split('-').next().unwrap_or(&place).to_owned();
    Some(vec![city])
}

fn owned(keywords: &[&str]) -> Vec<String> {
    keywords.iter().map(|k| (*k).to_owned()).collect()
}

/// Keep only records whose location-bearing fields mention the place.
/// Never mutates retained records; filtering an already-filtered set is
/// a no-op.
pub fn filter_by_location(records: Vec<JobRecord>, place: &str) -> Vec<JobRecord> {
    let Some(keywords) = expected_keywords(place) else {
        return records;
    };
    records
        .into_iter()
        .filter(|record| matches_any(record, &keywords))
        .collect()
}

fn matches_any(record: &JobRecord, keywords: &[String]) -> bool {
    let fields = [
        record.location.to_lowercase(),
        record.city.to_lowercase(),
        record.state.to_lowercase(),
        record.region.to_lowercase(),
    ];
    keywords
        .iter()
        .any(|keyword| fields.iter().any(|field| field.contains(keyword.as_str())))
}
