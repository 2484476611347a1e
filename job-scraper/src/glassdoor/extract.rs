use crate::types::{title_case, JobRecord, SENTINEL};
use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};

fn chain(selectors: &[&str]) -> Vec<Selector> {
    selectors
        .iter()
        .map(|css| Selector::parse(css).unwrap())
        .collect()
}

lazy_static! {
    /// Per-field selector cascades, most specific first. The site's
    /// generated class names drift, so every chain bottoms out in a
    /// generic selector.
    static ref NAME_CHAIN: Vec<Selector> = chain(&[
        "div.JobDetails_jobDetailsHeader__qKuvs > h1",
        r#"h1[class*="jobTitle"]"#,
        "h1",
    ]);
    static ref COMPANY_CHAIN: Vec<Selector> = chain(&[
        "div.JobDetails_jobDetailsHeader__qKuvs > a > div > span",
        r#"span[class*="employerName"]"#,
        r#"a[class*="employerName"]"#,
        r#"a[class*="employerName"] *"#,
    ]);
    static ref LOCATION_CHAIN: Vec<Selector> = chain(&[
        "div.JobDetails_jobDetailsHeader__qKuvs > div",
        r#"div[class*="location"]"#,
    ]);
    static ref SALARY_CHAIN: Vec<Selector> = chain(&[
        "div.SalaryEstimate_averageEstimate__xF_7h",
        r#"span[class*="salary"]"#,
        r#"div[class*="SalaryEstimate"]"#,
    ]);
    static ref DESCRIPTION_CHAIN: Vec<Selector> = chain(&[
        r#"div[class*="JobDetails_jobDescription"]"#,
        r#"div[class*="jobDescription"]"#,
    ]);

    static ref YEAR_RE: Regex = Regex::new(r"20\d{2}").unwrap();
    static ref SALARY_MIN_RE: Regex = Regex::new(r"minimum salary is \$(\d+)K").unwrap();
    static ref SALARY_MAX_RE: Regex = Regex::new(r"max salary is \$(\d+)K").unwrap();

    /// Experience patterns in priority order; the first pattern that
    /// yields anything stops the scan.
    static ref EXPERIENCE_CHAIN: Vec<Regex> = [
        r"(?i)(\d+)\+?\s*years?\s*of?\s*experience",
        r"(?i)minimum\s+of?\s*(\d+)\s*years?",
        r"(?i)at\s+least\s+(\d+)\s*years?",
        r"(?i)(\d+)[-–](\d+)\s*years?\s*(of\s*)?experience",
        r"(?i)(\d+)\s*years?\s*(of\s*)?experience",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect();
}

/// The salary widget sometimes appends the job's location to the
/// estimate text; these exact suffixes get stripped.
const SALARY_LOCATION_ARTIFACTS: [&str; 4] = [
    "Boston, MA",
    "New York, NY",
    "Hyderabad, India",
    "San Francisco, CA",
];

enum Marker {
    Symbol(&'static str),
    Code(&'static str),
}

/// Ordered currency markers; symbol entries outrank code entries, so a
/// "$" anywhere wins over a literal "EUR".
const CURRENCY_MARKERS: &[(Marker, &str)] = &[
    (Marker::Symbol("$"), "USD"),
    (Marker::Symbol("€"), "EUR"),
    (Marker::Symbol("£"), "GBP"),
    (Marker::Symbol("¥"), "JPY"),
    (Marker::Symbol("₹"), "INR"),
    (Marker::Code("INR"), "INR"),
    (Marker::Code("CAD"), "CAD"),
    (Marker::Code("AUD"), "AUD"),
    (Marker::Code("CHF"), "CHF"),
    (Marker::Code("SEK"), "SEK"),
    (Marker::Code("NOK"), "NOK"),
    (Marker::Code("DKK"), "DKK"),
    (Marker::Code("PLN"), "PLN"),
    (Marker::Code("CZK"), "CZK"),
    (Marker::Code("HUF"), "HUF"),
    (Marker::Code("RUB"), "RUB"),
    (Marker::Code("BRL"), "BRL"),
    (Marker::Code("MXN"), "MXN"),
    (Marker::Code("ZAR"), "ZAR"),
    (Marker::Code("KRW"), "KRW"),
    (Marker::Code("SGD"), "SGD"),
    (Marker::Code("HKD"), "HKD"),
    (Marker::Code("NZD"), "NZD"),
];

const DEFAULT_CURRENCY: &str = "USD";

/// Build one record from a fetched detail page. Pure: markup that
/// resolves nothing leaves the field at the sentinel, it never fails
/// the record.
pub fn extract_job_record(html: &str, url: &str) -> JobRecord {
    let doc = Html::parse_document(html);
    let page_text = doc.root_element().text().collect::<Vec<_>>().join(" ");

    let name = first_text(&doc, &NAME_CHAIN).unwrap_or_else(sentinel);
    let company = first_text(&doc, &COMPANY_CHAIN)
        .or_else(|| company_from_url(url))
        .unwrap_or_else(sentinel);
    let location = first_text(&doc, &LOCATION_CHAIN).unwrap_or_else(sentinel);
    let (city, state) = split_location(&location);

    let year = YEAR_RE
        .find(&page_text)
        .map(|m| m.as_str().to_owned())
        .unwrap_or_else(sentinel);

    let salary = all_text(&doc, &SALARY_CHAIN)
        .map(|text| format_salary(&text))
        .unwrap_or_else(sentinel);
    let currency = detect_currency(&salary);

    let region = derive_region(&location, &city, &state);

    let description = all_text(&doc, &DESCRIPTION_CHAIN).unwrap_or_else(|| page_text.clone());
    let years_of_experience = extract_experience(&description);

    JobRecord {
        name,
        company,
        state,
        city,
        salary,
        location,
        currency,
        region,
        years_of_experience,
        year,
        url: url.to_owned(),
    }
}

fn sentinel() -> String {
    SENTINEL.to_owned()
}

/// First non-empty text of the first element each selector matches,
/// in chain order.
fn first_text(doc: &Html, chain: &[Selector]) -> Option<String> {
    chain.iter().find_map(|selector| {
        doc.select(selector).find_map(|element| {
            let text = element.text().collect::<String>().trim().to_owned();
            (!text.is_empty()).then_some(text)
        })
    })
}

/// Joined text of every element a selector matches; first chain entry
/// with any text wins.
fn all_text(doc: &Html, chain: &[Selector]) -> Option<String> {
    chain.iter().find_map(|selector| {
        let text = doc
            .select(selector)
            .flat_map(|element| element.text())
            .collect::<Vec<_>>()
            .join(" ");
        let text = text.trim().to_owned();
        (!text.is_empty()).then_some(text)
    })
}

/// Derive a company name from the listing URL path. The slug usually
/// ends with the employer name; a heuristic, not a guarantee.
fn company_from_url(url: &str) -> Option<String> {
    let path = url.split("/job-listing/").nth(1)?;
    let slug = path.split("-JV_").next().unwrap_or(path);
    let slug = slug.split('?').next().unwrap_or(slug);
    let words = slug.split('-').collect::<Vec<_>>();
    if words.len() <= 2 {
        return None;
    }
    Some(title_case(&words[words.len() - 2..].join(" ")))
}

fn split_location(location: &str) -> (String, String) {
    match location.split_once(',') {
        Some((city, rest)) => {
            let state = rest.split(',').next().unwrap_or("").trim();
            let state = if state.is_empty() {
                SENTINEL.to_owned()
            } else {
                state.to_owned()
            };
            (city.trim().to_owned(), state)
        }
        None => (location.to_owned(), SENTINEL.to_owned()),
    }
}

/// Turn the salary widget text into "$NK - $MK" / "$NK" when the
/// estimate phrases are present, otherwise keep a trimmed prefix of the
/// raw text.
fn format_salary(text: &str) -> String {
    let min = SALARY_MIN_RE.captures(text).map(|caps| caps[1].to_owned());
    let max = SALARY_MAX_RE.captures(text).map(|caps| caps[1].to_owned());
    match (min, max) {
        (Some(min), Some(max)) => format!("${}K - ${}K", min, max),
        (Some(min), None) => format!("${}K", min),
        _ => {
            let mut salary: String = text.chars().take(100).collect();
            for artifact in SALARY_LOCATION_ARTIFACTS {
                if salary.contains(artifact) {
                    salary = salary
                        .split(artifact)
                        .next()
                        .unwrap_or("")
                        .trim()
                        .to_owned();
                    break;
                }
            }
            salary
        }
    }
}

fn detect_currency(salary: &str) -> String {
    let upper = salary.to_uppercase();
    CURRENCY_MARKERS
        .iter()
        .find(|(marker, _)| match marker {
            Marker::Symbol(symbol) => salary.contains(symbol),
            Marker::Code(code) => upper.contains(code),
        })
        .map(|&(_, code)| code.to_owned())
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_owned())
}

fn derive_region(location: &str, city: &str, state: &str) -> String {
    if location != SENTINEL {
        location.to_owned()
    } else if city != SENTINEL && state != SENTINEL {
        format!("{}, {}", city, state)
    } else {
        SENTINEL.to_owned()
    }
}

/// Scan the description with each pattern in turn; the first match
/// whose numeric capture groups form a range or a single minimum wins.
/// Optional non-numeric groups (like a trailing "of") don't count.
fn extract_experience(text: &str) -> String {
    for pattern in EXPERIENCE_CHAIN.iter() {
        for caps in pattern.captures_iter(text) {
            let numeric = caps
                .iter()
                .skip(1)
                .flatten()
                .map(|group| group.as_str())
                .filter(|group| !group.is_empty() && group.chars().all(|c| c.is_ascii_digit()))
                .collect::<Vec<_>>();
            match numeric.as_slice() {
                [min, max, ..] => return format!("{}-{} years", min, max),
                [years] => return format!("{}+ years", years),
                [] => {}
            }
        }
    }
    SENTINEL.to_owned()
}
