use lazy_static::lazy_static;
use scraper::{Html, Selector};
use std::collections::HashSet;

/// Link-discovery strategies, tried in order. The first selector that
/// matches anything wins; later ones are never consulted.
const LINK_SELECTORS: [&str; 5] = [
    r#"a[href*="/job-listing/"]"#,
    r#"a[class*="JobCard"]"#,
    r#"a[href*="glassdoor.com/job-listing"]"#,
    r#"a.JobCard_jobTitle__rbjTE"#,
    r#"a[class*="jobTitle"]"#,
];

lazy_static! {
    static ref LINK_CHAIN: Vec<Selector> = LINK_SELECTORS
        .iter()
        .map(|css| Selector::parse(css).unwrap())
        .collect();
}

/// Collect candidate detail-page links from a rendered results page:
/// absolute URLs, insertion-ordered dedup, truncated to the adaptive
/// scrape limit.
pub fn collect_job_links(html: &str, base_url: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    let hrefs = LINK_CHAIN
        .iter()
        .map(|selector| {
            doc.select(selector)
                .filter_map(|anchor| anchor.value().attr("href"))
                .collect::<Vec<_>>()
        })
        .find(|hrefs| !hrefs.is_empty())
        .unwrap_or_default();

    let mut seen = HashSet::new();
    let links = hrefs
        .into_iter()
        .map(|href| absolute(href, base_url))
        .filter(|link| seen.insert(link.clone()))
        .collect::<Vec<_>>();

    let found = links.len();
    let limit = scrape_limit(found);
    log::info!("found {} job links, scraping {}", found, limit);
    links.into_iter().take(limit).collect()
}

fn absolute(href: &str, base_url: &str) -> String {
    if href.starts_with("http") {
        href.to_owned()
    } else {
        format!("{}{}", base_url, href)
    }
}

/// Adaptive cap on how many detail pages get fetched: small result sets
/// are scraped whole, large ones from the front up to 60.
pub fn scrape_limit(found: usize) -> usize {
    if found >= 20 {
        found.min(60)
    } else {
        found
    }
}
