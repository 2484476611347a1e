pub mod batch;
pub mod extract;
pub mod fetch;
pub mod filter;
pub mod links;
pub mod renderer;
#[cfg(test)]
pub(crate) mod testing;

use crate::types::{JobRecord, SearchQuery};
use renderer::{PageRenderer, WebDriverRenderer};
use std::time::{Duration, Instant};
use thiserror::Error;

pub const BASE_URL: &str = "https://www.glassdoor.com";

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("webdriver error: '{0}'")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),
    #[error("page load timed out after {0:?}")]
    PageLoadTimeout(Duration),
    #[error("content not found in page: '{0}'")]
    ContentNotFound(&'static str),
}

/// Tunables for one scrape run, passed into the renderer, fetcher and
/// scheduler instead of living as module constants.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// WebDriver endpoint every renderer session connects to.
    pub webdriver_url: String,
    /// Run the browser without a visible window.
    pub headless: bool,
    /// Detail pages fetched concurrently per batch. Default 5.
    pub batch_size: usize,
    /// Navigation attempts per job before it is dropped. Default 3.
    pub max_retries: u32,
    /// Pause between batches, to stay under the site's rate limits. Default 1s.
    pub batch_pause: Duration,
    /// Hard cap on a single page load. Default 15s.
    pub page_load_timeout: Duration,
    /// Wait between failed navigation attempts. Default 1s.
    pub retry_backoff: Duration,
    /// Scroll-to-bottom rounds that trigger the results-page lazy loader. Default 5.
    pub scroll_rounds: u32,
    /// Wait after each scroll round. Default 2s.
    pub scroll_pause: Duration,
    /// Settle time after a successful page load. Default 500ms.
    pub settle: Duration,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".to_owned(),
            headless: true,
            batch_size: 5,
            max_retries: 3,
            batch_pause: Duration::from_secs(1),
            page_load_timeout: Duration::from_secs(15),
            retry_backoff: Duration::from_secs(1),
            scroll_rounds: 5,
            scroll_pause: Duration::from_secs(2),
            settle: Duration::from_millis(500),
        }
    }
}

/// Scrape every listing the site surfaces for one query.
///
/// Never fails outward: a renderer that cannot be started logs an error
/// and yields an empty record set, so batch callers keep going.
pub async fn scrape(query: &SearchQuery, config: &ScrapeConfig) -> Vec<JobRecord> {
    let renderer = WebDriverRenderer::new(&query.place, config);
    scrape_with_renderer(&renderer, query, config).await
}

/// Same pipeline over any renderer; the seam used by tests.
pub async fn scrape_with_renderer(
    renderer: &dyn PageRenderer,
    query: &SearchQuery,
    config: &ScrapeConfig,
) -> Vec<JobRecord> {
    log::info!("starting scrape: {} in {}", query.keyword, query.place);
    let started = Instant::now();

    let results_page = match renderer.render_results(query).await {
        Ok(html) => html,
        Err(e) => {
            log::error!("renderer failed for {}-{}: {}", query.keyword, query.place, e);
            return Vec::new();
        }
    };

    let links = links::collect_job_links(&results_page, BASE_URL);
    if links.is_empty() {
        log::warn!("no job links found for {}-{}", query.keyword, query.place);
        return Vec::new();
    }

    let records = batch::run_batches(renderer, &links, config).await;

    let elapsed = started.elapsed().as_secs_f64();
    if records.is_empty() {
        log::warn!("no jobs scraped for {}-{}", query.keyword, query.place);
    } else {
        log::info!(
            "completed {}-{}: {} jobs in {:.2}s",
            query.keyword,
            query.place,
            records.len(),
            elapsed
        );
    }
    records
}

#[cfg(test)]
mod test {
    use super::testing::MockRenderer;
    use super::*;
    use std::collections::HashSet;

    fn results_page(hrefs: &[&str]) -> String {
        let anchors = hrefs
            .iter()
            .map(|href| format!(r#"<a href="{}">job</a>"#, href))
            .collect::<String>();
        format!("<html><body>{}</body></html>", anchors)
    }

    #[tokio::test(start_paused = true)]
    async fn test_pipeline_emits_unique_urls() {
        let _ = env_logger::builder().is_test(true).try_init();
        let html = results_page(&[
            "/job-listing/data-scientist-acme-JV_1.htm",
            "/job-listing/data-scientist-globex-JV_2.htm",
            "/job-listing/data-scientist-acme-JV_1.htm",
            "/job-listing/data-scientist-initech-JV_3.htm",
        ]);
        let renderer = MockRenderer::with_results(&html);
        let query = SearchQuery::new("data-scientist", "boston");
        let records = scrape_with_renderer(&renderer, &query, &ScrapeConfig::default()).await;

        assert_eq!(records.len(), 3);
        let unique: HashSet<_> = records.iter().cloned().collect();
        assert_eq!(unique.len(), records.len());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_renderer_yields_empty_set() {
        let renderer = MockRenderer::with_failing_results();
        let query = SearchQuery::new("data-scientist", "boston");
        let records = scrape_with_renderer(&renderer, &query, &ScrapeConfig::default()).await;
        assert!(records.is_empty());
    }
}
