use super::{Error, Result, ScrapeConfig};
use crate::types::SearchQuery;
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use thirtyfour::extensions::cdp::ChromeDevTools;
use thirtyfour::prelude::*;
use tokio::time::sleep;

const SEARCH_URL: &str = "https://www.glassdoor.com/Job/index.htm";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Known places whose searches get redirected by IP-based geolocation
/// unless the browser reports matching coordinates.
const GEO_OVERRIDES: &[(&str, f64, f64)] = &[
    ("new-york", 40.7128, -74.0060),
    ("hyderabad", 17.3850, 78.4867),
    ("mumbai", 19.0760, 72.8777),
    ("bangalore", 12.9716, 77.5946),
    ("boston", 42.3601, -71.0589),
];

/// Browser-side collaborator: renders the search-results page and serves
/// exclusive per-job pages. Backed by WebDriver in production, mocked in
/// tests.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Drive the site's search form for `query` and return the fully
    /// lazy-loaded results page source.
    async fn render_results(&self, query: &SearchQuery) -> Result<String>;

    /// Open a fresh page for one job fetch. The caller owns it for the
    /// job's lifetime and must close it.
    async fn open_page(&self) -> Result<Box<dyn RenderedPage>>;
}

/// One exclusive browser page, never shared across concurrent jobs.
#[async_trait]
pub trait RenderedPage: Send {
    /// Load `url` and return the page source, bounded by `timeout`.
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<String>;

    /// Release the underlying browser resources.
    async fn close(self: Box<Self>);
}

pub struct WebDriverRenderer {
    config: ScrapeConfig,
    geolocation: Option<(f64, f64)>,
}

impl WebDriverRenderer {
    pub fn new(place: &str, config: &ScrapeConfig) -> Self {
        let place = place.to_lowercase();
        let geolocation = GEO_OVERRIDES
            .iter()
            .find(|(name, _, _)| place.contains(name))
            .map(|&(_, latitude, longitude)| (latitude, longitude));
        Self {
            config: config.clone(),
            geolocation,
        }
    }

    /// Every session of a run carries the same context: headless flags,
    /// fixed viewport and user agent, en-US language, geolocation override.
    async fn new_session(&self) -> Result<WebDriver> {
        let mut caps = DesiredCapabilities::chrome();
        if self.config.headless {
            caps.set_headless()?;
        }
        for arg in [
            "--no-sandbox",
            "--disable-dev-shm-usage",
            "--disable-gpu",
            "--disable-extensions",
            "--window-size=1280,720",
        ] {
            caps.add_chrome_arg(arg)?;
        }
        caps.add_chrome_arg(&format!("--user-agent={}", USER_AGENT))?;

        let driver = WebDriver::new(&self.config.webdriver_url, caps).await?;
        let dev_tools = ChromeDevTools::new(driver.handle.clone());
        dev_tools.execute_cdp("Network.enable").await?;
        dev_tools
            .execute_cdp_with_params(
                "Network.setExtraHTTPHeaders",
                json!({"headers": {"Accept-Language": "en-US"}}),
            )
            .await?;
        if let Some((latitude, longitude)) = self.geolocation {
            dev_tools
                .execute_cdp_with_params(
                    "Emulation.setGeolocationOverride",
                    json!({"latitude": latitude, "longitude": longitude, "accuracy": 100}),
                )
                .await?;
        }
        Ok(driver)
    }
}

#[async_trait]
impl PageRenderer for WebDriverRenderer {
    async fn render_results(&self, query: &SearchQuery) -> Result<String> {
        let driver = self.new_session().await?;
        let result = run_search(&driver, query, &self.config).await;
        if let Err(e) = driver.quit().await {
            log::debug!("failed to quit results session: {}", e);
        }
        result
    }

    async fn open_page(&self) -> Result<Box<dyn RenderedPage>> {
        let driver = self.new_session().await?;
        Ok(Box::new(WebDriverPage {
            driver,
            settle: self.config.settle,
        }))
    }
}

struct WebDriverPage {
    driver: WebDriver,
    settle: Duration,
}

#[async_trait]
impl RenderedPage for WebDriverPage {
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<String> {
        tokio::time::timeout(timeout, self.driver.goto(url))
            .await
            .map_err(|_| Error::PageLoadTimeout(timeout))??;
        sleep(self.settle).await;
        Ok(self.driver.source().await?)
    }

    async fn close(self: Box<Self>) {
        let WebDriverPage { driver, .. } = *self;
        if let Err(e) = driver.quit().await {
            log::debug!("failed to close job page: {}", e);
        }
    }
}

/// Form-based search: fill both inputs, take the first location
/// suggestion, submit, then scroll the lazy loader out.
async fn run_search(driver: &WebDriver, query: &SearchQuery, config: &ScrapeConfig) -> Result<String> {
    log::info!("loading job search page");
    tokio::time::timeout(Duration::from_secs(60), driver.goto(SEARCH_URL))
        .await
        .map_err(|_| Error::PageLoadTimeout(Duration::from_secs(60)))??;
    sleep(Duration::from_secs(3)).await;

    log::info!("entering job title: {}", query.keyword);
    let title_input = driver.find(By::Id("searchBar-jobTitle")).await?;
    title_input.click().await?;
    title_input.send_keys(query.keyword.as_str()).await?;
    sleep(Duration::from_secs(1)).await;

    let location_text = query.display_location();
    log::info!("entering location: {}", location_text);
    let location_input = driver.find(By::Id("searchBar-location")).await?;
    location_input.click().await?;
    location_input.send_keys(location_text.as_str()).await?;
    sleep(Duration::from_secs(2)).await;

    // The first suggestion refines the query; a missing dropdown is survivable.
    match driver
        .query(By::Css("#searchBar-location-search-suggestions li"))
        .wait(Duration::from_secs(5), Duration::from_millis(250))
        .first()
        .await
    {
        Ok(suggestion) => {
            suggestion.click().await?;
            sleep(Duration::from_secs(1)).await;
        }
        Err(e) => log::warn!("no location suggestions offered: {}", e),
    }

    log::info!("submitting search form");
    submit_search(driver, &location_input).await?;
    sleep(Duration::from_secs(3)).await;

    if let Err(e) = driver
        .query(By::Css(r#"[class*="JobCard"]"#))
        .wait(Duration::from_secs(10), Duration::from_millis(500))
        .first()
        .await
    {
        log::warn!("job cards not found, continuing anyway: {}", e);
    }

    log::info!("scrolling to load more jobs");
    for _ in 0..config.scroll_rounds {
        driver
            .execute("window.scrollTo(0, document.body.scrollHeight);", vec![])
            .await?;
        sleep(config.scroll_pause).await;
    }

    Ok(driver.source().await?)
}

async fn submit_search(driver: &WebDriver, location_input: &WebElement) -> Result<()> {
    if let Ok(button) = driver.find(By::Css(r#"button[type="submit"]"#)).await {
        if button.is_displayed().await.unwrap_or(false) {
            button.click().await?;
            return Ok(());
        }
    }
    location_input.send_keys(Key::Enter.to_string()).await?;
    Ok(())
}
