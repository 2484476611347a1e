use super::renderer::{PageRenderer, RenderedPage};
use super::{extract, Result, ScrapeConfig};
use crate::types::JobRecord;
use tokio::time::sleep;

/// Fetch one detail page and turn it into a record. The page resource
/// is released on every path, success or not.
pub async fn fetch_job(
    renderer: &dyn PageRenderer,
    url: &str,
    config: &ScrapeConfig,
) -> Result<JobRecord> {
    let mut page = renderer.open_page().await?;
    let outcome = navigate_with_retry(page.as_mut(), url, config).await;
    page.close().await;
    let content = outcome?;
    Ok(extract::extract_job_record(&content, url))
}

/// Up to `max_retries` navigation attempts with a fixed backoff between
/// them; the last error wins once the budget runs out.
async fn navigate_with_retry(
    page: &mut dyn RenderedPage,
    url: &str,
    config: &ScrapeConfig,
) -> Result<String> {
    let mut attempt = 1;
    loop {
        match page.navigate(url, config.page_load_timeout).await {
            Ok(content) => return Ok(content),
            Err(e) if attempt >= config.max_retries => return Err(e),
            Err(e) => {
                log::debug!("attempt {} failed for {}: {}", attempt, url, e);
                sleep(config.retry_backoff).await;
                attempt += 1;
            }
        }
    }
}
