use super::fetch;
use super::renderer::PageRenderer;
use super::ScrapeConfig;
use crate::types::JobRecord;
use futures::future::join_all;
use tokio::time::sleep;

/// Drive the whole link list through the fetcher: fixed-size batches,
/// one concurrent fetch per link within a batch, a pacing pause between
/// batches so the target site is not hammered. One job's failure never
/// takes down its siblings.
///
/// Output order is deterministic: batch order, then link order within
/// the batch, whatever order the fetches actually finished in.
pub async fn run_batches(
    renderer: &dyn PageRenderer,
    links: &[String],
    config: &ScrapeConfig,
) -> Vec<JobRecord> {
    let batch_size = config.batch_size.max(1);
    let total = links.len();
    let batch_count = links.chunks(batch_size).len();
    let mut records = Vec::with_capacity(total);

    for (batch_index, batch) in links.chunks(batch_size).enumerate() {
        let start_index = batch_index * batch_size;
        let results = join_all(
            batch
                .iter()
                .map(|link| fetch::fetch_job(renderer, link, config)),
        )
        .await;

        for (offset, result) in results.into_iter().enumerate() {
            match result {
                Ok(record) => records.push(record),
                Err(e) => {
                    let reason: String = e.to_string().chars().take(100).collect();
                    log::warn!("failed job {}: {}", start_index + offset + 1, reason);
                }
            }
        }

        log::info!(
            "progress: {}/{} jobs processed | {} successful",
            start_index + batch.len(),
            total,
            records.len()
        );
        if batch_index + 1 < batch_count {
            sleep(config.batch_pause).await;
        }
    }
    records
}
