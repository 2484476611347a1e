use chrono::Local;
use job_scraper::glassdoor::{self, filter};
use job_scraper::{JobRecord, SearchQuery};
use std::path::Path;

pub async fn scrape(keyword: &str, place: &str, filter_location: bool, output: Option<String>) {
    let query = SearchQuery::new(keyword, place);
    let config = crate::scrape_config();

    println!("{}", "=".repeat(60));
    println!("GLASSDOOR JOB SCRAPER");
    println!("Target: {} in {}", keyword, place);
    println!("Started at: {}", Local::now().format("%H:%M:%S"));
    println!("{}", "=".repeat(60));

    let mut records = glassdoor::scrape(&query, &config).await;
    if filter_location {
        records = filter::filter_by_location(records, place);
    }

    let output = output.unwrap_or_else(|| format!("{}-{}-results.csv", keyword, place));
    write_output(Path::new(&output), &records);
}

pub(crate) fn write_output(path: &Path, records: &[JobRecord]) {
    match persistence::write_records(path, records) {
        Ok(()) if records.is_empty() => println!("No data to save."),
        Ok(()) => println!(
            "Successfully saved {} jobs to: {}",
            records.len(),
            path.display()
        ),
        Err(e) => log::error!("failed to write {}: {}", path.display(), e),
    }
}
