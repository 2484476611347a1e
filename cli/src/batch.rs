use job_scraper::glassdoor;
use job_scraper::SearchQuery;
use std::path::Path;

/// Run the full jobs x locations cross product. A failure only costs
/// its own pair; the rest of the table still runs.
pub async fn batch(jobs_path: &str, locations_path: &str) {
    let titles = match persistence::read_job_titles(Path::new(jobs_path)) {
        Ok(titles) => titles,
        Err(e) => {
            log::error!("failed to read {}: {}", jobs_path, e);
            return;
        }
    };
    let locations = match persistence::read_locations(Path::new(locations_path)) {
        Ok(locations) => locations,
        Err(e) => {
            log::error!("failed to read {}: {}", locations_path, e);
            return;
        }
    };

    let config = crate::scrape_config();
    for title in &titles {
        for location in &locations {
            let place = location.slug();
            println!("{}", "=".repeat(60));
            println!("Scraping: {} in {}", title, place);
            println!("{}", "=".repeat(60));

            let query = SearchQuery::new(title.as_str(), place.as_str());
            let records = glassdoor::scrape(&query, &config).await;

            let output = format!("{}-{}-results.csv", title, place);
            crate::scrape::write_output(Path::new(&output), &records);
        }
    }
}
