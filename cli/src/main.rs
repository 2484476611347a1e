mod batch;
mod scrape;

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use job_scraper::glassdoor::ScrapeConfig;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scrape one role keyword in one place and write the results CSV
    Scrape {
        /// Job title slug, e.g. data-scientist
        keyword: String,
        /// Place slug, e.g. new-york-ny
        place: String,
        /// Drop results whose location does not match the place
        #[clap(long)]
        filter_location: bool,
        /// Output file; defaults to {keyword}-{place}-results.csv
        #[clap(long)]
        output: Option<String>,
    },
    /// Run every job-title/location pair from the two input tables
    Batch {
        /// CSV with a job_title column
        #[clap(long, default_value = "jobs.csv")]
        jobs: String,
        /// CSV with city and country columns
        #[clap(long, default_value = "country.csv")]
        locations: String,
    },
}

/// Defaults, with the WebDriver endpoint overridable from the
/// environment.
pub(crate) fn scrape_config() -> ScrapeConfig {
    let mut config = ScrapeConfig::default();
    if let Ok(url) = std::env::var("WEBDRIVER_URL") {
        config.webdriver_url = url;
    }
    config
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();
    let args = Cli::parse();
    match args.command {
        Commands::Scrape {
            keyword,
            place,
            filter_location,
            output,
        } => scrape::scrape(&keyword, &place, filter_location, output).await,
        Commands::Batch { jobs, locations } => batch::batch(&jobs, &locations).await,
    }
}
