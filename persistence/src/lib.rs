use job_scraper::JobRecord;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("csv error: '{0}'")]
    Csv(#[from] csv::Error),
    #[error("file error: '{0}'")]
    Io(#[from] std::io::Error),
}

/// Output schema, in column order.
pub const COLUMNS: [&str; 11] = [
    "Name",
    "Company",
    "State",
    "City",
    "Salary",
    "Location",
    "Currency",
    "Region",
    "Years of Experience",
    "Year",
    "Url",
];

/// One row of the batch driver's location table.
#[derive(Debug, Deserialize)]
pub struct LocationRow {
    pub city: String,
    pub country: String,
}

impl LocationRow {
    /// Place slug the scraper expects: "New York"/"USA" becomes
    /// "new-york-usa".
    pub fn slug(&self) -> String {
        format!(
            "{}-{}",
            self.city.to_lowercase().replace(' ', "-"),
            self.country.to_lowercase()
        )
    }
}

#[derive(Debug, Deserialize)]
struct JobTitleRow {
    job_title: String,
}

/// Write records as fully quoted CSV rows under the fixed 11-column
/// header. The file is created if absent and overwritten if present;
/// the header is written even when there are no records.
pub fn write_records(path: &Path, records: &[JobRecord]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    log::debug!("wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Job titles for the batch driver; blank titles are skipped.
pub fn read_job_titles(path: &Path) -> Result<Vec<String>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut titles = Vec::new();
    for row in reader.deserialize::<JobTitleRow>() {
        let title = row?.job_title.trim().to_owned();
        if !title.is_empty() {
            titles.push(title);
        }
    }
    Ok(titles)
}

/// City/country pairs for the batch driver; rows missing either field
/// are skipped.
pub fn read_locations(path: &Path) -> Result<Vec<LocationRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut locations = Vec::new();
    for row in reader.deserialize::<LocationRow>() {
        let row = row?;
        let location = LocationRow {
            city: row.city.trim().to_owned(),
            country: row.country.trim().to_owned(),
        };
        if !location.city.is_empty() && !location.country.is_empty() {
            locations.push(location);
        }
    }
    Ok(locations)
}

#[cfg(test)]
mod test {
    use super::*;
    use job_scraper::SENTINEL;
    use std::fs;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("{}-{}", std::process::id(), name))
    }

    fn sample_record(url: &str) -> JobRecord {
        JobRecord {
            name: "Data Scientist".to_owned(),
            company: "Acme Corp".to_owned(),
            state: "MA".to_owned(),
            city: "Boston".to_owned(),
            salary: "$80K - $120K".to_owned(),
            location: "Boston, MA".to_owned(),
            currency: "USD".to_owned(),
            region: "Boston, MA".to_owned(),
            years_of_experience: "5+ years".to_owned(),
            year: "2023".to_owned(),
            url: url.to_owned(),
        }
    }

    #[test]
    fn test_header_written_even_without_records() {
        let path = temp_path("empty-results.csv");
        write_records(&path, &[]).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents.lines().next().unwrap(),
            r#""Name","Company","State","City","Salary","Location","Currency","Region","Years of Experience","Year","Url""#
        );
        assert_eq!(contents.lines().count(), 1);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_rows_quoted_and_ordered() {
        let path = temp_path("results.csv");
        let records = vec![
            sample_record("https://example.com/job-listing/a"),
            sample_record("https://example.com/job-listing/b"),
        ];
        write_records(&path, &records).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with(r#""Data Scientist","Acme Corp","MA","Boston"#));
        assert!(lines[1].ends_with(r#""https://example.com/job-listing/a""#));
        assert!(lines[2].ends_with(r#""https://example.com/job-listing/b""#));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_existing_file_overwritten() {
        let path = temp_path("overwrite-results.csv");
        write_records(&path, &[sample_record("u1"), sample_record("u2")]).unwrap();
        write_records(&path, &[sample_record("u3")]).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
        assert!(contents.contains("u3"));
        assert!(!contents.contains("u1"));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_read_input_tables() {
        let jobs_path = temp_path("jobs.csv");
        fs::write(&jobs_path, "job_title\ndata-scientist\n  \nbackend-engineer\n").unwrap();
        let titles = read_job_titles(&jobs_path).unwrap();
        assert_eq!(titles, vec!["data-scientist", "backend-engineer"]);
        fs::remove_file(&jobs_path).unwrap();

        let locations_path = temp_path("country.csv");
        fs::write(
            &locations_path,
            "city,country\nNew York,USA\n,Canada\nToronto,Canada\n",
        )
        .unwrap();
        let locations = read_locations(&locations_path).unwrap();
        assert_eq!(locations.len(), 2);
        assert_eq!(locations[0].slug(), "new-york-usa");
        assert_eq!(locations[1].slug(), "toronto-canada");
        fs::remove_file(&locations_path).unwrap();
    }

    #[test]
    fn test_sentinel_fields_written_as_is() {
        let path = temp_path("sentinel-results.csv");
        let mut record = sample_record("u1");
        record.salary = SENTINEL.to_owned();
        write_records(&path, &[record]).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains(r#""N/A""#));
        fs::remove_file(&path).unwrap();
    }
}
