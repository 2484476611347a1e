pub mod glassdoor;
pub mod types;

pub use types::{JobRecord, SearchQuery, SENTINEL};
