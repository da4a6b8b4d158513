//! Access to the remote vacancy search API.

mod headhunter;

pub use headhunter::{parse_items, HeadHunterClient, DEFAULT_SEARCH_URL};

use crate::vacancy::RawListing;

/// Anything that can return raw listings for a keyword.
pub trait SearchClient {
    fn fetch(&self, keyword: &str, page_size: u32) -> Result<Vec<RawListing>, SearchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("search API responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("search API returned an unexpected payload: {0}")]
    Payload(#[from] serde_json::Error),
}
