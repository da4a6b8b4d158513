use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use super::{SearchClient, SearchError};
use crate::vacancy::RawListing;

pub const DEFAULT_SEARCH_URL: &str = "https://api.hh.ru/vacancies";

const USER_AGENT: &str = concat!("vacancy-hub/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking client for the hh.ru vacancy search endpoint.
#[derive(Debug, Clone)]
pub struct HeadHunterClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl HeadHunterClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, SearchError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            http,
        })
    }

    /// Query parameters restricting the match to vacancy titles.
    pub fn query_params(keyword: &str, page_size: u32) -> [(&'static str, String); 2] {
        [
            ("text", format!("NAME:{}", keyword.trim())),
            ("per_page", page_size.to_string()),
        ]
    }
}

impl SearchClient for HeadHunterClient {
    fn fetch(&self, keyword: &str, page_size: u32) -> Result<Vec<RawListing>, SearchError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&Self::query_params(keyword, page_size))
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(SearchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let listings = parse_items(&body)?;
        debug!(keyword, count = listings.len(), "search API returned listings");
        Ok(listings)
    }
}

#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    items: Vec<RawListing>,
}

/// Extracts the `items` array from a search API response body.
pub fn parse_items(body: &str) -> Result<Vec<RawListing>, SearchError> {
    let page: SearchPage = serde_json::from_str(body)?;
    Ok(page.items)
}
