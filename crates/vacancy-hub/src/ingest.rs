//! Wires search results through normalization into a store.

use serde::Serialize;
use tracing::{info, warn};

use crate::search::{SearchClient, SearchError};
use crate::storage::{AnyStore, StorageError};
use crate::vacancy::VacancyRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub fetched: usize,
    pub stored: usize,
    pub rejected: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Fetches listings for `keyword` and adds every valid one to `store`.
///
/// Listings that fail validation are skipped and counted; a storage failure
/// stops the run, leaving earlier additions in place.
pub fn ingest<S>(
    client: &S,
    store: &mut AnyStore,
    keyword: &str,
    page_size: u32,
) -> Result<IngestReport, IngestError>
where
    S: SearchClient + ?Sized,
{
    let listings = client.fetch(keyword, page_size)?;
    let mut report = IngestReport {
        fetched: listings.len(),
        ..IngestReport::default()
    };

    for listing in listings {
        let name = listing.name.clone();
        match VacancyRecord::from_raw(listing) {
            Ok(record) => {
                store.add_vacancy(&record)?;
                report.stored += 1;
            }
            Err(err) => {
                warn!(listing = %name, error = %err, "skipping listing that failed validation");
                report.rejected += 1;
            }
        }
    }

    info!(
        keyword,
        backend = %store.kind(),
        fetched = report.fetched,
        stored = report.stored,
        rejected = report.rejected,
        "vacancy ingest finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::BackendKind;
    use crate::vacancy::RawListing;
    use serde_json::json;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingClient {
        listings: Vec<RawListing>,
        calls: RefCell<Vec<(String, u32)>>,
    }

    impl SearchClient for RecordingClient {
        fn fetch(&self, keyword: &str, page_size: u32) -> Result<Vec<RawListing>, SearchError> {
            self.calls.borrow_mut().push((keyword.to_string(), page_size));
            Ok(self.listings.clone())
        }
    }

    fn listing(value: serde_json::Value) -> RawListing {
        serde_json::from_value(value).expect("raw listing")
    }

    #[test]
    fn stores_valid_listings_and_counts_rejects() {
        let client = RecordingClient {
            listings: vec![
                listing(json!({
                    "id": "1",
                    "name": "Rust developer",
                    "alternate_url": "https://hh.ru/vacancy/1",
                    "salary": {"from": 100000, "to": null, "currency": "RUR"}
                })),
                listing(json!({
                    "id": "2",
                    "name": "Broken salary",
                    "alternate_url": "https://hh.ru/vacancy/2",
                    "salary": {"from": 100000}
                })),
                listing(json!({ "name": "", "alternate_url": "https://hh.ru/vacancy/3" })),
            ],
            ..RecordingClient::default()
        };
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = AnyStore::open(BackendKind::Json, dir.path().join("v.json"), "unused")
            .expect("open");

        let report = ingest(&client, &mut store, "Rust", 30).expect("ingest");

        assert_eq!(
            report,
            IngestReport {
                fetched: 3,
                stored: 1,
                rejected: 2
            }
        );
        assert_eq!(client.calls.borrow().as_slice(), &[("Rust".to_string(), 30)]);
        let stored = store.list();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id(), Some(1));
        assert_eq!(stored[0].title(), "Rust developer");
    }

    struct FailingClient;

    impl SearchClient for FailingClient {
        fn fetch(&self, _keyword: &str, _page_size: u32) -> Result<Vec<RawListing>, SearchError> {
            Err(SearchError::Status {
                status: 503,
                body: "unavailable".to_string(),
            })
        }
    }

    #[test]
    fn search_failures_propagate_without_touching_the_store() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("v.txt");
        let mut store = AnyStore::open(BackendKind::Text, &path, "unused").expect("open");

        let error = ingest(&FailingClient, &mut store, "Rust", 5).expect_err("search fails");
        assert!(matches!(error, IngestError::Search(SearchError::Status { status: 503, .. })));
        assert!(!path.exists());
    }
}
