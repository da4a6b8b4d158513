use crate::config::ConfigError;
use crate::ingest::IngestError;
use crate::search::SearchError;
use crate::storage::{CriteriaError, StorageError};
use crate::telemetry::TelemetryError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Storage(StorageError),
    Search(SearchError),
    Ingest(IngestError),
    Query(CriteriaError),
    Output(serde_json::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Storage(err) => write!(f, "storage error: {}", err),
            AppError::Search(err) => write!(f, "search error: {}", err),
            AppError::Ingest(err) => write!(f, "ingest error: {}", err),
            AppError::Query(err) => write!(f, "invalid query: {}", err),
            AppError::Output(err) => write!(f, "failed to render output: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Storage(err) => Some(err),
            AppError::Search(err) => Some(err),
            AppError::Ingest(err) => Some(err),
            AppError::Query(err) => Some(err),
            AppError::Output(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<StorageError> for AppError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<SearchError> for AppError {
    fn from(value: SearchError) -> Self {
        Self::Search(value)
    }
}

impl From<IngestError> for AppError {
    fn from(value: IngestError) -> Self {
        Self::Ingest(value)
    }
}

impl From<CriteriaError> for AppError {
    fn from(value: CriteriaError) -> Self {
        Self::Query(value)
    }
}
