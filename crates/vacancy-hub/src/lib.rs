pub mod config;
pub mod error;
pub mod ingest;
pub mod search;
pub mod storage;
pub mod telemetry;
pub mod vacancy;
