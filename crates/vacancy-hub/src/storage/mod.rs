//! File-backed vacancy stores.
//!
//! Every backend keeps the whole collection in memory, loads it once when the
//! store is opened and rewrites the complete file after each mutation. The
//! formats differ only in their [`Codec`]; the CRUD skeleton lives in
//! [`FileStore`].

mod any;
mod criteria;
mod csv_codec;
mod file_store;
mod json_codec;
mod sheet_codec;
mod text_codec;

use std::path::{Path, PathBuf};

pub use any::{AnyStore, BackendKind, StoredVacancy, UnknownBackend};
pub use criteria::{Criteria, CriteriaError, FieldValue, ListingField, VacancyField};
pub use csv_codec::CsvCodec;
pub use file_store::FileStore;
pub use json_codec::JsonCodec;
pub use sheet_codec::{SpreadsheetCodec, DEFAULT_SHEET_NAME};
pub use text_codec::{TextCodec, TEXT_DELIMITER};

pub type JsonStore = FileStore<JsonCodec>;
pub type CsvStore = FileStore<CsvCodec>;
pub type SpreadsheetStore = FileStore<SpreadsheetCodec>;
pub type TextStore = FileStore<TextCodec>;

/// Column order shared by the flat (CSV, spreadsheet, text) encodings.
pub const LISTING_COLUMNS: [&str; 5] = ["id", "title", "link", "salary", "description"];

/// A record type that a store can hold and filter.
pub trait StoredRecord: Clone + std::fmt::Debug {
    /// Closed set of field names criteria may refer to.
    type Field: Copy + std::fmt::Debug;

    fn id(&self) -> Option<i64>;
    fn assign_id(&mut self, id: i64);
    /// Value of `field`, or `None` when the record does not carry it.
    fn field(&self, field: Self::Field) -> Option<FieldValue>;
}

/// Uniform add/query/delete contract implemented by every backend.
pub trait VacancyStorage {
    type Record: StoredRecord;

    fn path(&self) -> &Path;

    /// Appends `record` and rewrites the backing file. A record without an id
    /// receives the next free one. The in-memory append is kept even when
    /// the write fails.
    fn add(&mut self, record: Self::Record) -> Result<(), StorageError>;

    /// Returns copies of all records, or of those matching every criterion,
    /// in storage order.
    fn query(
        &self,
        criteria: Option<&Criteria<<Self::Record as StoredRecord>::Field>>,
    ) -> Vec<Self::Record>;

    /// Removes every record with `id`. Unknown ids are a no-op.
    fn delete(&mut self, id: i64) -> Result<(), StorageError>;
}

/// Byte-level encoding of a full record collection.
pub trait Codec {
    type Record: StoredRecord;

    fn decode(&self, bytes: &[u8]) -> Result<Vec<Self::Record>, CodecError>;
    fn encode(&self, records: &[Self::Record]) -> Result<Vec<u8>, CodecError>;
}

/// Failure produced by a [`Codec`] before the store attaches the file path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("{0}")]
    Malformed(String),
    #[error("{0}")]
    Encode(String),
}

impl CodecError {
    pub(crate) fn malformed(reason: impl std::fmt::Display) -> Self {
        Self::Malformed(reason.to_string())
    }

    pub(crate) fn encode(reason: impl std::fmt::Display) -> Self {
        Self::Encode(reason.to_string())
    }

    fn at(self, path: &Path) -> StorageError {
        let path = path.to_path_buf();
        match self {
            CodecError::Malformed(reason) => StorageError::Format { path, reason },
            CodecError::Encode(reason) => StorageError::Encode { path, reason },
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to access vacancy store {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("vacancy store {} is malformed: {reason}", path.display())]
    Format { path: PathBuf, reason: String },
    #[error("failed to encode vacancy store {}: {reason}", path.display())]
    Encode { path: PathBuf, reason: String },
}

impl StorageError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
