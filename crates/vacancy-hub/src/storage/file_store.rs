use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{Codec, Criteria, StorageError, StoredRecord, VacancyStorage};

/// Load-mutate-rewrite skeleton shared by every backend.
///
/// The store owns its records exclusively; callers only ever receive copies.
/// Writes truncate and rewrite the file in place, so a crash mid-write can
/// leave it corrupt.
#[derive(Debug)]
pub struct FileStore<C: Codec> {
    path: PathBuf,
    codec: C,
    records: Vec<C::Record>,
}

impl<C: Codec + Default> FileStore<C> {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        Self::open_with(path, C::default())
    }
}

impl<C: Codec> FileStore<C> {
    /// Loads the backing file. A missing file yields an empty store; a file
    /// that exists but cannot be decoded fails the whole open.
    pub fn open_with(path: impl Into<PathBuf>, codec: C) -> Result<Self, StorageError> {
        let path = path.into();
        let records = match fs::read(&path) {
            Ok(bytes) => codec.decode(&bytes).map_err(|err| err.at(&path))?,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "vacancy store not found, starting empty");
                Vec::new()
            }
            Err(err) => return Err(StorageError::io(&path, err)),
        };

        debug!(path = %path.display(), count = records.len(), "vacancy store loaded");
        Ok(Self {
            path,
            codec,
            records,
        })
    }

    pub fn records(&self) -> Vec<C::Record> {
        self.records.clone()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn next_id(&self) -> i64 {
        self.records
            .iter()
            .filter_map(StoredRecord::id)
            .max()
            .map_or(1, |id| id.saturating_add(1))
    }

    fn persist(&self) -> Result<(), StorageError> {
        let bytes = self
            .codec
            .encode(&self.records)
            .map_err(|err| err.at(&self.path))?;

        if let Some(parent) = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
        {
            fs::create_dir_all(parent).map_err(|err| StorageError::io(&self.path, err))?;
        }

        fs::write(&self.path, bytes).map_err(|err| {
            warn!(path = %self.path.display(), error = %err, "vacancy store write failed");
            StorageError::io(&self.path, err)
        })?;

        debug!(path = %self.path.display(), count = self.records.len(), "vacancy store saved");
        Ok(())
    }
}

impl<C: Codec> VacancyStorage for FileStore<C> {
    type Record = C::Record;

    fn path(&self) -> &Path {
        &self.path
    }

    fn add(&mut self, mut record: Self::Record) -> Result<(), StorageError> {
        if record.id().is_none() {
            record.assign_id(self.next_id());
        }
        self.records.push(record);
        self.persist()
    }

    fn query(
        &self,
        criteria: Option<&Criteria<<Self::Record as StoredRecord>::Field>>,
    ) -> Vec<Self::Record> {
        match criteria {
            None => self.records.clone(),
            Some(criteria) => self
                .records
                .iter()
                .filter(|record| criteria.matches(*record))
                .cloned()
                .collect(),
        }
    }

    fn delete(&mut self, id: i64) -> Result<(), StorageError> {
        let before = self.records.len();
        self.records.retain(|record| record.id() != Some(id));

        if self.records.len() == before {
            debug!(path = %self.path.display(), id, "no vacancy with this id, nothing deleted");
            return Ok(());
        }
        self.persist()
    }
}
