use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::{
    Criteria, CriteriaError, CsvStore, JsonStore, ListingField, SpreadsheetCodec,
    SpreadsheetStore, StorageError, TextStore, VacancyField, VacancyStorage,
};
use crate::vacancy::{top_by_salary, ListingRow, Ranked, SalaryRange, VacancyRecord};

/// On-disk encoding selected for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    Json,
    Csv,
    Spreadsheet,
    Text,
}

impl BackendKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Spreadsheet => "xlsx",
            Self::Text => "txt",
        }
    }

    pub fn default_path(self) -> PathBuf {
        match self {
            Self::Json => PathBuf::from("data/vacancies.json"),
            Self::Csv => PathBuf::from("data/vacancies.csv"),
            Self::Spreadsheet => PathBuf::from("data/vacancies.xlsx"),
            Self::Text => PathBuf::from("vacancies.txt"),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown storage backend '{0}', expected one of json, csv, xlsx, txt")]
pub struct UnknownBackend(pub String);

impl FromStr for BackendKind {
    type Err = UnknownBackend;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "xlsx" | "excel" | "spreadsheet" => Ok(Self::Spreadsheet),
            "txt" | "text" => Ok(Self::Text),
            _ => Err(UnknownBackend(value.to_string())),
        }
    }
}

/// A record read back from whichever backend is open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StoredVacancy {
    Structured(VacancyRecord),
    Flat(ListingRow),
}

impl StoredVacancy {
    pub fn id(&self) -> Option<i64> {
        match self {
            Self::Structured(record) => record.id,
            Self::Flat(row) => row.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Structured(record) => &record.title,
            Self::Flat(row) => &row.title,
        }
    }

    pub fn salary_label(&self) -> String {
        match self {
            Self::Structured(record) => record.salary_label(),
            Self::Flat(row) => row.salary.clone(),
        }
    }
}

impl Ranked for StoredVacancy {
    fn salary(&self) -> SalaryRange {
        match self {
            Self::Structured(record) => record.salary(),
            Self::Flat(row) => row.salary(),
        }
    }
}

/// Runtime-selected store. The JSON backend keeps structured records; the
/// other three keep flat rows, converted from records at this boundary.
#[derive(Debug)]
pub enum AnyStore {
    Json(JsonStore),
    Csv(CsvStore),
    Spreadsheet(SpreadsheetStore),
    Text(TextStore),
}

impl AnyStore {
    pub fn open(
        kind: BackendKind,
        path: impl Into<PathBuf>,
        sheet_name: &str,
    ) -> Result<Self, StorageError> {
        let path = path.into();
        let store = match kind {
            BackendKind::Json => Self::Json(JsonStore::open(path)?),
            BackendKind::Csv => Self::Csv(CsvStore::open(path)?),
            BackendKind::Spreadsheet => Self::Spreadsheet(SpreadsheetStore::open_with(
                path,
                SpreadsheetCodec::new(sheet_name),
            )?),
            BackendKind::Text => Self::Text(TextStore::open(path)?),
        };
        Ok(store)
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            Self::Json(_) => BackendKind::Json,
            Self::Csv(_) => BackendKind::Csv,
            Self::Spreadsheet(_) => BackendKind::Spreadsheet,
            Self::Text(_) => BackendKind::Text,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Json(store) => store.path(),
            Self::Csv(store) => store.path(),
            Self::Spreadsheet(store) => store.path(),
            Self::Text(store) => store.path(),
        }
    }

    pub fn add_vacancy(&mut self, record: &VacancyRecord) -> Result<(), StorageError> {
        match self {
            Self::Json(store) => store.add(record.clone()),
            Self::Csv(store) => store.add(ListingRow::from(record)),
            Self::Spreadsheet(store) => store.add(ListingRow::from(record)),
            Self::Text(store) => store.add(ListingRow::from(record)),
        }
    }

    pub fn list(&self) -> Vec<StoredVacancy> {
        match self {
            Self::Json(store) => structured(store.query(None)),
            Self::Csv(store) => flat(store.query(None)),
            Self::Spreadsheet(store) => flat(store.query(None)),
            Self::Text(store) => flat(store.query(None)),
        }
    }

    /// Exact-match lookup on one field, named as it appears on disk for the
    /// open backend.
    pub fn find(&self, field: &str, value: &str) -> Result<Vec<StoredVacancy>, CriteriaError> {
        let found = match self {
            Self::Json(store) => {
                let field: VacancyField = field.parse()?;
                let criteria = Criteria::new().with(field, field.value_from_str(value)?);
                structured(store.query(Some(&criteria)))
            }
            Self::Csv(store) => flat(store.query(Some(&listing_criteria(field, value)?))),
            Self::Spreadsheet(store) => flat(store.query(Some(&listing_criteria(field, value)?))),
            Self::Text(store) => flat(store.query(Some(&listing_criteria(field, value)?))),
        };
        Ok(found)
    }

    pub fn delete(&mut self, id: i64) -> Result<(), StorageError> {
        match self {
            Self::Json(store) => store.delete(id),
            Self::Csv(store) => store.delete(id),
            Self::Spreadsheet(store) => store.delete(id),
            Self::Text(store) => store.delete(id),
        }
    }

    pub fn top_by_salary(&self, limit: usize) -> Vec<StoredVacancy> {
        top_by_salary(&self.list(), limit)
    }
}

fn listing_criteria(field: &str, value: &str) -> Result<Criteria<ListingField>, CriteriaError> {
    let field: ListingField = field.parse()?;
    Ok(Criteria::new().with(field, field.value_from_str(value)?))
}

fn structured(records: Vec<VacancyRecord>) -> Vec<StoredVacancy> {
    records.into_iter().map(StoredVacancy::Structured).collect()
}

fn flat(rows: Vec<ListingRow>) -> Vec<StoredVacancy> {
    rows.into_iter().map(StoredVacancy::Flat).collect()
}
