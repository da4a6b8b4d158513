use serde::{Deserialize, Serialize};

use super::record::VacancyRecord;
use super::salary::{Ranked, SalaryRange};

/// Flat row kept by the CSV, spreadsheet and delimited-text stores.
///
/// `salary` is an opaque pre-rendered label and `description` carries the
/// requirement snippet; neither is parsed back into structured fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRow {
    pub id: Option<i64>,
    pub title: String,
    pub link: String,
    pub salary: String,
    pub description: String,
}

impl From<&VacancyRecord> for ListingRow {
    fn from(record: &VacancyRecord) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            link: record.link.clone(),
            salary: record.salary_label(),
            description: record.requirement.clone(),
        }
    }
}

impl Ranked for ListingRow {
    fn salary(&self) -> SalaryRange {
        SalaryRange::parse_label(&self.salary)
    }
}
