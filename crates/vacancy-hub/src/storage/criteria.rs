use std::fmt;
use std::str::FromStr;

use super::StoredRecord;
use crate::vacancy::{ListingRow, VacancyRecord};

/// Scalar compared by exact equality. `Int(1)` never matches `Text("1")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Int(i64),
    Text(String),
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(value) => write!(f, "{value}"),
            FieldValue::Text(value) => write!(f, "{value:?}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CriteriaError {
    #[error("unknown field '{0}'")]
    UnknownField(String),
    #[error("field '{field}' expects an integer, got '{value}'")]
    NotAnInteger { field: &'static str, value: String },
}

/// Ordered list of `(field, expected value)` pairs joined by logical AND.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criteria<F> {
    terms: Vec<(F, FieldValue)>,
}

impl<F> Default for Criteria<F> {
    fn default() -> Self {
        Self { terms: Vec::new() }
    }
}

impl<F: Copy> Criteria<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: F, value: impl Into<FieldValue>) -> Self {
        self.terms.push((field, value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// True when every field is present on `record` and equals its expected
    /// value. An empty criteria list matches everything.
    pub fn matches<R>(&self, record: &R) -> bool
    where
        R: StoredRecord<Field = F>,
    {
        self.terms
            .iter()
            .all(|(field, expected)| record.field(*field).as_ref() == Some(expected))
    }
}

/// Fields of a structured [`VacancyRecord`], named as on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VacancyField {
    Id,
    Title,
    Link,
    SalaryFrom,
    SalaryTo,
    Currency,
    Employer,
    Requirement,
    Responsibility,
}

impl VacancyField {
    pub const ALL: [Self; 9] = [
        Self::Id,
        Self::Title,
        Self::Link,
        Self::SalaryFrom,
        Self::SalaryTo,
        Self::Currency,
        Self::Employer,
        Self::Requirement,
        Self::Responsibility,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Link => "link",
            Self::SalaryFrom => "salary_from",
            Self::SalaryTo => "salary_to",
            Self::Currency => "currency",
            Self::Employer => "employer",
            Self::Requirement => "requirement",
            Self::Responsibility => "responsibility",
        }
    }

    const fn is_numeric(self) -> bool {
        matches!(self, Self::Id | Self::SalaryFrom | Self::SalaryTo)
    }

    /// Builds a value of the type this field holds from user input.
    pub fn value_from_str(self, raw: &str) -> Result<FieldValue, CriteriaError> {
        typed_value(self.name(), self.is_numeric(), raw)
    }
}

impl FromStr for VacancyField {
    type Err = CriteriaError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == value.trim())
            .ok_or_else(|| CriteriaError::UnknownField(value.to_string()))
    }
}

/// Fields of a flat [`ListingRow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingField {
    Id,
    Title,
    Link,
    Salary,
    Description,
}

impl ListingField {
    pub const ALL: [Self; 5] = [
        Self::Id,
        Self::Title,
        Self::Link,
        Self::Salary,
        Self::Description,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Link => "link",
            Self::Salary => "salary",
            Self::Description => "description",
        }
    }

    pub fn value_from_str(self, raw: &str) -> Result<FieldValue, CriteriaError> {
        typed_value(self.name(), matches!(self, Self::Id), raw)
    }
}

impl FromStr for ListingField {
    type Err = CriteriaError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == value.trim())
            .ok_or_else(|| CriteriaError::UnknownField(value.to_string()))
    }
}

fn typed_value(field: &'static str, numeric: bool, raw: &str) -> Result<FieldValue, CriteriaError> {
    if !numeric {
        return Ok(FieldValue::Text(raw.to_string()));
    }

    raw.trim()
        .parse::<i64>()
        .map(FieldValue::Int)
        .map_err(|_| CriteriaError::NotAnInteger {
            field,
            value: raw.to_string(),
        })
}

impl StoredRecord for VacancyRecord {
    type Field = VacancyField;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn field(&self, field: VacancyField) -> Option<FieldValue> {
        // Unspecified salary bounds are stored as 0, so they compare as 0.
        let amount = |value: Option<u64>| i64::try_from(value.unwrap_or(0)).ok().map(FieldValue::Int);

        match field {
            VacancyField::Id => self.id.map(FieldValue::Int),
            VacancyField::Title => Some(self.title.as_str().into()),
            VacancyField::Link => Some(self.link.as_str().into()),
            VacancyField::SalaryFrom => amount(self.salary_from),
            VacancyField::SalaryTo => amount(self.salary_to),
            VacancyField::Currency => Some(self.currency.as_str().into()),
            VacancyField::Employer => Some(self.employer.as_str().into()),
            VacancyField::Requirement => Some(self.requirement.as_str().into()),
            VacancyField::Responsibility => Some(self.responsibility.as_str().into()),
        }
    }
}

impl StoredRecord for ListingRow {
    type Field = ListingField;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn field(&self, field: ListingField) -> Option<FieldValue> {
        match field {
            ListingField::Id => self.id.map(FieldValue::Int),
            ListingField::Title => Some(self.title.as_str().into()),
            ListingField::Link => Some(self.link.as_str().into()),
            ListingField::Salary => Some(self.salary.as_str().into()),
            ListingField::Description => Some(self.description.as_str().into()),
        }
    }
}
