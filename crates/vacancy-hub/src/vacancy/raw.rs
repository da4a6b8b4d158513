use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::normalizer::normalize_snippet;
use super::record::{VacancyRecord, CURRENCY_NOT_SPECIFIED};

/// Unnormalized listing as returned by the search API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawListing {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub alternate_url: String,
    #[serde(default)]
    pub salary: Option<Value>,
    #[serde(default)]
    pub employer: Option<RawEmployer>,
    #[serde(default)]
    pub snippet: Option<RawSnippet>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEmployer {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSnippet {
    #[serde(default)]
    pub requirement: Option<String>,
    #[serde(default)]
    pub responsibility: Option<String>,
}

/// Raised when a raw listing cannot be turned into a [`VacancyRecord`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("vacancy title must not be empty")]
    EmptyTitle,
    #[error("vacancy id {0} is not an integer")]
    InvalidId(String),
    #[error("salary must be an object or null, got {0}")]
    MalformedSalary(String),
    #[error("salary object is missing the '{0}' key")]
    MissingSalaryKey(&'static str),
    #[error("salary bound '{key}' must be a non-negative integer, got {value}")]
    InvalidSalaryBound { key: &'static str, value: String },
    #[error("salary currency must be text or null, got {0}")]
    InvalidCurrency(String),
}

const SALARY_KEYS: [&str; 3] = ["from", "to", "currency"];

struct NormalizedSalary {
    from: Option<u64>,
    to: Option<u64>,
    currency: String,
}

impl TryFrom<RawListing> for VacancyRecord {
    type Error = ValidationError;

    fn try_from(raw: RawListing) -> Result<Self, Self::Error> {
        VacancyRecord::from_raw(raw)
    }
}

impl VacancyRecord {
    /// Normalizes a raw listing. A missing or null salary means "unspecified";
    /// a salary object that is present but malformed is rejected.
    pub fn from_raw(raw: RawListing) -> Result<Self, ValidationError> {
        let title = raw.name.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }

        let id = raw.id.as_ref().map(parse_id).transpose()?;
        let salary = normalize_salary(raw.salary.as_ref())?;
        let employer = raw
            .employer
            .and_then(|employer| employer.name)
            .unwrap_or_default();
        let snippet = raw.snippet.unwrap_or_default();

        let mut record = VacancyRecord::new(title, raw.alternate_url.trim())
            .with_salary(salary.from, salary.to, salary.currency)
            .with_employer(employer.trim())
            .with_snippet(
                normalize_snippet(snippet.requirement.as_deref().unwrap_or_default()),
                normalize_snippet(snippet.responsibility.as_deref().unwrap_or_default()),
            );
        record.id = id;
        Ok(record)
    }
}

fn parse_id(value: &Value) -> Result<i64, ValidationError> {
    let parsed = match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| ValidationError::InvalidId(value.to_string()))
}

fn normalize_salary(value: Option<&Value>) -> Result<NormalizedSalary, ValidationError> {
    let object = match value {
        None | Some(Value::Null) => {
            return Ok(NormalizedSalary {
                from: None,
                to: None,
                currency: CURRENCY_NOT_SPECIFIED.to_string(),
            })
        }
        Some(Value::Object(object)) => object,
        Some(other) => return Err(ValidationError::MalformedSalary(other.to_string())),
    };

    if let Some(missing) = SALARY_KEYS.iter().find(|key| !object.contains_key(**key)) {
        return Err(ValidationError::MissingSalaryKey(*missing));
    }

    Ok(NormalizedSalary {
        from: salary_bound(object, "from")?,
        to: salary_bound(object, "to")?,
        currency: match object.get("currency").unwrap_or(&Value::Null) {
            Value::Null => CURRENCY_NOT_SPECIFIED.to_string(),
            Value::String(text) if text.trim().is_empty() => CURRENCY_NOT_SPECIFIED.to_string(),
            Value::String(text) => text.trim().to_string(),
            other => return Err(ValidationError::InvalidCurrency(other.to_string())),
        },
    })
}

fn salary_bound(
    object: &Map<String, Value>,
    key: &'static str,
) -> Result<Option<u64>, ValidationError> {
    match object.get(key).unwrap_or(&Value::Null) {
        Value::Null => Ok(None),
        Value::Number(number) => {
            number
                .as_u64()
                .map(Some)
                .ok_or_else(|| ValidationError::InvalidSalaryBound {
                    key,
                    value: number.to_string(),
                })
        }
        other => Err(ValidationError::InvalidSalaryBound {
            key,
            value: other.to_string(),
        }),
    }
}
