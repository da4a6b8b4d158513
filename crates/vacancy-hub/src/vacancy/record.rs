use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::salary::{Ranked, SalaryRange};

/// Currency written when the source listing did not name one.
pub const CURRENCY_NOT_SPECIFIED: &str = "not specified";

/// Normalized, storage-ready representation of one listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacancyRecord {
    pub id: Option<i64>,
    pub title: String,
    pub link: String,
    #[serde(
        default,
        serialize_with = "unspecified_as_zero",
        deserialize_with = "zero_as_unspecified"
    )]
    pub salary_from: Option<u64>,
    #[serde(
        default,
        serialize_with = "unspecified_as_zero",
        deserialize_with = "zero_as_unspecified"
    )]
    pub salary_to: Option<u64>,
    pub currency: String,
    #[serde(default)]
    pub employer: String,
    #[serde(default)]
    pub requirement: String,
    #[serde(default)]
    pub responsibility: String,
}

impl VacancyRecord {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            link: link.into(),
            salary_from: None,
            salary_to: None,
            currency: CURRENCY_NOT_SPECIFIED.to_string(),
            employer: String::new(),
            requirement: String::new(),
            responsibility: String::new(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_salary(
        mut self,
        salary_from: Option<u64>,
        salary_to: Option<u64>,
        currency: impl Into<String>,
    ) -> Self {
        let range = SalaryRange::new(salary_from, salary_to);
        self.salary_from = range.lower();
        self.salary_to = range.upper();
        self.currency = currency.into();
        self
    }

    pub fn with_employer(mut self, employer: impl Into<String>) -> Self {
        self.employer = employer.into();
        self
    }

    pub fn with_snippet(
        mut self,
        requirement: impl Into<String>,
        responsibility: impl Into<String>,
    ) -> Self {
        self.requirement = requirement.into();
        self.responsibility = responsibility.into();
        self
    }

    pub fn salary(&self) -> SalaryRange {
        SalaryRange::new(self.salary_from, self.salary_to)
    }

    pub fn salary_label(&self) -> String {
        self.salary().label(&self.currency)
    }
}

impl Ranked for VacancyRecord {
    fn salary(&self) -> SalaryRange {
        SalaryRange::new(self.salary_from, self.salary_to)
    }
}

impl fmt::Display for VacancyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let salary = self.salary();
        let lower = match salary.lower() {
            Some(amount) => amount.to_string(),
            None => "lower bound not specified".to_string(),
        };
        let upper = match salary.upper() {
            Some(amount) => amount.to_string(),
            None => "upper bound not specified".to_string(),
        };

        writeln!(f, "Title: {}", self.title)?;
        writeln!(f, "Salary: from {} up to {} {}", lower, upper, self.currency)?;
        writeln!(f, "Link: {}", self.link)?;
        writeln!(f, "Employer: {}", self.employer)?;
        writeln!(f, "Requirements: {}", self.requirement)?;
        writeln!(f, "Responsibilities: {}", self.responsibility)
    }
}

fn unspecified_as_zero<S>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u64(value.unwrap_or(0))
}

fn zero_as_unspecified<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<u64>::deserialize(deserializer)?;
    Ok(opt.filter(|amount| *amount > 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> VacancyRecord {
        VacancyRecord::new("Software Engineer", "https://example.com/vacancy")
            .with_salary(Some(5000), Some(10000), "USD")
            .with_employer("Example Company")
            .with_snippet(
                "Bachelor's degree in Computer Science",
                "Develop and maintain software applications",
            )
    }

    #[test]
    fn display_renders_all_fields() {
        let expected = "Title: Software Engineer\n\
Salary: from 5000 up to 10000 USD\n\
Link: https://example.com/vacancy\n\
Employer: Example Company\n\
Requirements: Bachelor's degree in Computer Science\n\
Responsibilities: Develop and maintain software applications\n";
        assert_eq!(sample().to_string(), expected);
    }

    #[test]
    fn display_names_missing_bounds() {
        let record = VacancyRecord::new("Intern", "https://example.com/intern");
        let rendered = record.to_string();
        assert!(rendered.contains(
            "Salary: from lower bound not specified up to upper bound not specified not specified"
        ));
    }

    #[test]
    fn unspecified_salary_is_written_as_zero() {
        let record = VacancyRecord::new("Intern", "https://example.com/intern").with_id(7);
        let value = serde_json::to_value(&record).expect("serialize");
        assert_eq!(value["salary_from"], json!(0));
        assert_eq!(value["salary_to"], json!(0));
        assert_eq!(value["id"], json!(7));

        let restored: VacancyRecord = serde_json::from_value(value).expect("deserialize");
        assert_eq!(restored.salary_from, None);
        assert_eq!(restored, record);
    }

    #[test]
    fn with_salary_drops_zero_bounds() {
        let record = VacancyRecord::new("Analyst", "https://example.com/a")
            .with_salary(Some(0), Some(80_000), "RUR");
        assert_eq!(record.salary_from, None);
        assert_eq!(record.salary_to, Some(80_000));
        assert_eq!(record.salary_label(), "-80000 RUR");
    }
}
