//! Normalized vacancy records and the salary comparison rules used for ranking.

mod listing;
mod normalizer;
mod raw;
mod record;
mod salary;

pub use listing::ListingRow;
pub use raw::{RawEmployer, RawListing, RawSnippet, ValidationError};
pub use record::{VacancyRecord, CURRENCY_NOT_SPECIFIED};
pub use salary::{top_by_salary, Ranked, SalaryOrdering, SalaryRange};
