use std::cmp::Ordering;

/// Label written for vacancies that carry no salary bounds at all.
const UNSPECIFIED_LABEL: &str = "not specified";

/// Outcome of comparing two salary ranges.
///
/// Two ranges without any bounds are `Incomparable` rather than `Equal`, so
/// equality built on top of this is not reflexive for unspecified salaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalaryOrdering {
    Less,
    Equal,
    Greater,
    Incomparable,
}

/// Comparable view over the `(from, to)` bounds of a vacancy salary.
///
/// A zero bound is folded into "absent" on construction; the two are stored
/// the same way on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct SalaryRange {
    lower: Option<u64>,
    upper: Option<u64>,
}

impl SalaryRange {
    pub const UNSPECIFIED: Self = Self {
        lower: None,
        upper: None,
    };

    pub fn new(lower: Option<u64>, upper: Option<u64>) -> Self {
        Self {
            lower: lower.filter(|amount| *amount > 0),
            upper: upper.filter(|amount| *amount > 0),
        }
    }

    pub fn lower(&self) -> Option<u64> {
        self.lower
    }

    pub fn upper(&self) -> Option<u64> {
        self.upper
    }

    pub fn is_specified(&self) -> bool {
        self.lower.is_some() || self.upper.is_some()
    }

    pub fn compare(&self, other: &Self) -> SalaryOrdering {
        match (self.is_specified(), other.is_specified()) {
            (false, false) => SalaryOrdering::Incomparable,
            (false, true) => SalaryOrdering::Less,
            (true, false) => SalaryOrdering::Greater,
            (true, true) => match self.bounds().cmp(&other.bounds()) {
                Ordering::Less => SalaryOrdering::Less,
                Ordering::Equal => SalaryOrdering::Equal,
                Ordering::Greater => SalaryOrdering::Greater,
            },
        }
    }

    /// Total order used for sorting: incomparable pairs keep their relative
    /// position under a stable sort.
    pub(crate) fn rank_cmp(&self, other: &Self) -> Ordering {
        match self.compare(other) {
            SalaryOrdering::Less => Ordering::Less,
            SalaryOrdering::Greater => Ordering::Greater,
            SalaryOrdering::Equal | SalaryOrdering::Incomparable => Ordering::Equal,
        }
    }

    fn bounds(&self) -> (u64, u64) {
        (self.lower.unwrap_or(0), self.upper.unwrap_or(0))
    }

    /// Flat text rendering stored by the CSV, spreadsheet and text backends,
    /// e.g. `100000-200000 RUR` or `-150000 USD` for an upper bound only.
    pub fn label(&self, currency: &str) -> String {
        if !self.is_specified() {
            return UNSPECIFIED_LABEL.to_string();
        }

        let lower = self.lower.map(|amount| amount.to_string()).unwrap_or_default();
        let upper = self.upper.map(|amount| amount.to_string()).unwrap_or_default();
        let currency = currency.trim();
        if currency.is_empty() {
            return format!("{lower}-{upper}");
        }
        format!("{lower}-{upper} {currency}")
    }

    /// Reads a label produced by [`SalaryRange::label`]. Any other text is
    /// treated as an unspecified salary.
    pub fn parse_label(label: &str) -> Self {
        let label = label.trim();
        let bounds = label.split_once(' ').map_or(label, |(bounds, _currency)| bounds);
        let Some((lower, upper)) = bounds.split_once('-') else {
            return Self::UNSPECIFIED;
        };

        match (parse_bound(lower), parse_bound(upper)) {
            (Some(lower), Some(upper)) => Self::new(lower, upper),
            _ => Self::UNSPECIFIED,
        }
    }
}

// Outer `None` means the text is not a bound at all.
fn parse_bound(value: &str) -> Option<Option<u64>> {
    if value.is_empty() {
        return Some(None);
    }
    value.parse::<u64>().ok().map(Some)
}

impl PartialEq for SalaryRange {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == SalaryOrdering::Equal
    }
}

impl PartialOrd for SalaryRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.compare(other) {
            SalaryOrdering::Less => Some(Ordering::Less),
            SalaryOrdering::Equal => Some(Ordering::Equal),
            SalaryOrdering::Greater => Some(Ordering::Greater),
            SalaryOrdering::Incomparable => None,
        }
    }
}

/// Anything that can be ranked by salary.
pub trait Ranked {
    fn salary(&self) -> SalaryRange;
}

/// Returns at most `limit` records, highest salary first. Records without a
/// salary sink to the bottom and keep their storage order.
pub fn top_by_salary<R>(records: &[R], limit: usize) -> Vec<R>
where
    R: Ranked + Clone,
{
    let mut ranked = records.to_vec();
    ranked.sort_by(|a, b| b.salary().rank_cmp(&a.salary()));
    ranked.truncate(limit);
    ranked
}
