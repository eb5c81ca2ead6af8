use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Amounts keyed by reporting year (`"2023"`, `"2024"`, ...).
///
/// Kept as raw JSON values so that a line item can carry extra keys (notes,
/// references) next to its yearly amounts without failing the whole document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct YearValues(pub BTreeMap<String, Value>);

/// Result of looking up one year in a [`YearValues`] record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum YearValue {
    Number(f64),
    /// Key absent or explicitly `null`.
    Missing,
    NonNumeric,
}

impl YearValues {
    pub fn lookup(&self, year: &str) -> YearValue {
        match self.0.get(year) {
            None | Some(Value::Null) => YearValue::Missing,
            Some(Value::Number(n)) => n
                .as_f64()
                .map(YearValue::Number)
                .unwrap_or(YearValue::NonNumeric),
            Some(_) => YearValue::NonNumeric,
        }
    }

    pub fn get(&self, year: &str) -> Option<f64> {
        match self.lookup(year) {
            YearValue::Number(v) => Some(v),
            _ => None,
        }
    }
}

impl<const N: usize> From<[(&str, f64); N]> for YearValues {
    fn from(pairs: [(&str, f64); N]) -> Self {
        YearValues(
            pairs
                .into_iter()
                .map(|(year, v)| (year.to_string(), Value::from(v)))
                .collect(),
        )
    }
}

/// A metric reported for the current and the prior period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodValues {
    pub current: f64,
    pub prior: f64,
}

impl PeriodValues {
    pub fn get(&self, period: Period) -> f64 {
        match period {
            Period::Current => self.current,
            Period::Prior => self.prior,
        }
    }
}

/// Reporting period of a profit & loss figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Current,
    Prior,
}

impl Period {
    /// Display order used by every profit & loss chart.
    pub const ALL: [Period; 2] = [Period::Current, Period::Prior];

    pub fn label(self) -> &'static str {
        match self {
            Period::Current => "Current",
            Period::Prior => "Prior",
        }
    }
}
