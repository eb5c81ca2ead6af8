use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Root of `employee_chart1.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeDocument {
    pub employees: Vec<CategoryBreakdown>,
    pub differently_abled_employees: Vec<CategoryBreakdown>,
    pub women_representation: Vec<WomenRepresentation>,
    /// Fiscal year label to rates, in document order.
    pub turnover_rate_permanent_employees: IndexMap<String, TurnoverRates>,
}

/// Headcount split by gender for one employee category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub male: Headcount,
    pub female: Headcount,
    pub others: Headcount,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Headcount {
    pub count: u64,
    pub pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WomenRepresentation {
    pub role: String,
    pub total: u64,
    pub female: Headcount,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurnoverRates {
    pub male: f64,
    pub female: f64,
    pub others: f64,
    pub total: f64,
}
