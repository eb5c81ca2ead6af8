use models::{CategoryBreakdown, EmployeeDocument, IndexMap, TurnoverRates, WomenRepresentation};
use serde::Serialize;

use crate::chart::{BarMode, ChartSpec};
use crate::error::Result;
use crate::page::{Page, PageKind};

/// A category breakdown with the gender sub-records spread into dotted columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRow {
    pub category: String,
    #[serde(rename = "male.count")]
    pub male_count: u64,
    #[serde(rename = "male.pct")]
    pub male_pct: f64,
    #[serde(rename = "female.count")]
    pub female_count: u64,
    #[serde(rename = "female.pct")]
    pub female_pct: f64,
    #[serde(rename = "others.count")]
    pub others_count: u64,
    #[serde(rename = "others.pct")]
    pub others_pct: f64,
}

impl From<&CategoryBreakdown> for CategoryRow {
    fn from(b: &CategoryBreakdown) -> Self {
        Self {
            category: b.category.clone(),
            male_count: b.male.count,
            male_pct: b.male.pct,
            female_count: b.female.count,
            female_pct: b.female.pct,
            others_count: b.others.count,
            others_pct: b.others.pct,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WomenRow {
    pub role: String,
    pub total: u64,
    #[serde(rename = "female.count")]
    pub female_count: u64,
    #[serde(rename = "female.pct")]
    pub female_pct: f64,
}

impl From<&WomenRepresentation> for WomenRow {
    fn from(w: &WomenRepresentation) -> Self {
        Self {
            role: w.role.clone(),
            total: w.total,
            female_count: w.female.count,
            female_pct: w.female.pct,
        }
    }
}

/// One fiscal year of the turnover table, with the year label as a column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnoverRow {
    #[serde(rename = "FY")]
    pub fy: String,
    pub male: f64,
    pub female: f64,
    pub others: f64,
    pub total: f64,
}

pub fn category_rows(breakdowns: &[CategoryBreakdown]) -> Vec<CategoryRow> {
    breakdowns.iter().map(CategoryRow::from).collect()
}

pub fn women_rows(doc: &EmployeeDocument) -> Vec<WomenRow> {
    doc.women_representation.iter().map(WomenRow::from).collect()
}

/// Turns the fiscal-year mapping into rows, keeping document order.
pub fn turnover_rows(turnover: &IndexMap<String, TurnoverRates>) -> Vec<TurnoverRow> {
    turnover
        .iter()
        .map(|(fy, rates)| TurnoverRow {
            fy: fy.clone(),
            male: rates.male,
            female: rates.female,
            others: rates.others,
            total: rates.total,
        })
        .collect()
}

pub fn page(doc: &EmployeeDocument) -> Result<Page> {
    let mut page = Page::new(PageKind::Employees);
    page.title("👥 Employee Charts Dashboard");

    page.subheader("Employee Demographics");
    page.chart(
        &ChartSpec::bar("Gender % by Employee Category")
            .x("category")
            .y(&["male.pct", "female.pct", "others.pct"])
            .label("value", "%")
            .label("category", "Category")
            .barmode(BarMode::Stack)
            .hover(&["male.count", "female.count", "others.count"]),
        &category_rows(&doc.employees),
    )?;

    page.subheader("Employees: Differently-Abled");
    page.chart(
        &ChartSpec::bar("Differently‑abled Employees by Category")
            .x("category")
            .y(&["male.count", "female.count", "others.count"])
            .barmode(BarMode::Group)
            .hover(&["male.pct", "female.pct", "others.pct"]),
        &category_rows(&doc.differently_abled_employees),
    )?;

    page.subheader("Women Representation");
    page.chart(
        &ChartSpec::pie("Women % in Key Roles")
            .names("role")
            .values("female.pct")
            .hole(0.4)
            .hover(&["female.count", "total"]),
        &women_rows(doc),
    )?;

    page.subheader("Employee Turnover line chart");
    page.chart(
        &ChartSpec::line("Turnover Rate (Permanent Employees)")
            .x("FY")
            .y(&["male", "female", "others", "total"])
            .markers(),
        &turnover_rows(&doc.turnover_rate_permanent_employees),
    )?;

    Ok(page)
}
