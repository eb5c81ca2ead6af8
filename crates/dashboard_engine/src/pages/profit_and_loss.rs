use models::{Period, PeriodValues, ProfitAndLossDocument, ProfitAndLossStatement};
use serde::Serialize;

use crate::chart::{BarMode, ChartSpec};
use crate::error::Result;
use crate::page::{Page, PageKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAmountRow {
    #[serde(rename = "Category")]
    pub category: &'static str,
    #[serde(rename = "Year")]
    pub year: &'static str,
    #[serde(rename = "Amount")]
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfitRow {
    #[serde(rename = "Period")]
    pub period: &'static str,
    #[serde(rename = "Profit Before Tax")]
    pub profit_before_tax: f64,
    #[serde(rename = "Net Profit After Tax")]
    pub net_profit_after_tax: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxRow {
    #[serde(rename = "Type")]
    pub kind: &'static str,
    #[serde(rename = "Year")]
    pub year: &'static str,
    #[serde(rename = "Amount")]
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComprehensiveIncomeRow {
    #[serde(rename = "Component")]
    pub component: &'static str,
    #[serde(rename = "Year")]
    pub year: &'static str,
    #[serde(rename = "Amount")]
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpsRow {
    #[serde(rename = "Type")]
    pub kind: &'static str,
    #[serde(rename = "Year")]
    pub year: &'static str,
    #[serde(rename = "Value")]
    pub value: f64,
}

/// Each metric for the current then the prior period.
pub fn income_vs_expenses_rows(pl: &ProfitAndLossStatement) -> Vec<CategoryAmountRow> {
    let metrics = [
        ("Total Income", &pl.total_income),
        ("Total Expenses", &pl.total_expenses),
    ];
    metrics
        .into_iter()
        .flat_map(|(category, values)| {
            Period::ALL.map(|period| CategoryAmountRow {
                category,
                year: period.label(),
                amount: values.get(period),
            })
        })
        .collect()
}

pub fn profit_rows(pl: &ProfitAndLossStatement) -> Vec<ProfitRow> {
    Period::ALL
        .into_iter()
        .map(|period| ProfitRow {
            period: period.label(),
            profit_before_tax: pl.profit_before_tax.get(period),
            net_profit_after_tax: pl.net_profit_after_tax.get(period),
        })
        .collect()
}

/// Per period: current, deferred and total tax.
pub fn tax_rows(pl: &ProfitAndLossStatement) -> Vec<TaxRow> {
    let tax = &pl.tax_expense;
    let kinds: [(&'static str, &PeriodValues); 3] = [
        ("Current Tax", &tax.current_tax),
        ("Deferred Tax", &tax.deferred_tax),
        ("Total Tax", &tax.total_tax),
    ];
    Period::ALL
        .into_iter()
        .flat_map(|period| {
            kinds.map(|(kind, values)| TaxRow {
                kind,
                year: period.label(),
                amount: values.get(period),
            })
        })
        .collect()
}

pub fn comprehensive_income_rows(pl: &ProfitAndLossStatement) -> Vec<ComprehensiveIncomeRow> {
    let oci = &pl.other_comprehensive_income;
    let components: [(&'static str, &PeriodValues); 3] = [
        ("Not Reclassified", &oci.not_reclassified),
        ("Reclassified", &oci.reclassified),
        ("Total OCI", &oci.total_oci),
    ];
    Period::ALL
        .into_iter()
        .flat_map(|period| {
            components.map(|(component, values)| ComprehensiveIncomeRow {
                component,
                year: period.label(),
                amount: values.get(period),
            })
        })
        .collect()
}

pub fn eps_rows(pl: &ProfitAndLossStatement) -> Vec<EpsRow> {
    let kinds = [
        ("Basic EPS", &pl.earnings_per_share.basic),
        ("Diluted EPS", &pl.earnings_per_share.diluted),
    ];
    kinds
        .into_iter()
        .flat_map(|(kind, values)| {
            Period::ALL.map(|period| EpsRow {
                kind,
                year: period.label(),
                value: values.get(period),
            })
        })
        .collect()
}

pub fn page(doc: &ProfitAndLossDocument) -> Result<Page> {
    let pl = &doc.profit_and_loss_statement;
    let mut page = Page::new(PageKind::ProfitAndLoss);
    page.title("💲 Profit and Loss Charts")
        .subheader("📈 Profit & Loss Statement")
        .caption(format!(
            "Periods ending {} vs {}",
            pl.period_ends.prior_year, pl.period_ends.current_year
        ));

    page.chart(
        &ChartSpec::bar("Income vs Expenses")
            .x("Category")
            .y(&["Amount"])
            .color("Year")
            .barmode(BarMode::Group),
        &income_vs_expenses_rows(pl),
    )?;
    page.chart(
        &ChartSpec::bar("PBT & Net Profit Comparison")
            .x("Period")
            .y(&["Profit Before Tax", "Net Profit After Tax"])
            .barmode(BarMode::Group),
        &profit_rows(pl),
    )?;
    page.chart(
        &ChartSpec::bar("Tax Expense Breakdown")
            .x("Type")
            .y(&["Amount"])
            .color("Year")
            .barmode(BarMode::Group),
        &tax_rows(pl),
    )?;
    page.chart(
        &ChartSpec::bar("Other Comprehensive Income")
            .x("Component")
            .y(&["Amount"])
            .color("Year")
            .barmode(BarMode::Stack),
        &comprehensive_income_rows(pl),
    )?;
    page.chart(
        &ChartSpec::bar("Earnings Per Share")
            .x("Type")
            .y(&["Value"])
            .color("Year")
            .barmode(BarMode::Group),
        &eps_rows(pl),
    )?;

    Ok(page)
}
