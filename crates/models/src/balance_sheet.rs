use serde::{Deserialize, Serialize};

use crate::values::YearValues;

/// Root of `balanceSheet.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSheetDocument {
    pub financial_position: FinancialPosition,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialPosition {
    pub assets: Assets,
    pub equity_and_liabilities: EquityAndLiabilities,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assets {
    pub non_current: NonCurrentAssets,
    pub current: CurrentAssets,
    pub total_assets: YearValues,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NonCurrentAssets {
    pub items: Vec<LineItem>,
    pub total_non_current_assets: YearValues,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAssets {
    pub items: Vec<LineItem>,
    pub total_current_assets: YearValues,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquityAndLiabilities {
    pub equity: Equity,
    pub liabilities: Liabilities,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Equity {
    pub items: Vec<LineItem>,
    pub total_equity: YearValues,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Liabilities {
    pub non_current: NonCurrentLiabilities,
    pub current: CurrentLiabilities,
    pub total_liabilities: YearValues,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NonCurrentLiabilities {
    pub items: Vec<LineItem>,
    pub total_non_current_liabilities: YearValues,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentLiabilities {
    pub items: Vec<LineItem>,
    pub total_current_liabilities: YearValues,
}

/// A named entry with one amount per year, optionally broken down into subitems.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subitems: Option<Vec<SubItem>>,
    #[serde(flatten)]
    pub values: YearValues,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubItem {
    pub name: String,
    #[serde(flatten)]
    pub values: YearValues,
}
