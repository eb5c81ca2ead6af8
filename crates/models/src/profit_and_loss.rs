use serde::{Deserialize, Serialize};

use crate::values::PeriodValues;

/// Root of `profitAndLoss.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitAndLossDocument {
    pub profit_and_loss_statement: ProfitAndLossStatement,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitAndLossStatement {
    pub period_ends: PeriodEnds,
    pub total_income: PeriodValues,
    pub total_expenses: PeriodValues,
    pub profit_before_tax: PeriodValues,
    pub net_profit_after_tax: PeriodValues,
    pub tax_expense: TaxExpense,
    pub other_comprehensive_income: OtherComprehensiveIncome,
    pub earnings_per_share: EarningsPerShare,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodEnds {
    pub current_year: String,
    pub prior_year: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxExpense {
    pub current_tax: PeriodValues,
    pub deferred_tax: PeriodValues,
    pub total_tax: PeriodValues,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtherComprehensiveIncome {
    pub not_reclassified: PeriodValues,
    pub reclassified: PeriodValues,
    pub total_oci: PeriodValues,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EarningsPerShare {
    pub basic: PeriodValues,
    pub diluted: PeriodValues,
}
