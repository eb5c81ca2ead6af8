use serde::{Deserialize, Serialize};

use crate::values::YearValues;

/// Root of `currentInvestments.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentsDocument {
    pub current_investments: CurrentInvestments,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentInvestments {
    pub measured_at_amortized_cost: MeasurementBasis,
    pub measured_at_fvtpl: MeasurementBasis,
    pub totals: InvestmentTotals,
    pub other_disclosures: OtherDisclosures,
}

/// Instruments held under one measurement basis, split by listing status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeasurementBasis {
    #[serde(default)]
    pub quoted: Vec<Instrument>,
    #[serde(default)]
    pub unquoted: Vec<Instrument>,
}

impl MeasurementBasis {
    pub fn by_listing(&self) -> [(Listing, &[Instrument]); 2] {
        [
            (Listing::Quoted, self.quoted.as_slice()),
            (Listing::Unquoted, self.unquoted.as_slice()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Quoted,
    Unquoted,
}

impl Listing {
    pub fn label(self) -> &'static str {
        match self {
            Listing::Quoted => "Quoted",
            Listing::Unquoted => "Unquoted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub instrument: String,
    #[serde(flatten)]
    pub values: YearValues,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentTotals {
    pub total_current_investments: YearValues,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtherDisclosures {
    pub aggregate_amount_quoted_investments: YearValues,
    pub market_value_quoted_investments: YearValues,
    pub aggregate_amount_unquoted_investments: YearValues,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_listing_defaults_to_empty() {
        let basis: MeasurementBasis = serde_json::from_value(json!({
            "quoted": [{"instrument": "Mutual Funds", "2023": 10, "2024": 12}]
        }))
        .unwrap();

        assert_eq!(basis.quoted.len(), 1);
        assert!(basis.unquoted.is_empty());
        assert_eq!(basis.quoted[0].values.get("2024"), Some(12.0));

        let labels: Vec<&str> = basis.by_listing().iter().map(|(l, _)| l.label()).collect();
        assert_eq!(labels, ["Quoted", "Unquoted"]);
    }
}
