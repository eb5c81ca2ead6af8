use models::{CurrentInvestments, InvestmentsDocument, MeasurementBasis, ReportingYears};
use serde::Serialize;

use crate::chart::{BarMode, ChartSpec};
use crate::error::Result;
use crate::flatten::require_year;
use crate::page::{Page, PageKind};
use crate::pages::short_year;

const AMORTIZED_COST: &str = "Amortized Cost";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoldingRow {
    #[serde(rename = "Level 1")]
    pub basis: &'static str,
    #[serde(rename = "Level 2")]
    pub listing: &'static str,
    #[serde(rename = "Instrument")]
    pub instrument: String,
    #[serde(rename = "Value")]
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    #[serde(rename = "Instrument")]
    pub instrument: String,
    #[serde(rename = "Category")]
    pub category: &'static str,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Amount")]
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstrumentYearRow {
    #[serde(rename = "Instrument")]
    pub instrument: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Amount")]
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearAmountRow {
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Amount")]
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisclosureRow {
    #[serde(rename = "Metric")]
    pub metric: &'static str,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Amount")]
    pub amount: f64,
}

fn section_name(basis: &str, listing: &str) -> String {
    format!("{} / {}", basis, listing)
}

/// Amortized-cost holdings as a three-level path: basis, listing, instrument.
pub fn amortized_cost_rows(ci: &CurrentInvestments, year: &str) -> Result<Vec<HoldingRow>> {
    let mut rows = Vec::new();
    for (listing, instruments) in ci.measured_at_amortized_cost.by_listing() {
        let section = section_name(AMORTIZED_COST, listing.label());
        for itm in instruments {
            rows.push(HoldingRow {
                basis: AMORTIZED_COST,
                listing: listing.label(),
                instrument: itm.instrument.clone(),
                value: require_year(&itm.values, year, &section, &itm.instrument)?,
            });
        }
    }
    Ok(rows)
}

/// Two rows per amortized-cost instrument, prior year first.
pub fn amortized_cost_comparison_rows(
    ci: &CurrentInvestments,
    years: &ReportingYears,
) -> Result<Vec<ComparisonRow>> {
    let mut rows = Vec::new();
    for (listing, instruments) in ci.measured_at_amortized_cost.by_listing() {
        let section = section_name(AMORTIZED_COST, listing.label());
        for itm in instruments {
            for year in years.both() {
                rows.push(ComparisonRow {
                    instrument: itm.instrument.clone(),
                    category: listing.label(),
                    year: year.to_string(),
                    amount: require_year(&itm.values, year, &section, &itm.instrument)?,
                });
            }
        }
    }
    Ok(rows)
}

/// Quoted FVTPL instruments melted to long form: every instrument for the prior
/// year, then every instrument for the current year.
pub fn fvtpl_rows(basis: &MeasurementBasis, years: &ReportingYears) -> Result<Vec<InstrumentYearRow>> {
    let section = section_name("FVTPL", "Quoted");
    let mut rows = Vec::with_capacity(basis.quoted.len() * 2);
    for year in years.both() {
        for itm in &basis.quoted {
            rows.push(InstrumentYearRow {
                instrument: itm.instrument.clone(),
                year: year.to_string(),
                amount: require_year(&itm.values, year, &section, &itm.instrument)?,
            });
        }
    }
    Ok(rows)
}

pub fn totals_rows(ci: &CurrentInvestments, years: &ReportingYears) -> Result<Vec<YearAmountRow>> {
    years
        .both()
        .into_iter()
        .map(|year| -> Result<YearAmountRow> {
            Ok(YearAmountRow {
                year: year.to_string(),
                amount: require_year(
                    &ci.totals.total_current_investments,
                    year,
                    "Totals",
                    "total_current_investments",
                )?,
            })
        })
        .collect()
}

pub fn other_disclosure_rows(ci: &CurrentInvestments, years: &ReportingYears) -> Result<Vec<DisclosureRow>> {
    let od = &ci.other_disclosures;
    let metrics = [
        ("aggregate_amount_quoted_investments", "Agg. Quoted", &od.aggregate_amount_quoted_investments),
        ("market_value_quoted_investments", "Market Value Quoted", &od.market_value_quoted_investments),
        ("aggregate_amount_unquoted_investments", "Agg. Unquoted", &od.aggregate_amount_unquoted_investments),
    ];

    let mut rows = Vec::with_capacity(metrics.len() * 2);
    for (key, metric, values) in metrics {
        for year in years.both() {
            rows.push(DisclosureRow {
                metric,
                year: year.to_string(),
                amount: require_year(values, year, "Other disclosures", key)?,
            });
        }
    }
    Ok(rows)
}

pub fn page(doc: &InvestmentsDocument, years: &ReportingYears) -> Result<Page> {
    let ci = &doc.current_investments;
    let current = years.current_year.as_str();
    let versus = format!("{} vs {}", short_year(&years.prior_year), short_year(current));

    let mut page = Page::new(PageKind::CurrentInvestments);
    page.title("💸 Current Investments")
        .subheader("💼 Current Investments");

    page.chart(
        &ChartSpec::sunburst(format!("Amortized Cost Investments ({})", current))
            .path(&["Level 1", "Level 2", "Instrument"])
            .values("Value")
            .hover_formatted("Value", ",d"),
        &amortized_cost_rows(ci, current)?,
    )?;
    page.divider();

    page.chart(
        &ChartSpec::bar(format!("Amortized Cost: Quoted vs Unquoted ({})", versus))
            .x("Instrument")
            .y(&["Amount"])
            .color("Year")
            .facet_col("Category")
            .barmode(BarMode::Group),
        &amortized_cost_comparison_rows(ci, years)?,
    )?;
    page.divider();

    page.chart(
        &ChartSpec::bar(format!("FVTPL Investments ({})", versus))
            .x("Instrument")
            .y(&["Amount"])
            .color("Year")
            .barmode(BarMode::Group),
        &fvtpl_rows(&ci.measured_at_fvtpl, years)?,
    )?;
    page.divider();

    page.chart(
        &ChartSpec::bar("Total Current Investments")
            .x("Year")
            .y(&["Amount"])
            .color("Year")
            .text("Amount")
            .label("Amount", "₹ Crores")
            .text_position("outside")
            .text_template("%{text:,}"),
        &totals_rows(ci, years)?,
    )?;
    page.divider();

    page.chart(
        &ChartSpec::bar("Other Disclosures (₹ Crores)")
            .x("Metric")
            .y(&["Amount"])
            .color("Year")
            .barmode(BarMode::Group),
        &other_disclosure_rows(ci, years)?,
    )?;

    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use serde_json::json;

    fn document() -> InvestmentsDocument {
        serde_json::from_value(json!({
            "current_investments": {
                "measured_at_amortized_cost": {
                    "quoted": [
                        {"instrument": "Government securities", "2023": 100, "2024": 120}
                    ],
                    "unquoted": [
                        {"instrument": "Certificates of deposit", "2023": 400, "2024": 350},
                        {"instrument": "Commercial paper", "2023": 80, "2024": 95}
                    ]
                },
                "measured_at_fvtpl": {
                    "quoted": [
                        {"instrument": "Mutual Funds", "2023": 2500, "2024": 3100}
                    ]
                },
                "totals": {
                    "total_current_investments": {"2023": 3080, "2024": 3665}
                },
                "other_disclosures": {
                    "aggregate_amount_quoted_investments": {"2023": 2600, "2024": 3220},
                    "market_value_quoted_investments": {"2023": 2610, "2024": 3235},
                    "aggregate_amount_unquoted_investments": {"2023": 480, "2024": 445}
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_amortized_cost_rows_quoted_first() {
        let doc = document();
        let rows = amortized_cost_rows(&doc.current_investments, "2024").unwrap();

        let summary: Vec<(&str, &str, f64)> = rows
            .iter()
            .map(|r| (r.listing, r.instrument.as_str(), r.value))
            .collect();
        assert_eq!(
            summary,
            [
                ("Quoted", "Government securities", 120.0),
                ("Unquoted", "Certificates of deposit", 350.0),
                ("Unquoted", "Commercial paper", 95.0),
            ]
        );
        assert!(rows.iter().all(|r| r.basis == "Amortized Cost"));
    }

    #[test]
    fn test_comparison_rows_two_per_instrument() {
        let doc = document();
        let rows =
            amortized_cost_comparison_rows(&doc.current_investments, &ReportingYears::default()).unwrap();

        assert_eq!(rows.len(), 6);
        assert_eq!((rows[0].year.as_str(), rows[0].amount), ("2023", 100.0));
        assert_eq!((rows[1].year.as_str(), rows[1].amount), ("2024", 120.0));
        assert_eq!(rows[2].category, "Unquoted");
    }

    #[test]
    fn test_fvtpl_rows_melted_by_year() {
        let basis: MeasurementBasis = serde_json::from_value(json!({
            "quoted": [
                {"instrument": "Mutual Funds", "2023": 1, "2024": 2},
                {"instrument": "ETFs", "2023": 3, "2024": 4}
            ]
        }))
        .unwrap();

        let rows = fvtpl_rows(&basis, &ReportingYears::default()).unwrap();
        let summary: Vec<(&str, &str)> = rows
            .iter()
            .map(|r| (r.instrument.as_str(), r.year.as_str()))
            .collect();

        assert_eq!(
            summary,
            [("Mutual Funds", "2023"), ("ETFs", "2023"), ("Mutual Funds", "2024"), ("ETFs", "2024")]
        );
    }

    #[test]
    fn test_empty_fvtpl_yields_no_rows() {
        let rows = fvtpl_rows(&MeasurementBasis::default(), &ReportingYears::default()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_other_disclosures_labels() {
        let doc = document();
        let rows = other_disclosure_rows(&doc.current_investments, &ReportingYears::default()).unwrap();

        let metrics: Vec<&str> = rows.iter().step_by(2).map(|r| r.metric).collect();
        assert_eq!(metrics, ["Agg. Quoted", "Market Value Quoted", "Agg. Unquoted"]);
        assert_eq!(rows[3].amount, 3235.0);
    }

    #[test]
    fn test_missing_instrument_year_names_the_section() {
        let mut doc = document();
        doc.current_investments.measured_at_amortized_cost.unquoted[1]
            .values
            .0
            .remove("2024");

        let err = amortized_cost_rows(&doc.current_investments, "2024").unwrap_err();

        match err {
            EngineError::DocumentIncomplete { section, item, .. } => {
                assert_eq!(section, "Amortized Cost / Unquoted");
                assert_eq!(item, "Commercial paper");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_page_titles() {
        let page = page(&document(), &ReportingYears::default()).unwrap();

        let titles: Vec<String> = page
            .figures()
            .map(|f| f.layout["title"]["text"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            titles,
            [
                "Amortized Cost Investments (2024)",
                "Amortized Cost: Quoted vs Unquoted (’23 vs ’24)",
                "FVTPL Investments (’23 vs ’24)",
                "Total Current Investments",
                "Other Disclosures (₹ Crores)",
            ]
        );
        let comparison = page.figures().nth(1).unwrap();
        assert_eq!(comparison.layout["annotations"][0]["text"], "Category=Quoted");
    }
}
