use models::{BalanceSheetDocument, ReportingYears};
use serde::Serialize;

use crate::chart::{BarMode, ChartSpec};
use crate::error::Result;
use crate::flatten::{
    flatten_line_items, require_year, LineItemLayout, LineItemRow, MissingValue, SectionTotal,
    SubitemParent,
};
use crate::page::{Page, PageKind};

const NON_CURRENT_ASSETS: &str = "Non-current Assets";
const CURRENT_ASSETS: &str = "Current Assets";
const NON_CURRENT_LIABILITIES: &str = "Non-current Liabilities";
const CURRENT_LIABILITIES: &str = "Current Liabilities";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetTotalRow {
    #[serde(rename = "Category")]
    pub category: &'static str,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Value")]
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositionRow {
    #[serde(rename = "Component")]
    pub component: &'static str,
    #[serde(rename = "Amount")]
    pub amount: f64,
}

pub fn non_current_assets_rows(doc: &BalanceSheetDocument, year: &str) -> Result<Vec<LineItemRow>> {
    let section = &doc.financial_position.assets.non_current;
    let layout = LineItemLayout {
        section: NON_CURRENT_ASSETS,
        default_parent: NON_CURRENT_ASSETS,
        subitem_parent: SubitemParent::ItemName,
        missing_item_value: MissingValue::Fail,
    };
    let total = SectionTotal {
        label: NON_CURRENT_ASSETS,
        values: &section.total_non_current_assets,
    };
    flatten_line_items(&section.items, &layout, Some(total), year)
}

/// Same shape as the non-current flattener, except that a plain item with no
/// amount for `year` counts as zero.
pub fn current_assets_rows(doc: &BalanceSheetDocument, year: &str) -> Result<Vec<LineItemRow>> {
    let section = &doc.financial_position.assets.current;
    let layout = LineItemLayout {
        section: CURRENT_ASSETS,
        default_parent: CURRENT_ASSETS,
        subitem_parent: SubitemParent::ItemName,
        missing_item_value: MissingValue::Zero,
    };
    let total = SectionTotal {
        label: CURRENT_ASSETS,
        values: &section.total_current_assets,
    };
    flatten_line_items(&section.items, &layout, Some(total), year)
}

pub fn asset_totals_rows(doc: &BalanceSheetDocument, years: &ReportingYears) -> Result<Vec<AssetTotalRow>> {
    let assets = &doc.financial_position.assets;
    let sections = [
        ("Non-current", &assets.non_current.total_non_current_assets),
        ("Current", &assets.current.total_current_assets),
    ];

    let mut rows = Vec::with_capacity(4);
    for (category, totals) in sections {
        for year in years.both() {
            rows.push(AssetTotalRow {
                category,
                year: year.to_string(),
                value: require_year(totals, year, "Assets", &format!("Total {} Assets", category))?,
            });
        }
    }
    Ok(rows)
}

pub fn equity_rows(doc: &BalanceSheetDocument, year: &str) -> Result<Vec<LineItemRow>> {
    let equity = &doc.financial_position.equity_and_liabilities.equity;
    let layout = LineItemLayout {
        section: "Equity",
        default_parent: "",
        subitem_parent: SubitemParent::ItemName,
        missing_item_value: MissingValue::Fail,
    };
    let total = SectionTotal {
        label: "Total Equity",
        values: &equity.total_equity,
    };
    flatten_line_items(&equity.items, &layout, Some(total), year)
}

/// Non-current then current liabilities, each grouped under its section label
/// (subitems included) and closed by its own total row.
pub fn liabilities_rows(doc: &BalanceSheetDocument, year: &str) -> Result<Vec<LineItemRow>> {
    let liabilities = &doc.financial_position.equity_and_liabilities.liabilities;
    let sections = [
        (
            NON_CURRENT_LIABILITIES,
            &liabilities.non_current.items,
            &liabilities.non_current.total_non_current_liabilities,
        ),
        (
            CURRENT_LIABILITIES,
            &liabilities.current.items,
            &liabilities.current.total_current_liabilities,
        ),
    ];

    let mut rows = Vec::new();
    for (label, items, totals) in sections {
        let layout = LineItemLayout {
            section: label,
            default_parent: label,
            subitem_parent: SubitemParent::Section,
            missing_item_value: MissingValue::Fail,
        };
        let total_label = format!("Total {}", label);
        let total = SectionTotal {
            label: &total_label,
            values: totals,
        };
        rows.extend(flatten_line_items(items, &layout, Some(total), year)?);
    }
    Ok(rows)
}

pub fn composition_rows(doc: &BalanceSheetDocument, year: &str) -> Result<Vec<CompositionRow>> {
    let position = &doc.financial_position;
    let components = [
        ("Total Assets", &position.assets.total_assets),
        ("Total Equity", &position.equity_and_liabilities.equity.total_equity),
        (
            "Total Liabilities",
            &position.equity_and_liabilities.liabilities.total_liabilities,
        ),
    ];

    components
        .into_iter()
        .map(|(component, totals)| -> Result<CompositionRow> {
            Ok(CompositionRow {
                component,
                amount: require_year(totals, year, "Financial position", component)?,
            })
        })
        .collect()
}

pub fn page(doc: &BalanceSheetDocument, years: &ReportingYears) -> Result<Page> {
    let year = years.current_year.as_str();
    let mut page = Page::new(PageKind::BalanceSheet);
    page.title("📑 Balance Sheet Charts");

    page.chart(
        &ChartSpec::sunburst(format!("Non‑Current Assets ({})", year))
            .path(&["parent", "name"])
            .values("value")
            .hover(&["value"]),
        &non_current_assets_rows(doc, year)?,
    )?;
    page.chart(
        &ChartSpec::treemap(format!("Current Assets ({})", year))
            .path(&["parent", "name"])
            .values("value")
            .hover(&["value"]),
        &current_assets_rows(doc, year)?,
    )?;
    page.chart(
        &ChartSpec::bar("Non-current vs Current Assets")
            .x("Category")
            .y(&["Value"])
            .color("Year")
            .barmode(BarMode::Group),
        &asset_totals_rows(doc, years)?,
    )?;
    page.divider();

    page.chart(
        &ChartSpec::treemap(format!("Equity Breakdown ({})", year))
            .path(&["parent", "name"])
            .values("value"),
        &equity_rows(doc, year)?,
    )?;
    page.chart(
        &ChartSpec::sunburst(format!("Liabilities ({})", year))
            .path(&["parent", "name"])
            .values("value")
            .hover(&["value"]),
        &liabilities_rows(doc, year)?,
    )?;
    page.divider();

    page.chart(
        &ChartSpec::bar(format!("Balance Sheet Composition ({})", year))
            .x("Component")
            .y(&["Amount"])
            .text("Amount")
            .label("Amount", "₹ Crores")
            .label("Component", "")
            .text_template("%{text:,}")
            .text_position("outside")
            .uniform_text(8),
        &composition_rows(doc, year)?,
    )?;

    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::page::Block;
    use serde_json::json;

    fn document() -> BalanceSheetDocument {
        serde_json::from_value(json!({
            "financial_position": {
                "assets": {
                    "non_current": {
                        "items": [
                            {"name": "Property, plant and equipment", "2023": 900, "2024": 1000},
                            {"name": "Financial assets", "subitems": [
                                {"name": "Investments", "2023": 40, "2024": 50},
                                {"name": "Loans", "2023": 10, "2024": 12}
                            ]}
                        ],
                        "total_non_current_assets": {"2023": 950, "2024": 1062}
                    },
                    "current": {
                        "items": [
                            {"name": "Inventories", "2023": 5, "2024": null},
                            {"name": "Financial assets", "subitems": [
                                {"name": "Trade receivables", "2023": 300, "2024": 320}
                            ]}
                        ],
                        "total_current_assets": {"2023": 305, "2024": 320}
                    },
                    "total_assets": {"2023": 1255, "2024": 1382}
                },
                "equity_and_liabilities": {
                    "equity": {
                        "items": [
                            {"name": "Equity share capital", "2023": 30, "2024": 30},
                            {"name": "Other equity", "subitems": [
                                {"name": "Retained earnings", "2023": 800, "2024": 900}
                            ]}
                        ],
                        "total_equity": {"2023": 830, "2024": 930}
                    },
                    "liabilities": {
                        "non_current": {
                            "items": [
                                {"name": "Lease liabilities", "2023": 100, "2024": 110}
                            ],
                            "total_non_current_liabilities": {"2023": 100, "2024": 110}
                        },
                        "current": {
                            "items": [
                                {"name": "Financial liabilities", "subitems": [
                                    {"name": "Trade payables", "2023": 300, "2024": 320},
                                    {"name": "Other", "2023": 25, "2024": 22}
                                ]}
                            ],
                            "total_current_liabilities": {"2023": 325, "2024": 342}
                        },
                        "total_liabilities": {"2023": 425, "2024": 452}
                    }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_non_current_assets_rows() {
        let rows = non_current_assets_rows(&document(), "2024").unwrap();

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].parent, "Non-current Assets");
        assert_eq!(rows[1].parent, "Financial assets");
        assert_eq!(rows[1].name, "Investments");
        assert_eq!(rows[3].parent, "");
        assert_eq!(rows[3].value, 1062.0);
    }

    #[test]
    fn test_current_assets_null_becomes_zero() {
        let rows = current_assets_rows(&document(), "2024").unwrap();

        assert_eq!(rows[0].name, "Inventories");
        assert_eq!(rows[0].value, 0.0);
        assert_eq!(rows.last().unwrap().name, "Current Assets");
    }

    #[test]
    fn test_equity_null_is_an_error() {
        let mut doc = document();
        doc.financial_position.equity_and_liabilities.equity.items[0]
            .values
            .0
            .insert("2024".to_string(), serde_json::Value::Null);

        let err = equity_rows(&doc, "2024").unwrap_err();

        assert!(matches!(err, EngineError::DocumentIncomplete { ref section, .. } if section == "Equity"));
    }

    #[test]
    fn test_equity_rows_use_empty_default_parent() {
        let rows = equity_rows(&document(), "2024").unwrap();

        assert_eq!(rows[0].parent, "");
        assert_eq!(rows[1].parent, "Other equity");
        assert_eq!(rows[2].name, "Total Equity");
    }

    #[test]
    fn test_liabilities_group_by_section_label() {
        let rows = liabilities_rows(&document(), "2024").unwrap();
        let summary: Vec<(&str, &str)> = rows
            .iter()
            .map(|r| (r.parent.as_str(), r.name.as_str()))
            .collect();

        assert_eq!(
            summary,
            [
                ("Non-current Liabilities", "Lease liabilities"),
                ("", "Total Non-current Liabilities"),
                ("Current Liabilities", "Trade payables"),
                ("Current Liabilities", "Other"),
                ("", "Total Current Liabilities"),
            ]
        );
    }

    #[test]
    fn test_asset_totals_order() {
        let rows = asset_totals_rows(&document(), &ReportingYears::default()).unwrap();
        let values: Vec<(&str, &str, f64)> = rows
            .iter()
            .map(|r| (r.category, r.year.as_str(), r.value))
            .collect();

        assert_eq!(
            values,
            [
                ("Non-current", "2023", 950.0),
                ("Non-current", "2024", 1062.0),
                ("Current", "2023", 305.0),
                ("Current", "2024", 320.0),
            ]
        );
    }

    #[test]
    fn test_composition_rows() {
        let rows = composition_rows(&document(), "2024").unwrap();
        assert_eq!(
            rows.iter().map(|r| r.amount).collect::<Vec<_>>(),
            [1382.0, 930.0, 452.0]
        );
    }

    #[test]
    fn test_page_sequence() {
        let page = page(&document(), &ReportingYears::default()).unwrap();

        let kinds: Vec<&str> = page
            .blocks
            .iter()
            .map(|b| match b {
                Block::Title { .. } => "title",
                Block::Chart { .. } => "chart",
                Block::Divider => "divider",
                _ => "other",
            })
            .collect();
        assert_eq!(
            kinds,
            ["title", "chart", "chart", "chart", "divider", "chart", "chart", "divider", "chart"]
        );

        let titles: Vec<String> = page
            .figures()
            .map(|f| f.layout["title"]["text"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(titles[1], "Current Assets (2024)");
        assert_eq!(titles[5], "Balance Sheet Composition (2024)");
    }
}
