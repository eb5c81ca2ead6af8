//! Two-level line-item flattening shared by every statement section.
//!
//! A section is a list of line items; an item either carries its own yearly
//! amount or a list of subitems that do. Flattening emits one row per leaf,
//! tagged with a parent label, then one row for the section total copied from
//! the document.

use models::{LineItem, YearValue, YearValues};
use serde::Serialize;

use crate::error::{EngineError, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItemRow {
    pub parent: String,
    pub name: String,
    pub value: f64,
}

impl LineItemRow {
    fn new(parent: &str, name: &str, value: f64) -> Self {
        Self {
            parent: parent.to_string(),
            name: name.to_string(),
            value,
        }
    }
}

/// Which label subitem rows are grouped under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubitemParent {
    /// The name of the item that owns the subitems.
    ItemName,
    /// The section's default parent label, same as plain items.
    Section,
}

/// What to do when a plain item has no amount for the requested year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingValue {
    Fail,
    /// Treat `null` or an absent key as zero. Only current assets use this.
    Zero,
}

#[derive(Debug, Clone, Copy)]
pub struct LineItemLayout<'a> {
    /// Section name used in error messages.
    pub section: &'a str,
    /// Parent label of items without subitems.
    pub default_parent: &'a str,
    pub subitem_parent: SubitemParent,
    pub missing_item_value: MissingValue,
}

/// The document's own total for a section, emitted as a root-level row.
#[derive(Debug, Clone, Copy)]
pub struct SectionTotal<'a> {
    pub label: &'a str,
    pub values: &'a YearValues,
}

pub fn flatten_line_items(
    items: &[LineItem],
    layout: &LineItemLayout,
    total: Option<SectionTotal>,
    year: &str,
) -> Result<Vec<LineItemRow>> {
    let mut rows = Vec::with_capacity(items.len() + 1);

    for item in items {
        match &item.subitems {
            Some(subitems) => {
                let parent = match layout.subitem_parent {
                    SubitemParent::ItemName => item.name.as_str(),
                    SubitemParent::Section => layout.default_parent,
                };
                for sub in subitems {
                    let value = require_year(&sub.values, year, layout.section, &sub.name)?;
                    rows.push(LineItemRow::new(parent, &sub.name, value));
                }
            }
            None => {
                let value = match (item.values.lookup(year), layout.missing_item_value) {
                    (YearValue::Missing, MissingValue::Zero) => 0.0,
                    _ => require_year(&item.values, year, layout.section, &item.name)?,
                };
                rows.push(LineItemRow::new(layout.default_parent, &item.name, value));
            }
        }
    }

    if let Some(total) = total {
        let value = require_year(total.values, year, layout.section, total.label)?;
        rows.push(LineItemRow::new("", total.label, value));
    }

    Ok(rows)
}

/// Looks up a yearly amount, failing with the section and item named when it is
/// absent, `null` or not a number.
pub fn require_year(values: &YearValues, year: &str, section: &str, item: &str) -> Result<f64> {
    match values.lookup(year) {
        YearValue::Number(v) => Ok(v),
        YearValue::Missing => Err(EngineError::DocumentIncomplete {
            section: section.to_string(),
            item: item.to_string(),
            year: year.to_string(),
        }),
        YearValue::NonNumeric => Err(EngineError::NonNumeric {
            section: section.to_string(),
            item: item.to_string(),
            year: year.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Fixture {
        items: Vec<LineItem>,
        total_x: YearValues,
    }

    const NON_CURRENT: LineItemLayout<'static> = LineItemLayout {
        section: "Non-current Assets",
        default_parent: "Non-current Assets",
        subitem_parent: SubitemParent::ItemName,
        missing_item_value: MissingValue::Fail,
    };

    fn fixture() -> Fixture {
        serde_json::from_value(json!({
            "items": [
                {"name": "A", "2024": 10},
                {"name": "B", "subitems": [{"name": "B1", "2024": 5}, {"name": "B2", "2024": 7}]}
            ],
            "total_x": {"2024": 22}
        }))
        .unwrap()
    }

    fn flatten(fx: &Fixture, layout: &LineItemLayout) -> Result<Vec<LineItemRow>> {
        let total = SectionTotal { label: "Non-current Assets", values: &fx.total_x };
        flatten_line_items(&fx.items, layout, Some(total), "2024")
    }

    #[test]
    fn test_items_subitems_and_total() {
        let rows = flatten(&fixture(), &NON_CURRENT).unwrap();

        assert_eq!(
            rows,
            vec![
                LineItemRow::new("Non-current Assets", "A", 10.0),
                LineItemRow::new("B", "B1", 5.0),
                LineItemRow::new("B", "B2", 7.0),
                LineItemRow::new("", "Non-current Assets", 22.0),
            ]
        );
    }

    #[test]
    fn test_row_count_is_leaves_plus_total() {
        let fx: Fixture = serde_json::from_value(json!({
            "items": [
                {"name": "P", "2024": 1},
                {"name": "Q", "subitems": [{"name": "Q1", "2024": 1}]},
                {"name": "R", "subitems": [
                    {"name": "R1", "2024": 1}, {"name": "R2", "2024": 1}, {"name": "R3", "2024": 1}
                ]},
                {"name": "S", "2024": 1}
            ],
            "total_x": {"2024": 999}
        }))
        .unwrap();

        let rows = flatten(&fx, &NON_CURRENT).unwrap();

        assert_eq!(rows.len(), (1 + 3) + 2 + 1);
        // copied from the document, not recomputed
        assert_eq!(rows.last().unwrap().value, 999.0);
    }

    #[test]
    fn test_flattening_is_repeatable() {
        let fx = fixture();
        assert_eq!(flatten(&fx, &NON_CURRENT).unwrap(), flatten(&fx, &NON_CURRENT).unwrap());
    }

    #[test]
    fn test_section_parent_for_subitems() {
        let layout = LineItemLayout {
            section: "Current Liabilities",
            default_parent: "Current Liabilities",
            subitem_parent: SubitemParent::Section,
            missing_item_value: MissingValue::Fail,
        };
        let rows = flatten_line_items(&fixture().items, &layout, None, "2024").unwrap();

        assert!(rows.iter().all(|r| r.parent == "Current Liabilities"));
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_zero_policy_fills_null_and_absent_item_values() {
        let items: Vec<LineItem> = serde_json::from_value(json!([
            {"name": "Held for sale", "2024": null},
            {"name": "Other", "2023": 4}
        ]))
        .unwrap();
        let layout = LineItemLayout {
            section: "Current Assets",
            default_parent: "Current Assets",
            subitem_parent: SubitemParent::ItemName,
            missing_item_value: MissingValue::Zero,
        };

        let rows = flatten_line_items(&items, &layout, None, "2024").unwrap();

        assert_eq!(rows[0].value, 0.0);
        assert_eq!(rows[1].value, 0.0);
    }

    #[test]
    fn test_zero_policy_does_not_cover_subitems() {
        let items: Vec<LineItem> = serde_json::from_value(json!([
            {"name": "Receivables", "subitems": [{"name": "Trade", "2024": null}]}
        ]))
        .unwrap();
        let layout = LineItemLayout {
            section: "Current Assets",
            default_parent: "Current Assets",
            subitem_parent: SubitemParent::ItemName,
            missing_item_value: MissingValue::Zero,
        };

        let err = flatten_line_items(&items, &layout, None, "2024").unwrap_err();
        assert!(matches!(err, EngineError::DocumentIncomplete { ref item, .. } if item == "Trade"));
    }

    #[test]
    fn test_fail_policy_reports_section_item_and_year() {
        let items: Vec<LineItem> =
            serde_json::from_value(json!([{"name": "Share capital", "2023": 1}])).unwrap();
        let layout = LineItemLayout {
            section: "Equity",
            default_parent: "",
            subitem_parent: SubitemParent::ItemName,
            missing_item_value: MissingValue::Fail,
        };

        let err = flatten_line_items(&items, &layout, None, "2024").unwrap_err();

        match err {
            EngineError::DocumentIncomplete { section, item, year } => {
                assert_eq!(section, "Equity");
                assert_eq!(item, "Share capital");
                assert_eq!(year, "2024");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_text_amount_is_non_numeric() {
        let items: Vec<LineItem> =
            serde_json::from_value(json!([{"name": "Cash", "2024": "12"}])).unwrap();
        let layout = LineItemLayout {
            section: "Current Assets",
            default_parent: "Current Assets",
            subitem_parent: SubitemParent::ItemName,
            missing_item_value: MissingValue::Zero,
        };

        let err = flatten_line_items(&items, &layout, None, "2024").unwrap_err();
        assert!(matches!(err, EngineError::NonNumeric { .. }));
    }

    #[test]
    fn test_missing_total_year_fails() {
        let fx = fixture();
        let total_values = YearValues::from([("2023", 1.0)]);
        let total = SectionTotal { label: "Total", values: &total_values };

        let err = flatten_line_items(&fx.items, &NON_CURRENT, Some(total), "2024").unwrap_err();
        assert!(matches!(err, EngineError::DocumentIncomplete { ref item, .. } if item == "Total"));
    }
}
