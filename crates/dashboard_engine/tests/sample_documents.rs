use std::path::PathBuf;

use dashboard_engine::{build_page, Block, PageKind};
use dashboard_engine::pages::balance_sheet;
use models::{BalanceSheetDocument, Settings};

fn sample_settings() -> Settings {
    let workspace = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..");
    Settings {
        data_dir: workspace.join("json"),
        ..Settings::default()
    }
}

#[test]
fn every_page_builds_from_sample_documents() {
    let settings = sample_settings();

    for kind in PageKind::NAVIGATION {
        let page = build_page(kind, &settings)
            .unwrap_or_else(|e| panic!("page '{}' failed: {}", kind.slug(), e));
        assert_eq!(page.kind, kind);
        assert!(matches!(page.blocks.first(), Some(Block::Title { .. })));
    }
}

#[test]
fn chart_counts_per_page() {
    let settings = sample_settings();
    let counts: Vec<(PageKind, usize)> = PageKind::NAVIGATION
        .into_iter()
        .map(|kind| (kind, build_page(kind, &settings).unwrap().figures().count()))
        .collect();

    assert_eq!(
        counts,
        [
            (PageKind::Agent, 0),
            (PageKind::Employees, 4),
            (PageKind::BalanceSheet, 6),
            (PageKind::ProfitAndLoss, 5),
            (PageKind::CurrentInvestments, 5),
        ]
    );
}

#[test]
fn null_current_asset_is_charted_as_zero() {
    let doc: BalanceSheetDocument =
        dashboard_engine::load_document(&sample_settings().balance_sheet_path()).unwrap();

    let rows = balance_sheet::current_assets_rows(&doc, "2024").unwrap();
    let held_for_sale = rows
        .iter()
        .find(|r| r.name == "Assets held for sale")
        .unwrap();

    assert_eq!(held_for_sale.value, 0.0);
    assert_eq!(held_for_sale.parent, "Current Assets");
    assert_eq!(rows.last().unwrap().value, 26569.0);
}

#[test]
fn turnover_keeps_document_order() {
    let page = build_page(PageKind::Employees, &sample_settings()).unwrap();
    let turnover = page.figures().last().unwrap();

    assert_eq!(turnover.data[0]["x"], serde_json::json!(["FY24", "FY23", "FY22"]));
}
