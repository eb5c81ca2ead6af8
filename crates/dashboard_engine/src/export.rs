//! Static export: every page as a standalone HTML file plus its JSON model.

use anyhow::{Context, Result};
use chrono::Utc;
use models::Settings;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::html::{render_error, render_page, render_redirect, LinkStyle};
use crate::page::PageKind;
use crate::pages::build_page;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageStatus {
    Ok,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportedPage {
    pub slug: &'static str,
    pub title: &'static str,
    pub status: PageStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub generated_at: String,
    pub app_title: String,
    pub out_dir: PathBuf,
    pub pages: Vec<ExportedPage>,
}

impl ExportSummary {
    pub fn failed(&self) -> impl Iterator<Item = &ExportedPage> {
        self.pages.iter().filter(|p| p.status == PageStatus::Failed)
    }
}

/// Writes `{slug}.html` and `{slug}.json` for each page, an `index.html` that
/// forwards to the landing page, and `manifest.json`.
///
/// A page that fails to build does not stop the export: it gets a diagnostic
/// HTML page and is marked failed in the manifest.
pub fn export_site(settings: &Settings, out_dir: &Path) -> Result<ExportSummary> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

    let mut pages = Vec::with_capacity(PageKind::NAVIGATION.len());
    for kind in PageKind::NAVIGATION {
        let html_path = out_dir.join(format!("{}.html", kind.slug()));
        let outcome = build_page(kind, settings);

        let (html, error) = match &outcome {
            Ok(page) => {
                let json_path = out_dir.join(format!("{}.json", kind.slug()));
                write_file(&json_path, &serde_json::to_string_pretty(page)?)?;
                (render_page(&settings.app_title, page, LinkStyle::Static)?, None)
            }
            Err(e) => {
                tracing::warn!("⚠️  Page '{}' failed: {}", kind.slug(), e);
                let html = render_error(
                    &settings.app_title,
                    Some(kind),
                    kind.title(),
                    &e.to_string(),
                    LinkStyle::Static,
                )?;
                (html, Some(e.to_string()))
            }
        };
        write_file(&html_path, &html)?;

        pages.push(ExportedPage {
            slug: kind.slug(),
            title: kind.title(),
            status: if error.is_some() { PageStatus::Failed } else { PageStatus::Ok },
            error,
        });
    }

    let index = render_redirect(PageKind::landing(), LinkStyle::Static)?;
    write_file(&out_dir.join("index.html"), &index)?;

    let summary = ExportSummary {
        generated_at: Utc::now().to_rfc3339(),
        app_title: settings.app_title.clone(),
        out_dir: out_dir.to_path_buf(),
        pages,
    };
    write_file(&out_dir.join("manifest.json"), &serde_json::to_string_pretty(&summary)?)?;

    tracing::info!(
        "✅ Exported {} pages to {} ({} failed)",
        summary.pages.len(),
        out_dir.display(),
        summary.failed().count()
    );
    Ok(summary)
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}
