//! Page drivers: one fixed sequence of (flatten, render) steps per page.

pub mod balance_sheet;
pub mod employees;
pub mod investments;
pub mod profit_and_loss;

use models::{
    BalanceSheetDocument, EmployeeDocument, InvestmentsDocument, ProfitAndLossDocument,
    ReportingYears, Settings,
};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::loader::{parse_document, read_document};
use crate::page::{Page, PageKind};

/// The parsed document a page is built from.
#[derive(Debug, Clone)]
pub enum PageSource {
    Agent,
    Employees(EmployeeDocument),
    BalanceSheet(BalanceSheetDocument),
    ProfitAndLoss(ProfitAndLossDocument),
    CurrentInvestments(InvestmentsDocument),
}

impl PageSource {
    /// The file `kind` reads its document from; `None` for the assistant page.
    pub fn document_path(kind: PageKind, settings: &Settings) -> Option<PathBuf> {
        match kind {
            PageKind::Agent => None,
            PageKind::Employees => Some(settings.employees_path()),
            PageKind::BalanceSheet => Some(settings.balance_sheet_path()),
            PageKind::ProfitAndLoss => Some(settings.profit_and_loss_path()),
            PageKind::CurrentInvestments => Some(settings.current_investments_path()),
        }
    }

    /// Parses `raw`, read from `path`, as the document `kind` needs.
    pub fn parse(kind: PageKind, raw: &str, path: &Path) -> Result<Self> {
        Ok(match kind {
            PageKind::Agent => PageSource::Agent,
            PageKind::Employees => PageSource::Employees(parse_document(raw, path)?),
            PageKind::BalanceSheet => PageSource::BalanceSheet(parse_document(raw, path)?),
            PageKind::ProfitAndLoss => PageSource::ProfitAndLoss(parse_document(raw, path)?),
            PageKind::CurrentInvestments => {
                PageSource::CurrentInvestments(parse_document(raw, path)?)
            }
        })
    }

    /// Reads and parses the document for `kind` from the settings' data directory.
    pub fn load(kind: PageKind, settings: &Settings) -> Result<Self> {
        let Some(path) = Self::document_path(kind, settings) else {
            return Ok(PageSource::Agent);
        };
        let raw = read_document(&path)?;
        tracing::debug!("Loaded {}", path.display());
        Self::parse(kind, &raw, &path)
    }

    pub fn kind(&self) -> PageKind {
        match self {
            PageSource::Agent => PageKind::Agent,
            PageSource::Employees(_) => PageKind::Employees,
            PageSource::BalanceSheet(_) => PageKind::BalanceSheet,
            PageSource::ProfitAndLoss(_) => PageKind::ProfitAndLoss,
            PageSource::CurrentInvestments(_) => PageKind::CurrentInvestments,
        }
    }

    /// Runs the page driver for this document.
    pub fn build(&self, years: &ReportingYears) -> Result<Page> {
        match self {
            PageSource::Agent => Ok(agent_page()),
            PageSource::Employees(doc) => employees::page(doc),
            PageSource::BalanceSheet(doc) => balance_sheet::page(doc, years),
            PageSource::ProfitAndLoss(doc) => profit_and_loss::page(doc),
            PageSource::CurrentInvestments(doc) => investments::page(doc, years),
        }
    }
}

/// Loads the page's document from disk and builds the page.
pub fn build_page(kind: PageKind, settings: &Settings) -> Result<Page> {
    tracing::debug!("Building page '{}'", kind.slug());
    PageSource::load(kind, settings)?.build(&settings.reporting)
}

/// The assistant page has no content in this service; it only says so.
pub fn agent_page() -> Page {
    let mut page = Page::new(PageKind::Agent);
    page.title("🤖 LTI Agent")
        .notice("The LTI Agent assistant is not available in this deployment. Pick a chart page from the sidebar.");
    page
}

/// `"2024"` → `"’24"`, as used in comparison chart titles.
pub(crate) fn short_year(year: &str) -> String {
    let skip = year.chars().count().saturating_sub(2);
    format!("’{}", year.chars().skip(skip).collect::<String>())
}
