use serde::{Deserialize, Serialize};

use crate::chart::{render, ChartSpec, Figure};
use crate::error::Result;
use crate::rows::to_records;

/// Pages listed in the navigation sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageKind {
    Agent,
    Employees,
    BalanceSheet,
    ProfitAndLoss,
    CurrentInvestments,
}

impl PageKind {
    /// Sidebar order. The first entry is the landing page.
    pub const NAVIGATION: [PageKind; 5] = [
        PageKind::Agent,
        PageKind::Employees,
        PageKind::BalanceSheet,
        PageKind::ProfitAndLoss,
        PageKind::CurrentInvestments,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            PageKind::Agent => "agent",
            PageKind::Employees => "employees",
            PageKind::BalanceSheet => "balance-sheet",
            PageKind::ProfitAndLoss => "profit-and-loss",
            PageKind::CurrentInvestments => "current-investments",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            PageKind::Agent => "LTI Agent",
            PageKind::Employees => "Employee Charts",
            PageKind::BalanceSheet => "Balance Sheets Charts",
            PageKind::ProfitAndLoss => "Profit And Loss Charts",
            PageKind::CurrentInvestments => "Current Investments",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::NAVIGATION.into_iter().find(|kind| kind.slug() == slug)
    }

    pub fn landing() -> Self {
        Self::NAVIGATION[0]
    }
}

/// One element of a page, in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Title { text: String },
    Subheader { text: String },
    Caption { text: String },
    Notice { text: String },
    Divider,
    Chart { figure: Figure },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub kind: PageKind,
    pub blocks: Vec<Block>,
}

impl Page {
    pub fn new(kind: PageKind) -> Self {
        Self {
            kind,
            blocks: Vec::new(),
        }
    }

    pub fn title(&mut self, text: impl Into<String>) -> &mut Self {
        self.blocks.push(Block::Title { text: text.into() });
        self
    }

    pub fn subheader(&mut self, text: impl Into<String>) -> &mut Self {
        self.blocks.push(Block::Subheader { text: text.into() });
        self
    }

    pub fn caption(&mut self, text: impl Into<String>) -> &mut Self {
        self.blocks.push(Block::Caption { text: text.into() });
        self
    }

    pub fn notice(&mut self, text: impl Into<String>) -> &mut Self {
        self.blocks.push(Block::Notice { text: text.into() });
        self
    }

    pub fn divider(&mut self) -> &mut Self {
        self.blocks.push(Block::Divider);
        self
    }

    /// Renders `rows` with `spec` and appends the figure.
    pub fn chart<T: Serialize>(&mut self, spec: &ChartSpec, rows: &[T]) -> Result<&mut Self> {
        let records = to_records(rows)?;
        let figure = render(spec, &records)?;
        tracing::trace!("Rendered '{}' from {} rows", spec.title, records.len());
        self.blocks.push(Block::Chart { figure });
        Ok(self)
    }

    pub fn figures(&self) -> impl Iterator<Item = &Figure> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Chart { figure } => Some(figure),
            _ => None,
        })
    }
}
