//! Turns the statement documents into chart pages.
//!
//! Each page follows the same straight line: load one document, flatten the
//! sub-trees each chart needs into row records, describe the chart with a
//! [`ChartSpec`](chart::ChartSpec) and render it into a Plotly figure.

pub mod chart;
pub mod error;
pub mod export;
pub mod flatten;
pub mod html;
pub mod loader;
pub mod page;
pub mod pages;
pub mod rows;

pub use chart::{BarMode, ChartKind, ChartSpec, Figure};
pub use error::{EngineError, Result};
pub use export::{export_site, ExportSummary};
pub use loader::{load_document, parse_document, read_document};
pub use page::{Block, Page, PageKind};
pub use pages::{build_page, PageSource};
