//! Typed records for the statement documents read by the dashboard, plus the
//! application settings shared by the loader, the engine and the server.

pub mod balance_sheet;
pub mod employees;
pub mod investments;
pub mod profit_and_loss;
pub mod settings;
pub mod values;

pub use balance_sheet::*;
pub use employees::*;
pub use investments::*;
pub use profit_and_loss::*;
pub use settings::*;
pub use values::*;
pub use indexmap::IndexMap;
