//! Website quality scan report renderer
//!
//! Turns the structured report produced by a website scanner into a
//! self-contained HTML results page: summary, overall score gauge, category
//! bar chart, recommendations and a detailed score table.

pub mod batch;
pub mod catalog;
pub mod cli;
pub mod errors;
pub mod models;
pub mod reporter;
pub mod summary;
pub mod ui;
pub mod utils;

pub use catalog::CategoryCatalog;
pub use errors::{SitelensError, SitelensResult};
pub use models::{ReportInput, ScanReport};
pub use reporter::HtmlReporter;
