//! Dashboard module
//!
//! Provides an overview page showing income and expense totals, a
//! per-category breakdown, recent transactions and a monthly rollup chart.
//! The same figures are available as JSON from the summary endpoint.

mod aggregation;
mod cards;
mod charts;
mod handlers;
mod tables;

pub use handlers::{get_dashboard_page, get_dashboard_summary};
