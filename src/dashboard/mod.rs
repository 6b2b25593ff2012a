//! Dashboard module
//!
//! Provides an overview page showing income and expense totals, the balance,
//! expenses grouped by category, and alerts for pending expenses due soon.

mod aggregation;
mod cards;
mod handlers;
mod tables;
mod transaction;

pub use handlers::get_dashboard_page;
