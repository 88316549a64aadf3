//! Aggregated views over a user's transactions: all-time totals and per-category totals over a
//! date range.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::AppState;

mod monthly;
mod summary;

pub use monthly::{
    CategoryTotal, ReportQuery, get_category_report, get_monthly_report_endpoint,
};
pub use summary::{Summary, get_summary, get_summary_endpoint};

/// The state needed by the report endpoints.
#[derive(Debug, Clone)]
pub struct ReportState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ReportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}
