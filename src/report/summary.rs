//! All-time income, expense and balance totals.

use axum::{Extension, extract::State};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    api_response::ApiResponse,
    category::CategoryType,
    db::lock_connection,
    report::ReportState,
    user::{User, UserID},
};

/// A user's total income and expenses across all of their transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// The sum of all income transactions.
    pub income: f64,
    /// The sum of all expense transactions.
    pub expenses: f64,
    /// `income - expenses`.
    pub balance: f64,
}

/// Sum the user's transactions by type.
///
/// A user with no transactions of a type gets zero for that type.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn get_summary(user_id: UserID, connection: &Connection) -> Result<Summary, Error> {
    let totals = connection
        .prepare(
            "SELECT type, SUM(amount) FROM \"transaction\"
             WHERE user_id = ?1
             GROUP BY type",
        )?
        .query_map([user_id.as_i64()], |row| {
            Ok((row.get::<_, CategoryType>(0)?, row.get::<_, f64>(1)?))
        })?
        .collect::<Result<Vec<_>, rusqlite::Error>>()?;

    let mut summary = Summary::default();

    for (transaction_type, total) in totals {
        match transaction_type {
            CategoryType::Income => summary.income = total,
            CategoryType::Expense => summary.expenses = total,
        }
    }

    summary.balance = summary.income - summary.expenses;

    Ok(summary)
}

/// Get the logged in user's all-time totals.
pub async fn get_summary_endpoint(
    State(state): State<ReportState>,
    Extension(user): Extension<User>,
) -> Result<ApiResponse<Summary>, Error> {
    let connection = lock_connection(&state.db_connection)?;
    let summary = get_summary(user.id, &connection)?;

    Ok(ApiResponse::success(summary))
}
