//! Per-category totals over a date range.

use std::ops::RangeInclusive;

use axum::{Extension, extract::State};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, Time};

use crate::{
    Error,
    api_response::ApiResponse,
    category::CategoryType,
    date_time::{END_OF_DAY, parse_date_time, parse_date_time_rounding_up},
    db::lock_connection,
    extract::ApiQuery,
    report::ReportState,
    user::{User, UserID},
};

/// The total of one category's transactions within the report range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    /// The category's name.
    pub category_name: String,
    /// The sum of the category's transactions in the range.
    pub total_spent: f64,
    /// The category's type.
    #[serde(rename = "type")]
    pub category_type: CategoryType,
}

/// The query string for a report.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    /// The first day (or instant) of the report.
    pub start_date: Option<String>,
    /// The last day (or instant) of the report.
    pub end_date: Option<String>,
}

impl ReportQuery {
    /// Parse the bounds into an inclusive range.
    ///
    /// A plain date covers the whole day: `startDate` starts at midnight and `endDate` ends at
    /// the last second of the day, both in UTC. Stored dates have whole-second precision, so a
    /// `startDate` with sub-seconds is rounded up and an `endDate` is rounded down.
    ///
    /// # Errors
    /// Returns an [Error::Validation] if a bound is missing or unparsable, or if `endDate` is
    /// before `startDate`.
    pub fn date_range(&self) -> Result<RangeInclusive<OffsetDateTime>, Error> {
        let (Some(raw_start), Some(raw_end)) = (
            self.start_date.as_deref().filter(|raw| !raw.trim().is_empty()),
            self.end_date.as_deref().filter(|raw| !raw.trim().is_empty()),
        ) else {
            return Err(Error::Validation(
                "Both startDate and endDate are required".to_owned(),
            ));
        };

        let start = parse_date_time_rounding_up(raw_start, Time::MIDNIGHT, "startDate")?;
        let end = parse_date_time(raw_end, END_OF_DAY, "endDate")?;

        // Rounding can push a sub-second range's start past its end, which leaves it empty.
        if end < parse_date_time(raw_start, Time::MIDNIGHT, "startDate")? {
            return Err(Error::Validation(
                "The end date must not be before the start date".to_owned(),
            ));
        }

        Ok(start..=end)
    }
}

/// Sum the user's transactions in `date_range` by category, ordered by category name.
///
/// Categories without transactions in the range are left out, as are transactions whose
/// category has been deleted.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn get_category_report(
    user_id: UserID,
    date_range: RangeInclusive<OffsetDateTime>,
    connection: &Connection,
) -> Result<Vec<CategoryTotal>, Error> {
    connection
        .prepare(
            "SELECT c.name, SUM(t.amount), c.type
             FROM \"transaction\" t
             INNER JOIN category c ON c.id = t.category_id AND c.user_id = t.user_id
             WHERE t.user_id = ?1 AND t.date BETWEEN ?2 AND ?3
             GROUP BY c.id
             ORDER BY c.name ASC, c.id ASC",
        )?
        .query_map(
            (user_id.as_i64(), date_range.start(), date_range.end()),
            |row| {
                Ok(CategoryTotal {
                    category_name: row.get(0)?,
                    total_spent: row.get(1)?,
                    category_type: row.get(2)?,
                })
            },
        )?
        .map(|maybe_total| maybe_total.map_err(|error| error.into()))
        .collect()
}

/// Get the logged in user's per-category totals between `startDate` and `endDate`.
pub async fn get_monthly_report_endpoint(
    State(state): State<ReportState>,
    Extension(user): Extension<User>,
    ApiQuery(query): ApiQuery<ReportQuery>,
) -> Result<ApiResponse<Vec<CategoryTotal>>, Error> {
    let date_range = query.date_range()?;

    let connection = lock_connection(&state.db_connection)?;
    let report = get_category_report(user.id, date_range, &connection)?;

    Ok(ApiResponse::success(report))
}
