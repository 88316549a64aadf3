//! Endpoints for reading a user's transactions.

use axum::{Extension, extract::State};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    api_response::ApiResponse,
    database_id::TransactionId,
    db::lock_connection,
    extract::{ApiPath, ApiQuery},
    pagination::{Page, PageQuery, page_count},
    transaction::{
        Transaction, TransactionState, count_transactions, get_transaction, get_transactions_page,
    },
    user::User,
};

/// One page of a user's transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    /// The transactions on this page, newest first.
    pub transactions: Vec<Transaction>,
    /// The 1-based page number.
    pub page: u64,
    /// The maximum number of transactions per page.
    pub limit: u64,
    /// The number of transactions the user has in total.
    pub total: u64,
    /// The number of pages needed to show every transaction.
    pub total_pages: u64,
}

/// List the logged in user's transactions one page at a time.
pub async fn get_transactions_endpoint(
    State(state): State<TransactionState>,
    Extension(user): Extension<User>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<ApiResponse<TransactionPage>, Error> {
    let page = Page::from_query(&query, &state.pagination_config)?;

    let connection = lock_connection(&state.db_connection)?;
    let transactions = get_transactions_page(user.id, page, &connection)?;
    let total = count_transactions(user.id, &connection)?;

    Ok(ApiResponse::success(TransactionPage {
        transactions,
        page: page.page,
        limit: page.limit,
        total,
        total_pages: page_count(total, page.limit),
    }))
}

/// Get a single transaction owned by the logged in user.
pub async fn get_transaction_endpoint(
    State(state): State<TransactionState>,
    Extension(user): Extension<User>,
    ApiPath(transaction_id): ApiPath<TransactionId>,
) -> Result<ApiResponse<Transaction>, Error> {
    let connection = lock_connection(&state.db_connection)?;
    let transaction = get_transaction(transaction_id, user.id, &connection)?;

    Ok(ApiResponse::success(transaction))
}
