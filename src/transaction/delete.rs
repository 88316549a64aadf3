//! Transaction deletion endpoint.

use axum::{Extension, extract::State};

use crate::{
    Error,
    api_response::ApiResponse,
    database_id::TransactionId,
    db::lock_connection,
    extract::ApiPath,
    transaction::{TransactionState, delete_transaction},
    user::User,
};

/// Delete one of the logged in user's transactions.
pub async fn delete_transaction_endpoint(
    State(state): State<TransactionState>,
    Extension(user): Extension<User>,
    ApiPath(transaction_id): ApiPath<TransactionId>,
) -> Result<ApiResponse<()>, Error> {
    let connection = lock_connection(&state.db_connection)?;
    delete_transaction(transaction_id, user.id, &connection)?;

    Ok(ApiResponse::success_message(
        "Transaction deleted successfully",
    ))
}
