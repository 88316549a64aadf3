//! Transaction creation endpoint.

use axum::{
    Extension,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    api_response::ApiResponse,
    db::lock_connection,
    extract::ApiJson,
    transaction::{TransactionFormData, TransactionState, create_transaction, resolve_category},
    user::User,
};

/// Handle a request to record a transaction for the logged in user.
///
/// The category may be given by ID or by name. Responds with 201 and the new transaction.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    Extension(user): Extension<User>,
    ApiJson(form): ApiJson<TransactionFormData>,
) -> Result<Response, Error> {
    let form = form.validate()?;

    let connection = lock_connection(&state.db_connection)?;
    let category = resolve_category(&form.category, form.transaction_type, user.id, &connection)?;
    let transaction =
        create_transaction(form.into_new_transaction(user.id, category.id), &connection)?;

    tracing::debug!("User {} created transaction {}", user.id, transaction.id);

    Ok((StatusCode::CREATED, ApiResponse::success(transaction)).into_response())
}
