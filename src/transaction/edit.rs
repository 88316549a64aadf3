//! Transaction editing endpoint.

use axum::{Extension, extract::State};

use crate::{
    Error,
    api_response::ApiResponse,
    database_id::TransactionId,
    db::lock_connection,
    extract::{ApiJson, ApiPath},
    transaction::{
        Transaction, TransactionFormData, TransactionState, resolve_category, update_transaction,
    },
    user::User,
};

/// Replace the fields of one of the logged in user's transactions.
///
/// The body has the same shape as for creating a transaction and the category is checked the
/// same way. Leaving out the date keeps the stored date.
pub async fn update_transaction_endpoint(
    State(state): State<TransactionState>,
    Extension(user): Extension<User>,
    ApiPath(transaction_id): ApiPath<TransactionId>,
    ApiJson(form): ApiJson<TransactionFormData>,
) -> Result<ApiResponse<Transaction>, Error> {
    let form = form.validate()?;

    let connection = lock_connection(&state.db_connection)?;
    let category = resolve_category(&form.category, form.transaction_type, user.id, &connection)?;
    let transaction = update_transaction(
        transaction_id,
        form.into_new_transaction(user.id, category.id),
        &connection,
    )?;

    Ok(ApiResponse::success(transaction))
}
