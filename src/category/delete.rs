//! Category deletion endpoint.

use axum::{Extension, extract::State};

use crate::{
    Error,
    api_response::ApiResponse,
    category::{CategoryState, delete_category},
    database_id::CategoryId,
    db::lock_connection,
    extract::ApiPath,
    user::User,
};

/// Delete one of the logged in user's categories.
///
/// Transactions recorded against the category are kept and keep referring to its ID.
pub async fn delete_category_endpoint(
    State(state): State<CategoryState>,
    Extension(user): Extension<User>,
    ApiPath(category_id): ApiPath<CategoryId>,
) -> Result<ApiResponse<()>, Error> {
    let connection = lock_connection(&state.db_connection)?;
    delete_category(category_id, user.id, &connection)?;

    tracing::debug!("User {} deleted category {category_id}", user.id);

    Ok(ApiResponse::success_message("Category deleted successfully"))
}
