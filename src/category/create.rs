//! Category creation endpoint.

use axum::{
    Extension,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    api_response::ApiResponse,
    category::{
        CategoryFormData, CategoryName, CategoryState, CategoryType, NewCategory, create_category,
    },
    db::lock_connection,
    extract::ApiJson,
    user::User,
};

/// Handle a request to create a category for the logged in user.
///
/// Responds with 201 and the new category.
pub async fn create_category_endpoint(
    State(state): State<CategoryState>,
    Extension(user): Extension<User>,
    ApiJson(form): ApiJson<CategoryFormData>,
) -> Result<Response, Error> {
    let category_type: CategoryType = form.category_type.as_deref().unwrap_or_default().parse()?;
    let name = CategoryName::new(form.name.as_deref().unwrap_or_default())?;

    let connection = lock_connection(&state.db_connection)?;
    let category = create_category(
        NewCategory {
            name,
            category_type,
            user_id: user.id,
        },
        &connection,
    )?;

    Ok((StatusCode::CREATED, ApiResponse::success(category)).into_response())
}
