//! Endpoints for reading a user's categories.

use axum::{Extension, extract::State};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    api_response::ApiResponse,
    category::{Category, CategoryState, CategoryType, get_categories, get_category},
    database_id::CategoryId,
    db::lock_connection,
    extract::{ApiPath, ApiQuery},
    user::User,
};

/// The query string for listing categories.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CategoryListQuery {
    /// Only return categories of this type. An empty string means no filter.
    #[serde(rename = "type")]
    pub category_type: Option<String>,
}

/// List the logged in user's categories, optionally filtered by type.
pub async fn get_categories_endpoint(
    State(state): State<CategoryState>,
    Extension(user): Extension<User>,
    ApiQuery(query): ApiQuery<CategoryListQuery>,
) -> Result<ApiResponse<Vec<Category>>, Error> {
    let category_type = match query.category_type.as_deref() {
        None | Some("") => None,
        Some(raw_type) => Some(raw_type.parse::<CategoryType>()?),
    };

    let connection = lock_connection(&state.db_connection)?;
    let categories = get_categories(user.id, category_type, &connection)?;

    Ok(ApiResponse::success(categories))
}

/// Get a single category owned by the logged in user.
pub async fn get_category_endpoint(
    State(state): State<CategoryState>,
    Extension(user): Extension<User>,
    ApiPath(category_id): ApiPath<CategoryId>,
) -> Result<ApiResponse<Category>, Error> {
    let connection = lock_connection(&state.db_connection)?;
    let category = get_category(category_id, user.id, &connection)?;

    Ok(ApiResponse::success(category))
}
