//! Category editing endpoint.

use axum::{Extension, extract::State};
use rusqlite::Connection;

use crate::{
    Error,
    api_response::ApiResponse,
    category::{
        Category, CategoryFormData, CategoryName, CategoryState, CategoryType, CategoryUpdate,
        get_category, update_category,
    },
    database_id::CategoryId,
    db::lock_connection,
    extract::{ApiJson, ApiPath},
    transaction::count_category_transactions,
    user::{User, UserID},
};

/// Change the name and/or type of one of the logged in user's categories.
///
/// Fields left out of the body keep their current value. The type can only be changed while no
/// transactions are recorded against the category.
pub async fn update_category_endpoint(
    State(state): State<CategoryState>,
    Extension(user): Extension<User>,
    ApiPath(category_id): ApiPath<CategoryId>,
    ApiJson(form): ApiJson<CategoryFormData>,
) -> Result<ApiResponse<Category>, Error> {
    let update = parse_update(form)?;

    let connection = lock_connection(&state.db_connection)?;

    if let Some(new_type) = update.category_type {
        check_type_change(category_id, new_type, user.id, &connection)?;
    }

    let category = update_category(category_id, user.id, update, &connection)?;

    Ok(ApiResponse::success(category))
}

fn check_type_change(
    category_id: CategoryId,
    new_type: CategoryType,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    let current = get_category(category_id, user_id, connection)?;

    if current.category_type != new_type
        && count_category_transactions(category_id, user_id, connection)? > 0
    {
        return Err(Error::Validation(
            "Cannot change the type of a category that has transactions".to_owned(),
        ));
    }

    Ok(())
}

fn parse_update(form: CategoryFormData) -> Result<CategoryUpdate, Error> {
    let name = form.name.as_deref().map(CategoryName::new).transpose()?;
    let category_type = form
        .category_type
        .as_deref()
        .map(str::parse::<CategoryType>)
        .transpose()?;

    if name.is_none() && category_type.is_none() {
        return Err(Error::Validation(
            "Provide a name or type to update".to_owned(),
        ));
    }

    Ok(CategoryUpdate {
        name,
        category_type,
    })
}


#[cfg(test)]
mod update_category_endpoint_tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use serde_json::Value;

    use crate::test_utils::{
        create_test_category, create_test_transaction, get_test_app_state, get_test_server,
        log_in_new_user,
    };

    #[tokio::test]
    async fn renames_category() {
        let server = get_test_server(get_test_app_state());
        let token = log_in_new_user(&server, "ada@example.com").await;
        let rent = create_test_category(&server, &token, "Rent", "expense").await;

        let response = server
            .put(&format!("/api/v1/category/update/{}", rent["id"]))
            .authorization_bearer(&token)
            .json(&json!({"name": "Mortgage"}))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "status": "success",
            "data": {"id": rent["id"], "name": "Mortgage", "type": "expense"},
        }));
    }

    #[tokio::test]
    async fn other_users_category_is_not_found() {
        let server = get_test_server(get_test_app_state());
        let ada = log_in_new_user(&server, "ada@example.com").await;
        let bob = log_in_new_user(&server, "bob@example.com").await;
        let rent = create_test_category(&server, &ada, "Rent", "expense").await;

        let response = server
            .put(&format!("/api/v1/category/update/{}", rent["id"]))
            .authorization_bearer(&bob)
            .json(&json!({"name": "Mine now"}))
            .await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn missing_category_is_not_found() {
        let server = get_test_server(get_test_app_state());
        let token = log_in_new_user(&server, "ada@example.com").await;

        let response = server
            .put("/api/v1/category/update/42")
            .authorization_bearer(&token)
            .json(&json!({"type": "income"}))
            .await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn invalid_type_is_bad_request() {
        let server = get_test_server(get_test_app_state());
        let token = log_in_new_user(&server, "ada@example.com").await;
        let rent = create_test_category(&server, &token, "Rent", "expense").await;

        let response = server
            .put(&format!("/api/v1/category/update/{}", rent["id"]))
            .authorization_bearer(&token)
            .json(&json!({"type": "savings"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn type_change_with_transactions_is_rejected() {
        let server = get_test_server(get_test_app_state());
        let token = log_in_new_user(&server, "ada@example.com").await;
        let salary = create_test_category(&server, &token, "Salary", "income").await;
        create_test_transaction(
            &server,
            &token,
            json!({
                "type": "income",
                "category": salary["id"],
                "amount": 1000.0,
                "description": "March pay",
            }),
        )
        .await;

        let response = server
            .put(&format!("/api/v1/category/update/{}", salary["id"]))
            .authorization_bearer(&token)
            .json(&json!({"type": "expense"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({
            "status": "fail",
            "message": "Cannot change the type of a category that has transactions",
        }));
        let stored = server
            .get(&format!("/api/v1/category/get-categorie/{}", salary["id"]))
            .authorization_bearer(&token)
            .await;
        assert_eq!(stored.json::<Value>()["data"]["type"], "income");
        server
            .get("/api/v1/transactions/summary")
            .authorization_bearer(&token)
            .await
            .assert_json(&json!({
                "status": "success",
                "data": {"income": 1000.0, "expenses": 0.0, "balance": 1000.0},
            }));
    }

    #[tokio::test]
    async fn type_change_without_transactions_succeeds() {
        let server = get_test_server(get_test_app_state());
        let token = log_in_new_user(&server, "ada@example.com").await;
        let gifts = create_test_category(&server, &token, "Gifts", "income").await;

        let response = server
            .put(&format!("/api/v1/category/update/{}", gifts["id"]))
            .authorization_bearer(&token)
            .json(&json!({"type": "expense"}))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "status": "success",
            "data": {"id": gifts["id"], "name": "Gifts", "type": "expense"},
        }));
    }

    #[tokio::test]
    async fn renamed_category_resolves_by_new_name() {
        let server = get_test_server(get_test_app_state());
        let token = log_in_new_user(&server, "ada@example.com").await;
        let rent = create_test_category(&server, &token, "Rent", "expense").await;
        server
            .put(&format!("/api/v1/category/update/{}", rent["id"]))
            .authorization_bearer(&token)
            .json(&json!({"name": "Mortgage"}))
            .await
            .assert_status_ok();

        let transaction = create_test_transaction(
            &server,
            &token,
            json!({
                "type": "expense",
                "category": "Mortgage",
                "amount": 1800.0,
                "description": "March",
            }),
        )
        .await;

        assert_eq!(transaction["categoryId"], rent["id"]);
        assert_eq!(transaction["category"]["name"], "Mortgage");
        server
            .post("/api/v1/transaction/create")
            .authorization_bearer(&token)
            .json(&json!({
                "type": "expense",
                "category": "Rent",
                "amount": 1800.0,
                "description": "April",
            }))
            .await
            .assert_status_not_found();
    }
}
