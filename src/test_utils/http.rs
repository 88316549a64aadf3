use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};

use crate::{AppState, build_router};

/// A test server for the full application router.
#[track_caller]
pub(crate) fn get_test_server(state: AppState) -> TestServer {
    TestServer::try_new(build_router(state)).expect("Could not create test server.")
}

/// Register a user through the API.
pub(crate) async fn register_test_user(server: &TestServer, email: &str, password: &str) {
    server
        .post("/api/v1/register")
        .json(&json!({"name": "Test User", "email": email, "password": password}))
        .await
        .assert_status(StatusCode::CREATED);
}

/// Register a user through the API, log them in and return their bearer token.
pub(crate) async fn log_in_new_user(server: &TestServer, email: &str) -> String {
    let password = "hunter22";
    register_test_user(server, email, password).await;

    let response = server
        .post("/api/v1/login")
        .json(&json!({"email": email, "password": password}))
        .await;
    response.assert_status_ok();

    response.json::<Value>()["data"]["token"]
        .as_str()
        .expect("Log-in response is missing the token")
        .to_owned()
}

/// Create a category through the API and return its JSON representation.
pub(crate) async fn create_test_category(
    server: &TestServer,
    token: &str,
    name: &str,
    category_type: &str,
) -> Value {
    let response = server
        .post("/api/v1/categories/create")
        .authorization_bearer(token)
        .json(&json!({"name": name, "type": category_type}))
        .await;
    response.assert_status(StatusCode::CREATED);

    response.json::<Value>()["data"].clone()
}

/// Create a transaction through the API and return its JSON representation.
pub(crate) async fn create_test_transaction(server: &TestServer, token: &str, body: Value) -> Value {
    let response = server
        .post("/api/v1/transaction/create")
        .authorization_bearer(token)
        .json(&body)
        .await;
    response.assert_status(StatusCode::CREATED);

    response.json::<Value>()["data"].clone()
}
