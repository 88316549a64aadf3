//! The endpoint for registering a new user.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error, PasswordHash, ValidatedPassword,
    api_response::ApiResponse,
    db::lock_connection,
    extract::ApiJson,
    user::{Email, NewUser, create_user},
};

/// The state needed for creating a new user.
#[derive(Debug, Clone)]
pub struct RegistrationState {
    /// The bcrypt cost used to hash the new password.
    pub password_cost: u32,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for RegistrationState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            password_cost: state.password_cost,
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The JSON body for registering a user.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RegisterForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// A route handler for registering a new user.
///
/// Registration does not log the user in, the client should call the log-in endpoint afterwards.
///
/// # Errors
///
/// - [Error::Validation] if a field is missing, the email is malformed or the password is too
///   short.
/// - [Error::DuplicateEmail] if the email is already registered.
pub async fn register_user(
    State(state): State<RegistrationState>,
    ApiJson(form): ApiJson<RegisterForm>,
) -> Result<Response, Error> {
    let (name, email, password) = match (
        non_blank(form.name),
        non_blank(form.email),
        form.password.filter(|password| !password.is_empty()),
    ) {
        (Some(name), Some(email), Some(password)) => (name, email, password),
        _ => return Err(Error::Validation("All fields are required".to_owned())),
    };

    let email = Email::new(&email)?;
    let password = ValidatedPassword::new(&password)?;
    let password_hash = PasswordHash::new(password, state.password_cost)?;

    let connection = lock_connection(&state.db_connection)?;
    let user = create_user(
        NewUser {
            name,
            email,
            password_hash,
        },
        &connection,
    )?;

    tracing::info!("Registered user {}", user.id);

    Ok((
        StatusCode::CREATED,
        ApiResponse::success_message("User registered successfully"),
    )
        .into_response())
}

fn non_blank(field: Option<String>) -> Option<String> {
    field
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod register_user_tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::{
        db::lock_connection,
        test_utils::{get_test_app_state, get_test_server},
        user::{Email, get_user_by_email},
    };

    #[tokio::test]
    async fn register_succeeds() {
        let state = get_test_app_state();
        let server = get_test_server(state.clone());

        let response = server
            .post("/api/v1/register")
            .json(&json!({
                "name": "Ada",
                "email": "Ada@Example.com",
                "password": "hunter22",
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        response.assert_json(&json!({
            "status": "success",
            "message": "User registered successfully",
        }));
        let connection = lock_connection(&state.db_connection).unwrap();
        let (user, password_hash) =
            get_user_by_email(&Email::new_unchecked("ada@example.com"), &connection).unwrap();
        assert_eq!(user.name, "Ada");
        assert!(password_hash.verify("hunter22").unwrap());
    }

    #[tokio::test]
    async fn register_does_not_return_token() {
        let server = get_test_server(get_test_app_state());

        let response = server
            .post("/api/v1/register")
            .json(&json!({"name": "Ada", "email": "ada@example.com", "password": "hunter22"}))
            .await;

        let body = response.json::<serde_json::Value>();
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn register_fails_on_duplicate_email() {
        let server = get_test_server(get_test_app_state());
        let body = json!({"name": "Ada", "email": "ada@example.com", "password": "hunter22"});
        server
            .post("/api/v1/register")
            .json(&body)
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .post("/api/v1/register")
            .json(&json!({"name": "Imposter", "email": "ADA@example.com", "password": "hunter33"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({
            "status": "fail",
            "message": "Email is already registered, please log in",
        }));
    }

    #[tokio::test]
    async fn register_fails_on_missing_field() {
        let server = get_test_server(get_test_app_state());

        let response = server
            .post("/api/v1/register")
            .json(&json!({"email": "ada@example.com", "password": "hunter22"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({
            "status": "fail",
            "message": "All fields are required",
        }));
    }

    #[tokio::test]
    async fn register_fails_on_short_password() {
        let server = get_test_server(get_test_app_state());

        let response = server
            .post("/api/v1/register")
            .json(&json!({"name": "Ada", "email": "ada@example.com", "password": "12345"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn register_fails_on_invalid_email() {
        let server = get_test_server(get_test_app_state());

        let response = server
            .post("/api/v1/register")
            .json(&json!({"name": "Ada", "email": "not-an-email", "password": "hunter22"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn register_fails_on_malformed_json() {
        let server = get_test_server(get_test_app_state());

        let response = server
            .post("/api/v1/register")
            .json(&json!({"name": 42}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<serde_json::Value>();
        assert_eq!(body["status"], "fail");
    }
}
