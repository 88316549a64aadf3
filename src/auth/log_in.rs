//! The endpoint for logging in and receiving a bearer token.

use std::sync::{Arc, Mutex};

use axum::extract::{FromRef, State};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{
    AppState, Error,
    api_response::ApiResponse,
    auth::{JwtKeys, token::encode_token},
    db::lock_connection,
    extract::ApiJson,
    user::{Email, get_user_by_email},
};

/// The state needed to perform a login.
#[derive(Debug, Clone)]
pub struct LoginState {
    /// The keys used to sign bearer tokens.
    pub jwt_keys: JwtKeys,
    /// How long issued tokens stay valid.
    pub token_duration: Duration,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for LoginState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            jwt_keys: state.jwt_keys.clone(),
            token_duration: state.token_duration,
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The JSON body for a log-in request.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LogInForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// The payload of a successful log-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogInResponse {
    /// The bearer token to send in the `Authorization` header.
    pub token: String,
}

/// Handler for log-in requests.
///
/// # Errors
///
/// This function will return an error in a few situations.
/// - [Error::Validation] if the email or password is missing.
/// - [Error::InvalidCredentials] if the email does not belong to a registered user or the
///   password is not correct.
/// - An internal error occurred when verifying the password or signing the token.
pub async fn post_log_in(
    State(state): State<LoginState>,
    ApiJson(form): ApiJson<LogInForm>,
) -> Result<ApiResponse<LogInResponse>, Error> {
    let (raw_email, password) = match (form.email, form.password) {
        (Some(email), Some(password)) if !email.trim().is_empty() && !password.is_empty() => {
            (email, password)
        }
        _ => return Err(Error::Validation("All fields are required".to_owned())),
    };

    // An address that cannot be registered cannot log in either.
    let email = Email::new(&raw_email).map_err(|_| Error::InvalidCredentials)?;

    let (user, password_hash) = {
        let connection = lock_connection(&state.db_connection)?;

        get_user_by_email(&email, &connection).map_err(|error| match error {
            Error::NotFound => Error::InvalidCredentials,
            error => error,
        })?
    };

    let password_is_correct = password_hash.verify(&password).map_err(|error| {
        tracing::error!("Error verifying password: {error}");
        Error::HashingError(error.to_string())
    })?;

    if !password_is_correct {
        return Err(Error::InvalidCredentials);
    }

    let token = encode_token(
        user.id,
        OffsetDateTime::now_utc(),
        state.token_duration,
        &state.jwt_keys,
    )?;

    Ok(ApiResponse::success(LogInResponse { token }))
}
