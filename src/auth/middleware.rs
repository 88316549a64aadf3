//! Authentication middleware that validates bearer tokens.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    auth::{JwtKeys, token::decode_token},
    db::lock_connection,
    user::{User, get_user_by_id},
};

/// The state needed for the auth middleware
#[derive(Debug, Clone)]
pub struct AuthState {
    /// The keys used to verify bearer tokens.
    pub jwt_keys: JwtKeys,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            jwt_keys: state.jwt_keys.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Middleware function that checks for a valid bearer token in the `Authorization` header.
///
/// The token's user is loaded and placed into the request extensions, then the request is
/// executed normally. Otherwise a 401 response is returned.
///
/// **Note**: Route handlers can use the function argument `Extension(user): Extension<User>` to
/// receive the user.
pub async fn auth_guard(State(state): State<AuthState>, request: Request, next: Next) -> Response {
    let (mut parts, body) = request.into_parts();

    let bearer =
        match TypedHeader::<Authorization<Bearer>>::from_request_parts(&mut parts, &state).await {
            Ok(TypedHeader(Authorization(bearer))) => bearer,
            Err(rejection) if rejection.is_missing() => return Error::MissingToken.into_response(),
            Err(rejection) => {
                tracing::debug!("invalid authorization header: {rejection}");
                return Error::InvalidToken.into_response();
            }
        };

    let user = match authenticate(bearer.token(), &state) {
        Ok(user) => user,
        Err(error) => return error.into_response(),
    };

    parts.extensions.insert(user);
    let request = Request::from_parts(parts, body);

    next.run(request).await
}

/// Resolve `token` to the user it was issued to.
fn authenticate(token: &str, state: &AuthState) -> Result<User, Error> {
    let claims = decode_token(token, &state.jwt_keys)?;
    let connection = lock_connection(&state.db_connection)?;

    get_user_by_id(claims.sub, &connection).map_err(|error| match error {
        Error::NotFound => Error::InvalidToken,
        error => error,
    })
}

#[cfg(test)]
mod auth_guard_tests {
    use axum::{
        Extension, Router,
        http::{HeaderValue, StatusCode, header::AUTHORIZATION},
        middleware,
        routing::get,
    };
    use axum_test::TestServer;
    use serde_json::{Value, json};
    use time::{Duration, OffsetDateTime};

    use crate::{
        AppState,
        auth::{DEFAULT_TOKEN_DURATION, token::encode_token},
        db::lock_connection,
        test_utils::{get_test_app_state, insert_test_user},
        user::{User, UserID},
    };

    use super::auth_guard;

    async fn whoami(Extension(user): Extension<User>) -> String {
        user.email.to_string()
    }

    fn get_test_server(state: AppState) -> TestServer {
        let app = Router::new()
            .route("/protected", get(whoami))
            .layer(middleware::from_fn_with_state(state.clone(), auth_guard))
            .with_state(state);

        TestServer::try_new(app).expect("Could not create test server.")
    }

    fn token_for(user_id: UserID, issued_at: OffsetDateTime, state: &AppState) -> String {
        encode_token(user_id, issued_at, DEFAULT_TOKEN_DURATION, &state.jwt_keys).unwrap()
    }

    #[tokio::test]
    async fn valid_token_passes_user_to_handler() {
        let state = get_test_app_state();
        let user = insert_test_user(
            "ada@example.com",
            &lock_connection(&state.db_connection).unwrap(),
        );
        let token = token_for(user.id, OffsetDateTime::now_utc(), &state);
        let server = get_test_server(state);

        let response = server
            .get("/protected")
            .authorization_bearer(token)
            .await;

        response.assert_status_ok();
        response.assert_text("ada@example.com");
    }

    #[tokio::test]
    async fn missing_token_is_unauthorized() {
        let server = get_test_server(get_test_app_state());

        let response = server.get("/protected").await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        response.assert_json(&json!({"status": "fail", "message": "Please log in"}));
    }

    #[tokio::test]
    async fn expired_token_is_unauthorized() {
        let state = get_test_app_state();
        let user = insert_test_user(
            "ada@example.com",
            &lock_connection(&state.db_connection).unwrap(),
        );
        let token = token_for(
            user.id,
            OffsetDateTime::now_utc() - Duration::days(2),
            &state,
        );
        let server = get_test_server(state);

        let response = server
            .get("/protected")
            .authorization_bearer(token)
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn token_for_unknown_user_is_unauthorized() {
        let state = get_test_app_state();
        let token = token_for(UserID::new(999), OffsetDateTime::now_utc(), &state);
        let server = get_test_server(state);

        let response = server
            .get("/protected")
            .authorization_bearer(token)
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        let body = response.json::<Value>();
        assert_eq!(body["status"], "fail");
    }

    #[tokio::test]
    async fn malformed_header_is_unauthorized() {
        let server = get_test_server(get_test_app_state());

        let response = server
            .get("/protected")
            .add_header(AUTHORIZATION, HeaderValue::from_static("Basic Zm9vOmJhcg=="))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }
}
