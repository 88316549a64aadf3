use rusqlite::Connection;

use crate::{
    AppState, PaginationConfig, PasswordHash,
    db::initialize,
    user::{Email, NewUser, User, create_user},
};

/// The cheapest bcrypt cost, keeps hashing in tests fast.
const TEST_PASSWORD_COST: u32 = 4;

/// An in-memory database with the application tables.
#[track_caller]
pub(crate) fn get_test_connection() -> Connection {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    initialize(&connection).expect("Could not initialize database");

    connection
}

/// App state backed by an in-memory database.
#[track_caller]
pub(crate) fn get_test_app_state() -> AppState {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    let mut state = AppState::new(connection, "42", PaginationConfig::default())
        .expect("Could not create app state");
    state.password_cost = TEST_PASSWORD_COST;

    state
}

/// Insert a user directly into the database, skipping password hashing.
#[track_caller]
pub(crate) fn insert_test_user(email: &str, connection: &Connection) -> User {
    create_user(
        NewUser {
            name: "Test User".to_owned(),
            email: Email::new_unchecked(email),
            password_hash: PasswordHash::new_unchecked("hunter2"),
        },
        connection,
    )
    .expect("Could not create test user")
}
