//! Income and expense categories owned by a user.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::AppState;

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;

pub use create::create_category_endpoint;
pub use db::{
    create_category, create_category_table, delete_category, get_categories,
    get_categories_by_name, get_category, update_category,
};
pub use delete::delete_category_endpoint;
pub use domain::{
    Category, CategoryFormData, CategoryName, CategoryType, CategoryUpdate, NewCategory,
};
pub use edit::update_category_endpoint;
pub use list::{get_categories_endpoint, get_category_endpoint};

/// The state needed by the category endpoints.
#[derive(Debug, Clone)]
pub struct CategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}
