//! Transaction management.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the request body used to create and update transactions
//! - Resolving the category a request refers to and checking its type
//! - Database functions for storing, querying, and managing transactions
//! - The JSON endpoints for transactions

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;
mod resolve;

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::{AppState, pagination::PaginationConfig};

pub use create::create_transaction_endpoint;
pub use db::{
    count_category_transactions, count_transactions, create_transaction, create_transaction_table,
    delete_transaction, get_transaction, get_transactions_page, update_transaction,
};
pub use delete::delete_transaction_endpoint;
pub use domain::{CategoryRef, NewTransaction, Transaction, TransactionFormData};
pub use edit::update_transaction_endpoint;
pub use list::{get_transaction_endpoint, get_transactions_endpoint};
pub use resolve::resolve_category;

/// The state needed by the transaction endpoints.
#[derive(Debug, Clone)]
pub struct TransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// Defaults and limits for paging through transactions.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for TransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}
