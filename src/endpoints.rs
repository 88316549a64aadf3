//! The API endpoint URIs.
//!
//! Every route is served under '/api/v1'. Routes that take a parameter use axum's `{param}`
//! syntax, e.g. '/api/v1/category/delete/{category_id}'.

/// The route for registering a new user.
pub const REGISTER: &str = "/api/v1/register";
/// The route for logging in a user and getting a bearer token.
pub const LOG_IN: &str = "/api/v1/login";

/// The route to create a category.
pub const CREATE_CATEGORY: &str = "/api/v1/categories/create";
/// The route to list the user's categories.
pub const GET_CATEGORIES: &str = "/api/v1/category/get-categories";
/// The route to get a single category.
pub const GET_CATEGORY: &str = "/api/v1/category/get-categorie/{category_id}";
/// The route to update a category.
pub const UPDATE_CATEGORY: &str = "/api/v1/category/update/{category_id}";
/// The route to delete a category.
pub const DELETE_CATEGORY: &str = "/api/v1/category/delete/{category_id}";

/// The route to create a transaction.
pub const CREATE_TRANSACTION: &str = "/api/v1/transaction/create";
/// The route to list the user's transactions one page at a time.
pub const GET_TRANSACTIONS: &str = "/api/v1/transaction/get-trans";
/// The route to get a single transaction.
pub const GET_TRANSACTION: &str = "/api/v1/transaction/get-transc-id/{transaction_id}";
/// The route to update a transaction.
pub const UPDATE_TRANSACTION: &str = "/api/v1/transaction/update/{transaction_id}";
/// The route to delete a transaction.
pub const DELETE_TRANSACTION: &str = "/api/v1/transaction/delete/{transaction_id}";

/// The route for the user's all-time income, expense and balance totals.
pub const SUMMARY: &str = "/api/v1/transactions/summary";
/// The route for per-category totals over a date range.
pub const REPORT: &str = "/api/v1/transactions/report";
