#![allow(missing_docs)]

pub(crate) mod db;
pub(crate) mod http;

pub(crate) use db::{get_test_app_state, get_test_connection, insert_test_user};
pub(crate) use http::{
    create_test_category, create_test_transaction, get_test_server, log_in_new_user,
    register_test_user,
};
