//! Finds the category a transaction request refers to and checks that its type matches.

use rusqlite::Connection;

use crate::{
    Error,
    category::{Category, CategoryType, get_categories_by_name, get_category},
    transaction::domain::ValidatedCategoryRef,
    user::UserID,
};

/// Find the category owned by `user_id` that `category_ref` refers to.
///
/// A name is matched against the user's categories of `transaction_type` first. An ID or name
/// that only matches a category of the other type is a type mismatch.
///
/// # Errors
/// Returns a:
/// - [Error::CategoryNotFound] if the user has no such category,
/// - [Error::CategoryTypeMismatch] with the category's type if it differs from
///   `transaction_type`,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn resolve_category(
    category_ref: &ValidatedCategoryRef,
    transaction_type: CategoryType,
    user_id: UserID,
    connection: &Connection,
) -> Result<Category, Error> {
    let category = match category_ref {
        ValidatedCategoryRef::Id(category_id) => get_category(*category_id, user_id, connection)?,
        ValidatedCategoryRef::Name(name) => {
            let mut candidates = get_categories_by_name(name, user_id, connection)?;

            match candidates
                .iter()
                .position(|category| category.category_type == transaction_type)
            {
                Some(index) => candidates.swap_remove(index),
                None => candidates.pop().ok_or(Error::CategoryNotFound)?,
            }
        }
    };

    if category.category_type != transaction_type {
        return Err(Error::CategoryTypeMismatch(category.category_type));
    }

    Ok(category)
}
