//! Database operations for categories.
//!
//! Every query is scoped to the owning user, so a category that belongs to someone else looks
//! exactly like a category that does not exist.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    category::{Category, CategoryName, CategoryType, CategoryUpdate, NewCategory},
    database_id::CategoryId,
    user::UserID,
};

/// Create a category and return it with its generated ID.
///
/// # Errors
///
/// Returns an [Error::DuplicateCategory] if the user already has a category with the same name
/// and type.
pub fn create_category(
    new_category: NewCategory,
    connection: &Connection,
) -> Result<Category, Error> {
    connection
        .prepare(
            "INSERT INTO category (name, type, user_id) VALUES (?1, ?2, ?3)
             RETURNING id, name, type",
        )?
        .query_row(
            (
                new_category.name.as_ref(),
                new_category.category_type,
                new_category.user_id.as_i64(),
            ),
            map_row,
        )
        .map_err(|error| error.into())
}

/// Retrieve a single category owned by `user_id`.
///
/// # Errors
///
/// Returns an [Error::CategoryNotFound] if the category does not exist or is owned by another user.
pub fn get_category(
    category_id: CategoryId,
    user_id: UserID,
    connection: &Connection,
) -> Result<Category, Error> {
    connection
        .prepare("SELECT id, name, type FROM category WHERE id = :id AND user_id = :user_id;")?
        .query_row(
            &[(":id", &category_id), (":user_id", &user_id.as_i64())],
            map_row,
        )
        .map_err(map_missing_category)
}

/// Retrieve the categories owned by `user_id`, optionally only those of `category_type`.
///
/// Categories are ordered by name.
pub fn get_categories(
    user_id: UserID,
    category_type: Option<CategoryType>,
    connection: &Connection,
) -> Result<Vec<Category>, Error> {
    connection
        .prepare(
            "SELECT id, name, type FROM category
             WHERE user_id = ?1 AND (?2 IS NULL OR type = ?2)
             ORDER BY name ASC, id ASC;",
        )?
        .query_map((user_id.as_i64(), category_type), map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Retrieve every category owned by `user_id` called `name`, regardless of type.
///
/// There are at most two: one for income and one for expenses.
pub fn get_categories_by_name(
    name: &CategoryName,
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<Category>, Error> {
    connection
        .prepare(
            "SELECT id, name, type FROM category
             WHERE user_id = ?1 AND name = ?2
             ORDER BY id ASC;",
        )?
        .query_map((user_id.as_i64(), name.as_ref()), map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Change the name and/or type of a category and return the updated category.
///
/// # Errors
///
/// Returns an [Error::CategoryNotFound] if the category does not exist or is owned by another
/// user, or an [Error::DuplicateCategory] if the change would clash with another category.
pub fn update_category(
    category_id: CategoryId,
    user_id: UserID,
    update: CategoryUpdate,
    connection: &Connection,
) -> Result<Category, Error> {
    connection
        .prepare(
            "UPDATE category SET name = COALESCE(?1, name), type = COALESCE(?2, type)
             WHERE id = ?3 AND user_id = ?4
             RETURNING id, name, type",
        )?
        .query_row(
            (
                update.name.as_ref().map(|name| name.as_ref()),
                update.category_type,
                category_id,
                user_id.as_i64(),
            ),
            map_row,
        )
        .map_err(map_missing_category)
}

/// Delete a category owned by `user_id`.
///
/// Transactions that reference the category are left untouched.
///
/// # Errors
///
/// Returns an [Error::CategoryNotFound] if the category does not exist or is owned by another user.
pub fn delete_category(
    category_id: CategoryId,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM category WHERE id = ?1 AND user_id = ?2",
        (category_id, user_id.as_i64()),
    )?;

    if rows_affected == 0 {
        return Err(Error::CategoryNotFound);
    }

    Ok(())
}

/// Initialize the category table and indexes.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            type TEXT NOT NULL CHECK (type IN ('income', 'expense')),
            user_id INTEGER NOT NULL,
            UNIQUE(user_id, name, type),
            FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_category_user_id ON category(user_id);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let name = CategoryName::new_unchecked(&raw_name);
    let category_type = row.get(2)?;

    Ok(Category {
        id,
        name,
        category_type,
    })
}

fn map_missing_category(error: rusqlite::Error) -> Error {
    match error {
        rusqlite::Error::QueryReturnedNoRows => Error::CategoryNotFound,
        error => error.into(),
    }
}

#[cfg(test)]
mod category_query_tests {
    use std::collections::HashSet;

    use rusqlite::Connection;

    use crate::{
        Error,
        category::{
            Category, CategoryName, CategoryType, CategoryUpdate, NewCategory, create_category,
            delete_category, get_categories, get_categories_by_name, get_category,
            update_category,
        },
        test_utils::{get_test_connection, insert_test_user},
        user::UserID,
    };

    fn insert_category(
        name: &str,
        category_type: CategoryType,
        user_id: UserID,
        connection: &Connection,
    ) -> Category {
        create_category(
            NewCategory {
                name: CategoryName::new_unchecked(name),
                category_type,
                user_id,
            },
            connection,
        )
        .expect("Could not create test category")
    }

    #[test]
    fn create_category_succeeds() {
        let connection = get_test_connection();
        let user = insert_test_user("ada@example.com", &connection);
        let name = CategoryName::new("Salary").unwrap();

        let category = create_category(
            NewCategory {
                name: name.clone(),
                category_type: CategoryType::Income,
                user_id: user.id,
            },
            &connection,
        )
        .expect("Could not create category");

        assert!(category.id > 0);
        assert_eq!(category.name, name);
        assert_eq!(category.category_type, CategoryType::Income);
    }

    #[test]
    fn create_category_fails_on_duplicate_name_and_type() {
        let connection = get_test_connection();
        let user = insert_test_user("ada@example.com", &connection);
        insert_category("Salary", CategoryType::Income, user.id, &connection);

        let result = create_category(
            NewCategory {
                name: CategoryName::new_unchecked("Salary"),
                category_type: CategoryType::Income,
                user_id: user.id,
            },
            &connection,
        );

        assert_eq!(result, Err(Error::DuplicateCategory));
    }

    #[test]
    fn same_name_is_allowed_for_other_type_and_other_user() {
        let connection = get_test_connection();
        let ada = insert_test_user("ada@example.com", &connection);
        let bob = insert_test_user("bob@example.com", &connection);
        insert_category("Gifts", CategoryType::Income, ada.id, &connection);

        let other_type = create_category(
            NewCategory {
                name: CategoryName::new_unchecked("Gifts"),
                category_type: CategoryType::Expense,
                user_id: ada.id,
            },
            &connection,
        );
        let other_user = create_category(
            NewCategory {
                name: CategoryName::new_unchecked("Gifts"),
                category_type: CategoryType::Income,
                user_id: bob.id,
            },
            &connection,
        );

        assert!(other_type.is_ok());
        assert!(other_user.is_ok());
    }

    #[test]
    fn get_category_succeeds() {
        let connection = get_test_connection();
        let user = insert_test_user("ada@example.com", &connection);
        let inserted = insert_category("Rent", CategoryType::Expense, user.id, &connection);

        let selected = get_category(inserted.id, user.id, &connection);

        assert_eq!(Ok(inserted), selected);
    }

    #[test]
    fn get_category_of_other_user_returns_not_found() {
        let connection = get_test_connection();
        let ada = insert_test_user("ada@example.com", &connection);
        let bob = insert_test_user("bob@example.com", &connection);
        let inserted = insert_category("Rent", CategoryType::Expense, ada.id, &connection);

        let selected = get_category(inserted.id, bob.id, &connection);

        assert_eq!(selected, Err(Error::CategoryNotFound));
    }

    #[test]
    fn get_categories_filters_by_user_and_type() {
        let connection = get_test_connection();
        let ada = insert_test_user("ada@example.com", &connection);
        let bob = insert_test_user("bob@example.com", &connection);
        let salary = insert_category("Salary", CategoryType::Income, ada.id, &connection);
        let rent = insert_category("Rent", CategoryType::Expense, ada.id, &connection);
        insert_category("Food", CategoryType::Expense, bob.id, &connection);

        let all = get_categories(ada.id, None, &connection).unwrap();
        let expenses = get_categories(ada.id, Some(CategoryType::Expense), &connection).unwrap();

        assert_eq!(
            HashSet::<Category>::from_iter(all),
            HashSet::from([salary, rent.clone()])
        );
        assert_eq!(expenses, vec![rent]);
    }

    #[test]
    fn get_categories_by_name_returns_both_types() {
        let connection = get_test_connection();
        let user = insert_test_user("ada@example.com", &connection);
        let income = insert_category("Gifts", CategoryType::Income, user.id, &connection);
        let expense = insert_category("Gifts", CategoryType::Expense, user.id, &connection);
        insert_category("Rent", CategoryType::Expense, user.id, &connection);

        let got =
            get_categories_by_name(&CategoryName::new_unchecked("Gifts"), user.id, &connection)
                .unwrap();

        assert_eq!(got, vec![income, expense]);
    }

    #[test]
    fn update_category_changes_only_given_fields() {
        let connection = get_test_connection();
        let user = insert_test_user("ada@example.com", &connection);
        let category = insert_category("Rent", CategoryType::Expense, user.id, &connection);

        let updated = update_category(
            category.id,
            user.id,
            CategoryUpdate {
                name: Some(CategoryName::new_unchecked("Mortgage")),
                category_type: None,
            },
            &connection,
        )
        .unwrap();

        assert_eq!(updated.id, category.id);
        assert_eq!(updated.name.as_ref(), "Mortgage");
        assert_eq!(updated.category_type, CategoryType::Expense);
    }

    #[test]
    fn update_category_of_other_user_returns_not_found() {
        let connection = get_test_connection();
        let ada = insert_test_user("ada@example.com", &connection);
        let bob = insert_test_user("bob@example.com", &connection);
        let category = insert_category("Rent", CategoryType::Expense, ada.id, &connection);

        let result = update_category(
            category.id,
            bob.id,
            CategoryUpdate {
                name: Some(CategoryName::new_unchecked("Mine now")),
                category_type: None,
            },
            &connection,
        );

        assert_eq!(result, Err(Error::CategoryNotFound));
        assert_eq!(get_category(category.id, ada.id, &connection), Ok(category));
    }

    #[test]
    fn update_category_into_duplicate_fails() {
        let connection = get_test_connection();
        let user = insert_test_user("ada@example.com", &connection);
        insert_category("Rent", CategoryType::Expense, user.id, &connection);
        let food = insert_category("Food", CategoryType::Expense, user.id, &connection);

        let result = update_category(
            food.id,
            user.id,
            CategoryUpdate {
                name: Some(CategoryName::new_unchecked("Rent")),
                category_type: None,
            },
            &connection,
        );

        assert_eq!(result, Err(Error::DuplicateCategory));
    }

    #[test]
    fn delete_category_succeeds() {
        let connection = get_test_connection();
        let user = insert_test_user("ada@example.com", &connection);
        let category = insert_category("Rent", CategoryType::Expense, user.id, &connection);

        let result = delete_category(category.id, user.id, &connection);

        assert!(result.is_ok());
        assert_eq!(
            get_category(category.id, user.id, &connection),
            Err(Error::CategoryNotFound)
        );
    }

    #[test]
    fn delete_category_of_other_user_returns_not_found() {
        let connection = get_test_connection();
        let ada = insert_test_user("ada@example.com", &connection);
        let bob = insert_test_user("bob@example.com", &connection);
        let category = insert_category("Rent", CategoryType::Expense, ada.id, &connection);

        let result = delete_category(category.id, bob.id, &connection);

        assert_eq!(result, Err(Error::CategoryNotFound));
    }
}
