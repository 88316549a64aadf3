//! Database queries for transactions.
//!
//! Transactions are read back joined with their category. The join is a left join because a
//! category can be deleted while transactions still refer to it.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    category::{Category, CategoryName},
    database_id::{CategoryId, TransactionId},
    date_time,
    pagination::Page,
    transaction::{NewTransaction, Transaction},
    user::UserID,
};

const SELECT_TRANSACTION: &str = "SELECT t.id, t.type, t.category_id, c.id, c.name, c.type,
        t.amount, t.description, t.date
    FROM \"transaction\" t
    LEFT JOIN category c ON c.id = t.category_id AND c.user_id = t.user_id";

/// Create a new transaction in the database.
///
/// If `new_transaction.date` is `None` the transaction is dated now.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is some SQL error.
pub fn create_transaction(
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let date = new_transaction.date.unwrap_or_else(date_time::now);

    let id: TransactionId = connection
        .prepare(
            "INSERT INTO \"transaction\" (user_id, type, category_id, amount, description, date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id",
        )?
        .query_row(
            (
                new_transaction.user_id.as_i64(),
                new_transaction.transaction_type,
                new_transaction.category_id,
                new_transaction.amount,
                new_transaction.description,
                date_time::normalize(date),
            ),
            |row| row.get(0),
        )?;

    get_transaction(id, new_transaction.user_id, connection)
}

/// Retrieve a transaction owned by `user_id`.
///
/// # Errors
/// This function will return a:
/// - [Error::TransactionNotFound] if `id` does not refer to a transaction owned by `user_id`,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(
    id: TransactionId,
    user_id: UserID,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection
        .prepare(&format!(
            "{SELECT_TRANSACTION} WHERE t.id = :id AND t.user_id = :user_id"
        ))?
        .query_row(
            &[(":id", &id), (":user_id", &user_id.as_i64())],
            map_transaction_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::TransactionNotFound,
            error => error.into(),
        })
}

/// Retrieve one page of the transactions owned by `user_id`, newest first.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is some SQL error.
pub fn get_transactions_page(
    user_id: UserID,
    page: Page,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let limit = i64::try_from(page.limit).unwrap_or(i64::MAX);
    let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);

    connection
        .prepare(&format!(
            "{SELECT_TRANSACTION} WHERE t.user_id = ?1
             ORDER BY t.date DESC, t.id DESC
             LIMIT ?2 OFFSET ?3"
        ))?
        .query_map((user_id.as_i64(), limit, offset), map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
        .collect()
}

/// Get the number of transactions owned by `user_id`.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_transactions(user_id: UserID, connection: &Connection) -> Result<u64, Error> {
    let count: i64 = connection.query_row(
        "SELECT COUNT(id) FROM \"transaction\" WHERE user_id = ?1",
        [user_id.as_i64()],
        |row| row.get(0),
    )?;

    Ok(u64::try_from(count).unwrap_or_default())
}

/// Get the number of `user_id`'s transactions recorded against `category_id`.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_category_transactions(
    category_id: CategoryId,
    user_id: UserID,
    connection: &Connection,
) -> Result<u64, Error> {
    let count: i64 = connection.query_row(
        "SELECT COUNT(id) FROM \"transaction\" WHERE category_id = ?1 AND user_id = ?2",
        (category_id, user_id.as_i64()),
        |row| row.get(0),
    )?;

    Ok(u64::try_from(count).unwrap_or_default())
}

/// Replace the fields of a transaction owned by `transaction.user_id`.
///
/// If `transaction.date` is `None` the stored date is kept.
///
/// # Errors
/// This function will return a:
/// - [Error::TransactionNotFound] if `id` does not refer to a transaction owned by the user,
/// - or [Error::SqlError] there is some other SQL error.
pub fn update_transaction(
    id: TransactionId,
    transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let rows_affected = connection.execute(
        "UPDATE \"transaction\"
         SET type = ?1, category_id = ?2, amount = ?3, description = ?4, date = COALESCE(?5, date)
         WHERE id = ?6 AND user_id = ?7",
        (
            transaction.transaction_type,
            transaction.category_id,
            transaction.amount,
            transaction.description,
            transaction.date.map(date_time::normalize),
            id,
            transaction.user_id.as_i64(),
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::TransactionNotFound);
    }

    get_transaction(id, transaction.user_id, connection)
}

/// Delete a transaction owned by `user_id`.
///
/// # Errors
/// This function will return a:
/// - [Error::TransactionNotFound] if `id` does not refer to a transaction owned by `user_id`,
/// - or [Error::SqlError] there is some other SQL error.
pub fn delete_transaction(
    id: TransactionId,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM \"transaction\" WHERE id = ?1 AND user_id = ?2",
        (id, user_id.as_i64()),
    )?;

    if rows_affected == 0 {
        return Err(Error::TransactionNotFound);
    }

    Ok(())
}

/// Create the transaction table in the database.
///
/// `category_id` has no foreign key, so deleting a category leaves its transactions in place.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            type TEXT NOT NULL CHECK (type IN ('income', 'expense')),
            category_id INTEGER NOT NULL,
            amount REAL NOT NULL CHECK (amount > 0),
            description TEXT NOT NULL,
            date TEXT NOT NULL,
            FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_transaction_user_date ON \"transaction\"(user_id, date);",
    )?;

    Ok(())
}

/// Map a row selected with `SELECT_TRANSACTION` to a [Transaction].
fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let transaction_type = row.get(1)?;
    let category_id = row.get(2)?;
    let category = match row.get::<_, Option<CategoryId>>(3)? {
        Some(id) => {
            let raw_name: String = row.get(4)?;

            Some(Category {
                id,
                name: CategoryName::new_unchecked(&raw_name),
                category_type: row.get(5)?,
            })
        }
        None => None,
    };
    let amount = row.get(6)?;
    let description = row.get(7)?;
    let date = row.get(8)?;

    Ok(Transaction {
        id,
        transaction_type,
        category_id,
        category,
        amount,
        description,
        date,
    })
}
