//! Defines the transaction models and the request bodies used to create and update them.

use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, Time};

use crate::{
    Error,
    category::{Category, CategoryName, CategoryType},
    database_id::{CategoryId, TransactionId},
    date_time::{self, parse_date_time},
    user::UserID,
};

/// An expense or income, i.e. an event where money was either spent or earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// Whether money was earned or spent.
    #[serde(rename = "type")]
    pub transaction_type: CategoryType,
    /// The ID of the category the transaction was recorded against.
    pub category_id: CategoryId,
    /// The category the transaction was recorded against, or `None` if it has since been
    /// deleted.
    pub category: Option<Category>,
    /// The amount of money spent or earned. Always positive.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// When the transaction happened.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

/// The data needed to store a transaction for a user.
///
/// The category must already have been checked to belong to `user_id` and to have the same type
/// as the transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// The user that owns the transaction.
    pub user_id: UserID,
    /// Whether money was earned or spent.
    pub transaction_type: CategoryType,
    /// The category the transaction is recorded against.
    pub category_id: CategoryId,
    /// The amount of money spent or earned.
    pub amount: f64,
    /// What the transaction was for.
    pub description: String,
    /// When the transaction happened. `None` means now when creating, and unchanged when
    /// updating.
    pub date: Option<OffsetDateTime>,
}

/// How a request refers to a category: by its ID or by its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    /// The category's ID.
    Id(CategoryId),
    /// The category's name. Paired with the transaction type to find the category.
    Name(String),
}

/// The request body for creating or updating a transaction.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TransactionFormData {
    /// Either "income" or "expense".
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    /// The category to record the transaction against.
    pub category: Option<CategoryRef>,
    /// The amount of money, must be greater than zero.
    pub amount: Option<f64>,
    /// What the transaction was for.
    pub description: Option<String>,
    /// A date (YYYY-MM-DD) or RFC 3339 timestamp.
    pub date: Option<String>,
}

/// A transaction request that has passed validation but whose category has not been resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedTransactionForm {
    pub transaction_type: CategoryType,
    pub category: ValidatedCategoryRef,
    pub amount: f64,
    pub description: String,
    pub date: Option<OffsetDateTime>,
}

/// A [CategoryRef] with a validated name.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidatedCategoryRef {
    Id(CategoryId),
    Name(CategoryName),
}

const MISSING_FIELDS_MESSAGE: &str = "All fields of the transaction are required";

impl TransactionFormData {
    /// Check that the required fields are present and well formed.
    ///
    /// # Errors
    /// Returns an [Error::Validation] if a field is missing, blank or malformed, or if the amount
    /// is not a positive number.
    pub fn validate(self) -> Result<ValidatedTransactionForm, Error> {
        let missing = || Error::Validation(MISSING_FIELDS_MESSAGE.to_owned());

        let raw_type = self
            .transaction_type
            .filter(|raw_type| !raw_type.trim().is_empty())
            .ok_or_else(missing)?;
        let category = self.category.ok_or_else(missing)?;
        let amount = self.amount.ok_or_else(missing)?;
        let description = self
            .description
            .map(|description| description.trim().to_owned())
            .filter(|description| !description.is_empty())
            .ok_or_else(missing)?;

        let transaction_type: CategoryType = raw_type.parse()?;

        let category = match category {
            CategoryRef::Id(id) => ValidatedCategoryRef::Id(id),
            CategoryRef::Name(name) => ValidatedCategoryRef::Name(CategoryName::new(&name)?),
        };

        if !amount.is_finite() || amount <= 0.0 {
            return Err(Error::Validation(
                "Amount must be a number greater than zero".to_owned(),
            ));
        }

        let date = match self.date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw_date) => Some(parse_date_time(raw_date, Time::MIDNIGHT, "date")?),
        };

        Ok(ValidatedTransactionForm {
            transaction_type,
            category,
            amount,
            description,
            date,
        })
    }
}

impl ValidatedTransactionForm {
    /// Attach the owner and the resolved category.
    pub fn into_new_transaction(self, user_id: UserID, category_id: CategoryId) -> NewTransaction {
        NewTransaction {
            user_id,
            transaction_type: self.transaction_type,
            category_id,
            amount: self.amount,
            description: self.description,
            date: self.date.map(date_time::normalize),
        }
    }
}
