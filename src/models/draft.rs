use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::errors::ValidationError;
use crate::models::{categories_for, is_catalog_category, Transaction, TransactionType};
use crate::types::OwnerId;

/// The authenticated user a new transaction is recorded for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub id: OwnerId,
    pub email: Option<String>,
    pub name: Option<String>
}

/// User supplied transaction fields, used both to create a record and to
/// fully replace the editable fields of an existing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: String,
    pub amount: Decimal,
    pub description: Option<String>,
    pub date: Option<NaiveDateTime>
}

impl TransactionDraft {
    /// Copies the editable fields out of a stored transaction.
    pub fn from_transaction(transaction: &Transaction) -> Self {
        Self {
            transaction_type: transaction.transaction_type,
            category: transaction.category.clone(),
            amount: transaction.amount,
            description: transaction.description.clone(),
            date: transaction.date
        }
    }

    /// Checks the draft before it is sent to the store.
    ///
    /// Labels outside the built-in catalog are accepted as-is; catalog labels
    /// must belong to the draft's type (e.g. "Salary" only for income).
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(self.amount))
        }

        let category = self.category.trim();

        if category.is_empty() {
            return Err(ValidationError::MissingCategory)
        }

        if is_catalog_category(category) && !categories_for(self.transaction_type).contains(&category) {
            return Err(ValidationError::CategoryNotAllowed {
                category: category.to_string(),
                transaction_type: self.transaction_type
            })
        }

        if self.date.is_none() {
            return Err(ValidationError::MissingDate)
        }

        Ok(())
    }
}
