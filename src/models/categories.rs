use crate::models::TransactionType;

/// Label given to records that arrive without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Categories offered when adding a transaction.
pub const CATALOG: [&str; 5] = ["Salary", "Food", "Transport", "Shopping", "Other"];

const INCOME_CATEGORIES: [&str; 2] = ["Salary", "Other"];
const EXPENSE_CATEGORIES: [&str; 4] = ["Food", "Transport", "Shopping", "Other"];

pub fn categories_for(transaction_type: TransactionType) -> &'static [&'static str] {
    match transaction_type {
        TransactionType::Income => &INCOME_CATEGORIES,
        TransactionType::Expense => &EXPENSE_CATEGORIES
    }
}

pub fn is_catalog_category(category: &str) -> bool {
    CATALOG.contains(&category)
}
