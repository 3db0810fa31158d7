use crate::engine::errors::FilterError;
use crate::models::{Transaction, TransactionType};
use rust_decimal::Decimal;
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use std::collections::{HashMap, HashSet};
use std::str::FromStr;

/// Which transaction types a category breakdown counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeRestriction {
    #[default]
    Any,
    OnlyIncome,
    OnlyExpense
}

impl TypeRestriction {
    pub fn admits(&self, transaction_type: TransactionType) -> bool {
        match self {
            TypeRestriction::Any => true,
            TypeRestriction::OnlyIncome => transaction_type == TransactionType::Income,
            TypeRestriction::OnlyExpense => transaction_type == TransactionType::Expense
        }
    }
}

impl FromStr for TypeRestriction {
    type Err = FilterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "any" | "all" => Ok(TypeRestriction::Any),
            "income" => Ok(TypeRestriction::OnlyIncome),
            "expense" => Ok(TypeRestriction::OnlyExpense),
            _ => Err(FilterError::InvalidRestriction(value.to_string()))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CategoryTotal {
    pub total: Decimal,
    pub count: usize
}

/// Per-category totals in order of first appearance.
///
/// Only categories that occur in the input are present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTotals {
    entries: Vec<(String, CategoryTotal)>,
    index: HashMap<String, usize>
}

impl CategoryTotals {
    pub fn get(&self, category: &str) -> Option<&CategoryTotal> {
        self.index.get(category).map(|&position| &self.entries[position].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryTotal)> {
        self.entries.iter().map(|(category, total)| (category.as_str(), total))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn grand_total(&self) -> Decimal {
        self.entries.iter().map(|(_, total)| total.total).sum()
    }

    /// Entries by descending total, then descending count, then name.
    pub fn ranked(&self) -> Vec<(&str, &CategoryTotal)> {
        let mut ranked: Vec<(&str, &CategoryTotal)> = self.iter().collect();

        ranked.sort_by(|(left_name, left), (right_name, right)| {
            right.total.cmp(&left.total)
                .then_with(|| right.count.cmp(&left.count))
                .then_with(|| left_name.cmp(right_name))
        });

        ranked
    }

    fn add(&mut self, category: &str, amount: Decimal) {
        let position = match self.index.get(category) {
            Some(&position) => position,
            None => {
                self.entries.push((category.to_string(), CategoryTotal::default()));
                self.index.insert(category.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };

        let entry = &mut self.entries[position].1;
        entry.total += amount;
        entry.count += 1;
    }
}

impl Serialize for CategoryTotals {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(Serialize)]
        struct Entry<'a> {
            category: &'a str,
            total: Decimal,
            count: usize
        }

        let mut sequence = serializer.serialize_seq(Some(self.entries.len()))?;

        for (category, total) in &self.entries {
            sequence.serialize_element(&Entry { category, total: total.total, count: total.count })?;
        }

        sequence.end()
    }
}

/// Sums amounts per category over the transactions admitted by `restriction`.
pub fn aggregate_by_category<'a, I>(transactions: I, restriction: TypeRestriction) -> CategoryTotals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals = CategoryTotals::default();

    for transaction in transactions {
        if restriction.admits(transaction.transaction_type) {
            totals.add(&transaction.category, transaction.amount);
        }
    }

    totals
}

/// Distinct category labels in order of first appearance.
pub fn categories_present(transactions: &[Transaction]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut categories = Vec::new();

    for transaction in transactions {
        if seen.insert(transaction.category.as_str()) {
            categories.push(transaction.category.clone());
        }
    }

    categories
}
