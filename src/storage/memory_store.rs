use crate::models::{Owner, Transaction, TransactionDraft};
use crate::storage::{StoreError, TransactionStore};
use crate::types::TransactionId;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;
use uuid::Uuid;

/// An in-process [`TransactionStore`] keyed by transaction id.
pub struct MemoryStore {
    records: DashMap<TransactionId, (u64, Transaction)>,
    sequence: AtomicU64
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            sequence: AtomicU64::new(0)
        }
    }

    /// Loads already-validated transactions as-is, keeping their ids.
    pub fn import(&self, transactions: impl IntoIterator<Item = Transaction>) {
        for transaction in transactions {
            let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
            self.records.insert(transaction.id.clone(), (sequence, transaction));
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionStore for MemoryStore {
    async fn list(&self, owner_id: &str) -> Result<Vec<Transaction>, StoreError> {
        let mut owned: Vec<(u64, Transaction)> = self.records.iter()
            .filter(|record| record.value().1.owner_id.as_deref() == Some(owner_id))
            .map(|record| record.value().clone())
            .collect();

        owned.sort_by_key(|(sequence, _)| *sequence);

        Ok(owned.into_iter().map(|(_, transaction)| transaction).collect())
    }

    async fn create(&self, owner: &Owner, draft: TransactionDraft) -> Result<Transaction, StoreError> {
        draft.validate()?;

        let transaction = Transaction {
            id: Uuid::new_v4().to_string(),
            transaction_type: draft.transaction_type,
            category: draft.category.trim().to_string(),
            amount: draft.amount,
            description: draft.description,
            date: draft.date,
            owner_id: Some(owner.id.clone()),
            owner_email: owner.email.clone(),
            owner_name: owner.name.clone()
        };

        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        self.records.insert(transaction.id.clone(), (sequence, transaction.clone()));

        debug!("Created transaction [{}] for owner [{}]", transaction.id, owner.id);

        Ok(transaction)
    }

    async fn update(&self, id: &str, draft: TransactionDraft) -> Result<Transaction, StoreError> {
        draft.validate()?;

        let mut record = self.records.get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        record.value_mut().1.apply(&draft);

        debug!("Updated transaction [{id}]");

        Ok(record.value().1.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.records.remove(id)
            .map(|_| debug!("Deleted transaction [{id}]"))
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}
