mod errors;
mod memory_store;

use std::future::Future;

use crate::models::{Owner, Transaction, TransactionDraft};

pub use errors::StoreError;
pub use memory_store::MemoryStore;

/// The remote data service that owns transaction records.
///
/// Every call may be slow or fail; callers never assume a mutation landed
/// until the returned future resolves to `Ok`.
pub trait TransactionStore: Send + Sync + 'static {
    /// Transactions belonging to `owner_id`, oldest first.
    fn list(&self, owner_id: &str) -> impl Future<Output = Result<Vec<Transaction>, StoreError>> + Send;

    fn create(&self, owner: &Owner, draft: TransactionDraft) -> impl Future<Output = Result<Transaction, StoreError>> + Send;

    /// Fully replaces the editable fields of transaction `id`.
    fn update(&self, id: &str, draft: TransactionDraft) -> impl Future<Output = Result<Transaction, StoreError>> + Send;

    fn delete(&self, id: &str) -> impl Future<Output = Result<(), StoreError>> + Send;
}
