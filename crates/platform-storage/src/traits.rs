//! Storage traits for the record store abstraction layer.

use async_trait::async_trait;

use crate::error::StorageError;
use crate::types::DomainRecord;

/// Keyed access to the external copy of each domain.
///
/// Implementations hold at most one record per id and must be thread-safe
/// (`Send + Sync`). None of the operations retry internally; every error is
/// surfaced to the caller.
///
/// # Example
///
/// ```ignore
/// use platform_storage::{DomainRecord, RecordStore, StorageError};
///
/// async fn upsert(store: &dyn RecordStore, record: &DomainRecord) -> Result<(), StorageError> {
///     match store.get(&record.id).await? {
///         Some(_) => store.update(record).await,
///         None => store.create(record).await,
///     }
/// }
/// ```
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Reads a record by id.
    ///
    /// Returns `None` if the record does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure issues, not for missing records.
    async fn get(&self, id: &str) -> Result<Option<DomainRecord>, StorageError>;

    /// Inserts a new record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::AlreadyExists` if a record with the same id exists.
    async fn create(&self, record: &DomainRecord) -> Result<(), StorageError>;

    /// Overwrites the environments of an existing record.
    ///
    /// This is a full replacement with no concurrency token; the last writer wins.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the record does not exist.
    async fn update(&self, record: &DomainRecord) -> Result<(), StorageError>;

    /// Deletes a record by id.
    ///
    /// Deleting an absent record succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure issues.
    async fn delete(&self, id: &str) -> Result<(), StorageError>;

    /// Returns the name of this storage backend.
    fn backend_name(&self) -> &'static str;
}
