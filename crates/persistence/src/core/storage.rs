//! Core record storage trait.
//!
//! This module defines the [`RecordStorage`] trait, which provides the CRUD
//! operations the service performs against its relational store. Operations
//! are generic over the [`Resource`] being stored, so one implementation
//! serves every record type.

use async_trait::async_trait;

use crate::core::Resource;
use crate::error::StorageResult;
use crate::types::Attributes;

/// Core storage trait for records.
///
/// Every operation returns an explicit [`StorageResult`]. Expected outcomes
/// (a missing record, a rejected field set) are reported as
/// [`StorageError::Resource`](crate::error::StorageError::Resource) and
/// [`StorageError::Validation`](crate::error::StorageError::Validation);
/// anything else means the store itself failed.
///
/// # Example
///
/// ```ignore
/// use hospital_persistence::core::RecordStorage;
/// use hospital_persistence::types::Doctor;
/// use serde_json::json;
///
/// async fn example<S: RecordStorage>(storage: &S) -> StorageResult<()> {
///     let attrs = json!({"given_name": "Ada", "surname": "Lovelace"});
///     let doctor: Doctor = storage.create(attrs.as_object().unwrap()).await?;
///
///     let found = storage.find::<Doctor>(doctor.id).await?;
///     assert!(found.is_some());
///
///     storage.delete::<Doctor>(doctor.id).await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait RecordStorage: Send + Sync {
    /// Returns a human-readable name for this storage backend.
    fn backend_name(&self) -> &'static str;

    /// Returns every record of type `R`, ordered by ascending id.
    async fn list<R: Resource>(&self) -> StorageResult<Vec<R>>;

    /// Reads one record by id.
    ///
    /// Returns `Ok(None)` if no such record exists.
    async fn find<R: Resource>(&self, id: i64) -> StorageResult<Option<R>>;

    /// Validates and inserts a new record.
    ///
    /// `attrs` must already be whitelisted; keys that are not writable
    /// columns are ignored. The store assigns the id and both timestamps.
    ///
    /// # Errors
    ///
    /// * `StorageError::Validation` - If any field is rejected; nothing is written
    async fn create<R: Resource>(&self, attrs: &Attributes) -> StorageResult<R>;

    /// Merges `attrs` over `current`, validates the result and saves it.
    ///
    /// Fields absent from `attrs` keep their current value. `updated_at` is
    /// refreshed; `created_at` is never touched.
    ///
    /// # Errors
    ///
    /// * `StorageError::Resource(NotFound)` - If the record was removed meanwhile
    /// * `StorageError::Validation` - If the merged record is rejected
    async fn update<R: Resource>(&self, current: &R, attrs: &Attributes) -> StorageResult<R>;

    /// Permanently removes a record.
    ///
    /// # Errors
    ///
    /// * `StorageError::Resource(NotFound)` - If the record doesn't exist
    /// * `StorageError::Validation` - If other records still reference it
    async fn delete<R: Resource>(&self, id: i64) -> StorageResult<()>;

    /// Counts records of type `R`.
    async fn count<R: Resource>(&self) -> StorageResult<u64>;
}
