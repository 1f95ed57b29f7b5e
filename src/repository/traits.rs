//! Repository Layer - Core Traits
//!
//! The document store the list engine talks to.
//! Implementations can use SQLite, in-memory, etc.

use async_trait::async_trait;

use crate::domain::{DomainResult, Item, ItemId, ItemPatch, ItemRecord};

/// Shopping item collection
///
/// All operations are async to support remote backends.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// All items, ordered by priority rank then name
    async fn list_all(&self) -> DomainResult<Vec<Item>>;

    /// Insert a new document; the store assigns the id
    async fn create(&self, record: &ItemRecord) -> DomainResult<ItemId>;

    /// Merge `patch` into an existing document
    async fn update(&self, id: &ItemId, patch: &ItemPatch) -> DomainResult<()>;

    /// Delete by id. Deleting a missing id is not an error.
    async fn delete(&self, id: &ItemId) -> DomainResult<()>;

    /// Submit several updates as one unit. Atomicity is up to the backend.
    async fn batch_update(&self, updates: &[(ItemId, ItemPatch)]) -> DomainResult<()>;
}
