//! Service traits for data access and readiness probes

use crate::core::entity::Entity;
use crate::core::query::{Listing, PageRequest};
use anyhow::Result;
use async_trait::async_trait;

/// Service trait for managing one entity type
///
/// Implementations provide CRUD operations plus the reference lookups the
/// HTTP layer needs. The API is agnostic to the underlying storage mechanism.
#[async_trait]
pub trait DataService<T: Entity>: Send + Sync {
    /// Store a new entity; the returned copy carries the assigned id
    async fn create(&self, entity: T) -> Result<T>;

    /// Get an entity by ID
    async fn get(&self, id: i64) -> Result<Option<T>>;

    /// List one page of entities, ordered by id
    async fn list(&self, page: PageRequest) -> Result<Listing<T>>;

    /// List entities where any of `fields` references `value`
    ///
    /// Every name in `fields` must be one of `T::indexed_fields()`.
    async fn find_by(&self, fields: &[&str], value: i64, page: PageRequest)
    -> Result<Listing<T>>;

    /// Exact match on an indexed string field
    async fn search(&self, field: &str, value: &str) -> Result<Vec<T>>;

    /// Replace an existing entity
    ///
    /// Fails with `EntityError::NotFound` when no row has this id.
    async fn update(&self, id: i64, entity: T) -> Result<T>;

    /// Delete an entity, returning whether a row was removed
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Check whether an entity exists
    async fn exists(&self, id: i64) -> Result<bool> {
        Ok(self.get(id).await?.is_some())
    }
}

/// Readiness probe for a storage backend
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Name reported in health responses
    fn name(&self) -> &str;

    /// Succeeds when the backend can serve queries
    async fn check(&self) -> Result<()>;
}
