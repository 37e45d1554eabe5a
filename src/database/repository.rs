use async_trait::async_trait;
use thiserror::Error;

use crate::models::Entity;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Record already exists: {0}")]
    AlreadyExists(String),
}

/// Storage boundary for one entity type. Implementations must be safe to
/// share across concurrent requests.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    async fn add(&self, entity: T) -> Result<T, RepositoryError>;

    async fn get(&self, id: &str) -> Option<T>;

    async fn get_all(&self) -> Vec<T>;

    /// Replace the stored entity with the same id.
    async fn update(&self, entity: T) -> Result<T, RepositoryError>;

    async fn delete(&self, id: &str) -> Result<T, RepositoryError>;

    /// First entity matching the predicate, in insertion order.
    async fn find_by(&self, predicate: &(dyn for<'a> Fn(&'a T) -> bool + Send + Sync)) -> Option<T>;

    /// Every entity matching the predicate, in insertion order.
    async fn filter(&self, predicate: &(dyn for<'a> Fn(&'a T) -> bool + Send + Sync)) -> Vec<T>;
}
