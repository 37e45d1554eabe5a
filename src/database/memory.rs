use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::repository::{Repository, RepositoryError};
use crate::models::Entity;

/// In-memory store keeping insertion order so listings are stable.
pub struct InMemoryRepository<T> {
    inner: RwLock<Store<T>>,
}

struct Store<T> {
    order: Vec<String>,
    records: HashMap<String, T>,
}

impl<T: Entity> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Store {
                order: Vec::new(),
                records: HashMap::new(),
            }),
        }
    }
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Store<T> {
    fn ordered(&self) -> impl Iterator<Item = &T> {
        self.order.iter().filter_map(|id| self.records.get(id))
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    async fn add(&self, entity: T) -> Result<T, RepositoryError> {
        let mut store = self.inner.write().await;
        let id = entity.id().to_string();
        if store.records.contains_key(&id) {
            return Err(RepositoryError::AlreadyExists(id));
        }
        store.order.push(id.clone());
        store.records.insert(id, entity.clone());
        Ok(entity)
    }

    async fn get(&self, id: &str) -> Option<T> {
        self.inner.read().await.records.get(id).cloned()
    }

    async fn get_all(&self) -> Vec<T> {
        self.inner.read().await.ordered().cloned().collect()
    }

    async fn update(&self, entity: T) -> Result<T, RepositoryError> {
        let mut store = self.inner.write().await;
        match store.records.get_mut(entity.id()) {
            Some(slot) => {
                *slot = entity.clone();
                Ok(entity)
            }
            None => Err(RepositoryError::NotFound(entity.id().to_string())),
        }
    }

    async fn delete(&self, id: &str) -> Result<T, RepositoryError> {
        let mut store = self.inner.write().await;
        let removed = store
            .records
            .remove(id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        store.order.retain(|existing| existing != id);
        Ok(removed)
    }

    async fn find_by(&self, predicate: &(dyn for<'a> Fn(&'a T) -> bool + Send + Sync)) -> Option<T> {
        self.inner.read().await.ordered().find(|e| predicate(e)).cloned()
    }

    async fn filter(&self, predicate: &(dyn for<'a> Fn(&'a T) -> bool + Send + Sync)) -> Vec<T> {
        self.inner.read().await.ordered().filter(|e| predicate(e)).cloned().collect()
    }
}
