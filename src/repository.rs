//! Generic entity repository
//!
//! The data store is an external collaborator; the engine only needs
//! find/save/delete against it. The in-memory implementation backs the
//! tests and the CLI's snapshot mode.

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use crate::cache::IndicatorCacheRecord;
use crate::error::{Error, Result};
use crate::models::Organization;

/// Anything with a stable identity the repository can key on.
pub trait Identified {
    fn id(&self) -> Uuid;
}

impl Identified for Organization {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Identified for IndicatorCacheRecord {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Minimal persistence surface the engine depends on.
pub trait EntityRepository<T: Identified> {
    fn find_by_id(&self, id: Uuid) -> Result<Option<T>>;
    fn find_all(&self) -> Result<Vec<T>>;
    /// Insert or replace.
    fn save(&self, entity: &T) -> Result<()>;
    /// Fails with `NotFound` when the id is unknown.
    fn delete(&self, id: Uuid) -> Result<()>;
}

/// HashMap-backed repository. Iteration order of `find_all` is
/// unspecified.
#[derive(Debug, Default)]
pub struct InMemoryRepository<T> {
    entities: RwLock<HashMap<Uuid, T>>,
}

impl<T> InMemoryRepository<T> {
    pub fn new() -> Self {
        InMemoryRepository {
            entities: RwLock::new(HashMap::new()),
        }
    }
}

impl<T: Identified + Clone> EntityRepository<T> for InMemoryRepository<T> {
    fn find_by_id(&self, id: Uuid) -> Result<Option<T>> {
        let entities = self.entities.read().unwrap_or_else(|e| e.into_inner());
        Ok(entities.get(&id).cloned())
    }

    fn find_all(&self) -> Result<Vec<T>> {
        let entities = self.entities.read().unwrap_or_else(|e| e.into_inner());
        Ok(entities.values().cloned().collect())
    }

    fn save(&self, entity: &T) -> Result<()> {
        let mut entities = self.entities.write().unwrap_or_else(|e| e.into_inner());
        entities.insert(entity.id(), entity.clone());
        Ok(())
    }

    fn delete(&self, id: Uuid) -> Result<()> {
        let mut entities = self.entities.write().unwrap_or_else(|e| e.into_inner());
        entities
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| Error::NotFound(format!("no entity with id {id}")))
    }
}
