use std::collections::HashMap;

use uuid::Uuid;

/// read/replace-by-id persistence boundary for ledger entities
///
/// the engine never talks to the store itself; the enclosing handler loads an
/// entity, calls a calculator, and persists the returned state. that
/// read-compute-write cycle needs document-level atomicity; the trait carries
/// no locking, so serializing mutations per entity id is the caller's
/// obligation.
pub trait EntityStore<T> {
    fn get(&self, id: Uuid) -> Option<T>;
    fn insert(&mut self, id: Uuid, entity: T);
    fn replace(&mut self, id: Uuid, entity: T) -> Option<T>;
    fn remove(&mut self, id: Uuid) -> Option<T>;
}

/// hashmap-backed store for tests, demos, and simple deployments
#[derive(Debug, Default)]
pub struct InMemoryStore<T> {
    entities: HashMap<Uuid, T>,
}

impl<T> InMemoryStore<T> {
    pub fn new() -> Self {
        Self {
            entities: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl<T: Clone> EntityStore<T> for InMemoryStore<T> {
    fn get(&self, id: Uuid) -> Option<T> {
        self.entities.get(&id).cloned()
    }

    fn insert(&mut self, id: Uuid, entity: T) {
        self.entities.insert(id, entity);
    }

    fn replace(&mut self, id: Uuid, entity: T) -> Option<T> {
        self.entities.insert(id, entity)
    }

    fn remove(&mut self, id: Uuid) -> Option<T> {
        self.entities.remove(&id)
    }
}
