use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// String-keyed persistence for the few values the booking flow keeps
/// between pages
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    fn remove(&self, key: &str) -> StoreResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Rc<T> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}

/// In-process store for a single page session
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.get("paymentMethod").unwrap().is_none());

        store.set("paymentMethod", "card").unwrap();
        assert_eq!(store.get("paymentMethod").unwrap().as_deref(), Some("card"));

        store.set("paymentMethod", "cash").unwrap();
        assert_eq!(store.len(), 1);

        store.remove("paymentMethod").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_shared_handle_sees_writes() {
        let store = Rc::new(MemoryStore::new());
        let other: Rc<dyn KeyValueStore> = store.clone();

        other.set("cartSubtotal", "1335").unwrap();
        assert_eq!(store.get("cartSubtotal").unwrap().as_deref(), Some("1335"));
    }
}
