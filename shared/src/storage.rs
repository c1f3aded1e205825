use parking_lot::RwLock;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("armazenamento local indisponível")]
    Unavailable,
    #[error("falha ao gravar '{key}': {reason}")]
    Write { key: String, reason: String },
}

/// Key/value persistence port (browser `localStorage` in production).
pub trait StoragePort: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str);
}

/// In-memory storage, used by tests and as a fallback when the browser
/// refuses access to `localStorage` (private mode, sandboxed iframes).
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl StoragePort for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.write().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_basic_ops() {
        let storage = MemoryStorage::new();
        assert!(storage.is_empty());

        storage.set("authToken", "abc").unwrap();
        assert_eq!(storage.get("authToken").as_deref(), Some("abc"));

        storage.set("authToken", "def").unwrap();
        assert_eq!(storage.get("authToken").as_deref(), Some("def"));
        assert_eq!(storage.len(), 1);

        storage.remove("authToken");
        assert_eq!(storage.get("authToken"), None);
        storage.remove("missing");
    }
}
