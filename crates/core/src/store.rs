use std::{
    collections::HashMap,
    marker::PhantomData,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("encode: {0}")]
    Encode(serde_json::Error),
    #[error("decode: {0}")]
    Decode(serde_json::Error),
}

/// Raw key -> string capability backing all persisted values.
pub trait Store: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Whether a persisted value has been read yet.
///
/// `Uninitialized` and `Loading` both mean "unknown"; only `Ready` carries a
/// value, so nothing can render a default in place of the stored one.
#[derive(Debug, Default)]
pub enum Hydration<T> {
    #[default]
    Uninitialized,
    Loading,
    Ready(T),
}

impl<T> Hydration<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Hydration::Ready(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Hydration::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            Hydration::Ready(v) => Some(v),
            _ => None,
        }
    }
}

/// Typed JSON view over a single key of a [`Store`].
pub struct Persisted<T> {
    store: Arc<dyn Store>,
    key: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Persisted<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            key: self.key.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Serialize + DeserializeOwned> Persisted<T> {
    pub fn new(store: Arc<dyn Store>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            _marker: PhantomData,
        }
    }

    pub fn try_load(&self) -> Result<Option<T>, StoreError> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(None);
        };
        let v = serde_json::from_str(&raw).map_err(StoreError::Decode)?;
        Ok(Some(v))
    }

    /// Read the stored value; anything other than a clean decode yields `default`.
    pub fn load_or(&self, default: T) -> T {
        match self.try_load() {
            Ok(Some(v)) => {
                debug!(target: "core", "loaded '{}'", self.key);
                v
            }
            Ok(None) => {
                debug!(target: "core", "'{}' absent, using default", self.key);
                default
            }
            Err(e) => {
                warn!(target: "core", "load '{}' failed, using default: {}", self.key, e);
                default
            }
        }
    }

    pub fn save(&self, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value).map_err(StoreError::Encode)?;
        self.store.set(&self.key, &raw)
    }

    /// Write and log on failure. Returns whether the write landed.
    pub fn save_best_effort(&self, value: &T) -> bool {
        match self.save(value) {
            Ok(()) => true,
            Err(e) => {
                warn!(target: "core", "save '{}' failed, keeping in-memory state: {}", self.key, e);
                false
            }
        }
    }
}

/// Process-local store. Used as the fake in tests and as a fallback when no
/// durable location exists.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, key: &str, value: &str) -> Self {
        if let Ok(mut m) = self.values.lock() {
            m.insert(key.to_string(), value.to_string());
        }
        self
    }

    /// Make every subsequent `get` fail, as a revoked or unreadable medium would.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::Relaxed);
    }

    /// Make every subsequent `set` fail, as a full or revoked medium would.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.fail_reads.load(Ordering::Relaxed) {
            return Err(StoreError::Unavailable("reads disabled".into()));
        }
        let m = self
            .values
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store poisoned".into()))?;
        Ok(m.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(StoreError::Unavailable("writes disabled".into()));
        }
        let mut m = self
            .values
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store poisoned".into()))?;
        m.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
