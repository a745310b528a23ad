use super::backend::StorageBackend;
use super::StorageKey;
use crate::error::{Result, WalletError};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the wallet is single-threaded.
/// This avoids the overhead of `RwLock` while still allowing the
/// `StorageBackend` trait to use `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    records: RefCell<HashMap<StorageKey, String>>,
    simulate_write_error: Cell<bool>,
    fail_writes_for: Cell<Option<StorageKey>>,
    simulate_read_error: Cell<bool>,
    writes: Cell<usize>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Fail writes to `key` only, leaving the other records writable.
    pub fn set_fail_writes_for(&self, key: Option<StorageKey>) {
        self.fail_writes_for.set(key);
    }

    /// Enable read error simulation for testing error handling.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.set(simulate);
    }

    /// Test helper to plant raw (possibly malformed) data under a key.
    pub fn put_raw(&self, key: StorageKey, content: &str) {
        self.records.borrow_mut().insert(key, content.to_string());
    }

    /// Test helper to inspect what was last written under a key.
    pub fn raw(&self, key: StorageKey) -> Option<String> {
        self.records.borrow().get(&key).cloned()
    }

    /// Number of successful writes since creation.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl StorageBackend for MemBackend {
    fn read(&self, key: StorageKey) -> Result<Option<String>> {
        if self.simulate_read_error.get() {
            return Err(WalletError::Store("Simulated read error".to_string()));
        }
        Ok(self.records.borrow().get(&key).cloned())
    }

    fn write(&self, key: StorageKey, content: &str) -> Result<()> {
        if self.simulate_write_error.get() || self.fail_writes_for.get() == Some(key) {
            return Err(WalletError::Store("Simulated write error".to_string()));
        }
        self.records.borrow_mut().insert(key, content.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn location(&self, key: StorageKey) -> PathBuf {
        PathBuf::from(format!("memory://{}", key))
    }
}
