//! # Storage Layer
//!
//! Codewallet keeps its working set in memory and mirrors it to a durable
//! key-value medium. Storage is split in three pieces:
//!
//! - [`backend::StorageBackend`]: raw text I/O per key ("how" to store).
//!   - [`fs_backend::FsBackend`]: one JSON file per key (production).
//!   - [`mem_backend::MemBackend`]: a map in memory (testing).
//! - [`Persistence`]: the adapter. Serializes records as JSON, and owns the
//!   failure policy: reads that find nothing or garbage yield the empty
//!   default, writes that fail are logged and swallowed.
//! - [`fragment_store::FragmentStore`]: the entity store owning fragments,
//!   the tag registry and tag colors.
//!
//! ## Records
//!
//! Each logical collection lives under its own key so that corruption of one
//! never prevents the others from loading:
//!
//! | Key                      | Content                          |
//! |--------------------------|----------------------------------|
//! | `code-wallet-fragments`  | array of fragments               |
//! | `code-wallet-tags`       | array of tag names               |
//! | `code-wallet-tag-colors` | object mapping tag name → color  |
//! | `code-wallet-theme`      | `"dark"` or `"light"`            |
//!
//! ## Write-after-commit
//!
//! Mutations change memory first and flush afterwards. A failed flush leaves
//! the in-memory state authoritative; the adapter flags itself as degraded
//! until the next successful write.

use crate::error::{Result, WalletError};
use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::Cell;

pub mod backend;
pub mod fragment_store;
pub mod fs_backend;
pub mod mem_backend;

pub use backend::StorageBackend;

/// The durable records the wallet knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Fragments,
    Tags,
    TagColors,
    Theme,
}

impl StorageKey {
    pub const ALL: [StorageKey; 4] = [
        StorageKey::Fragments,
        StorageKey::Tags,
        StorageKey::TagColors,
        StorageKey::Theme,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Fragments => "code-wallet-fragments",
            StorageKey::Tags => "code-wallet-tags",
            StorageKey::TagColors => "code-wallet-tag-colors",
            StorageKey::Theme => "code-wallet-theme",
        }
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON persistence over a [`StorageBackend`].
pub struct Persistence<B: StorageBackend> {
    backend: B,
    degraded: Cell<bool>,
}

impl<B: StorageBackend> Persistence<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            degraded: Cell::new(false),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// True when the most recent write failed.
    pub fn is_degraded(&self) -> bool {
        self.degraded.get()
    }

    /// Override the degraded flag after a batch of writes, so one record
    /// failing is not masked by the ones written after it.
    pub fn set_degraded(&self, degraded: bool) {
        self.degraded.set(degraded);
    }

    /// Load a record, falling back to `T::default()` when it is missing,
    /// unreadable or malformed. Failures are logged, never returned.
    pub fn load<T>(&self, key: StorageKey) -> T
    where
        T: DeserializeOwned + Default,
    {
        match self.try_load(key) {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!("No stored record for {}, using empty default", key);
                T::default()
            }
            Err(e) => {
                warn!("Error loading {}: {} (using empty default)", key, e);
                T::default()
            }
        }
    }

    /// Load a record, reporting failures to the caller.
    pub fn try_load<T>(&self, key: StorageKey) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let Some(raw) = self.backend.read(key)? else {
            return Ok(None);
        };
        let value = serde_json::from_str(&raw).map_err(WalletError::Serialization)?;
        Ok(Some(value))
    }

    /// Save a record. Failures are logged and swallowed; the return value
    /// tells whether the write reached the backend.
    pub fn save<T>(&self, key: StorageKey, value: &T) -> bool
    where
        T: Serialize + ?Sized,
    {
        match self.try_save(key, value) {
            Ok(()) => {
                debug!("Flushed {}", key);
                self.degraded.set(false);
                true
            }
            Err(e) => {
                error!("Error saving {}: {} (continuing without durability)", key, e);
                self.degraded.set(true);
                false
            }
        }
    }

    /// Save a record, reporting failures to the caller.
    pub fn try_save<T>(&self, key: StorageKey, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let content = serde_json::to_string_pretty(value).map_err(WalletError::Serialization)?;
        self.backend.write(key, &content)
    }
}
