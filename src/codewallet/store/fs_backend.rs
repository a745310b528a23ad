use super::backend::StorageBackend;
use super::StorageKey;
use crate::error::{Result, WalletError};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Filesystem backend: one JSON file per record inside a data directory.
///
/// ```text
/// <data_dir>/
/// ├── code-wallet-fragments.json
/// ├── code-wallet-tags.json
/// ├── code-wallet-tag-colors.json
/// └── code-wallet-theme.json
/// ```
#[derive(Debug, Clone)]
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, key: StorageKey) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(WalletError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn read(&self, key: StorageKey) -> Result<Option<String>> {
        let path = self.record_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(WalletError::Io)?;
        Ok(Some(content))
    }

    fn write(&self, key: StorageKey, content: &str) -> Result<()> {
        self.ensure_dir()?;

        let target = self.record_path(key);

        // Atomic write
        let tmp = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp, content).map_err(WalletError::Io)?;
        fs::rename(&tmp, target).map_err(WalletError::Io)?;

        Ok(())
    }

    fn location(&self, key: StorageKey) -> PathBuf {
        self.record_path(key)
    }
}
