use super::StorageKey;
use crate::error::Result;
use std::path::PathBuf;
use std::rc::Rc;

/// Abstract interface for raw record I/O.
///
/// This trait handles the "how" of storage (filesystem vs memory), while
/// [`super::Persistence`] handles serialization and failure policy and
/// [`super::fragment_store::FragmentStore`] handles the business rules.
pub trait StorageBackend {
    /// Read the raw text stored under `key`.
    /// Returns Ok(None) if nothing was ever written there.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn read(&self, key: StorageKey) -> Result<Option<String>>;

    /// Replace the text stored under `key`.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn write(&self, key: StorageKey, content: &str) -> Result<()>;

    /// Where the record lives. For FsBackend this is the real path, for
    /// MemBackend a virtual one.
    fn location(&self, key: StorageKey) -> PathBuf;
}

// Lets the fragment store and the theme store share one backend.
impl<B: StorageBackend + ?Sized> StorageBackend for Rc<B> {
    fn read(&self, key: StorageKey) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: StorageKey, content: &str) -> Result<()> {
        (**self).write(key, content)
    }

    fn location(&self, key: StorageKey) -> PathBuf {
        (**self).location(key)
    }
}
