//! JSON Pattern Store
//!
//! File-backed implementation of the reference store contract. Loads never
//! fail the caller: a missing, unreadable, or corrupt file degrades to an
//! empty library. Saves rewrite the whole library through a temporary file
//! and an atomic rename, and serialize against each other.

use super::ReferenceLibrary;
use crate::trace::CanonicalShape;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Reference persistence contract.
///
/// The library is the store's to own; callers receive a snapshot on load
/// and hand shapes back one label at a time.
pub trait PatternStore {
    /// Load the full library. Returns an empty library when nothing is
    /// persisted or the persisted data is unusable; never an error.
    fn load(&self) -> ReferenceLibrary;

    /// Insert or overwrite `label` and persist the whole library.
    fn save(&self, label: &str, shape: &CanonicalShape) -> crate::Result<()>;
}

/// Stores the library as a single JSON file.
pub struct JsonPatternStore {
    path: PathBuf,
    // Saves are read-modify-write of the whole file; concurrent saves
    // would tear each other's updates.
    write_lock: Mutex<()>,
}

impl JsonPatternStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_library(&self) -> ReferenceLibrary {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No reference library on disk; starting empty");
            return ReferenceLibrary::new();
        }

        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Reference library unreadable; treating as empty"
                );
                return ReferenceLibrary::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(library) => library,
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Reference library corrupt; treating as empty"
                );
                ReferenceLibrary::new()
            }
        }
    }
}

impl PatternStore for JsonPatternStore {
    fn load(&self) -> ReferenceLibrary {
        self.read_library()
    }

    fn save(&self, label: &str, shape: &CanonicalShape) -> crate::Result<()> {
        if label.is_empty() {
            return Err(crate::Error::EmptyLabel);
        }

        let _guard = self.write_lock.lock();

        let mut library = self.read_library();
        library.insert(label.to_string(), shape.clone());

        let json = serde_json::to_string_pretty(&library)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    crate::Error::Storage(format!("create {}: {e}", parent.display()))
                })?;
            }
        }

        // Write the new library beside the old one, then swap atomically so
        // a crash mid-write never leaves a truncated file behind.
        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, json)
            .map_err(|e| crate::Error::Storage(format!("write {}: {e}", tmp_path.display())))?;
        std::fs::rename(&tmp_path, &self.path).map_err(|e| {
            crate::Error::Storage(format!("replace {}: {e}", self.path.display()))
        })?;

        debug!(label, entries = library.len(), path = %self.path.display(), "Library saved");
        Ok(())
    }
}
