//! Durable cart storage.
//!
//! The cart persists in a single named slot, read once at session start
//! and rewritten after every mutation. Reads never fail: absent or corrupt
//! data seeds an empty cart so the session always starts valid.

use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, warn};

use super::CartEntry;

/// Failure writing the durable slot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Slot write failed at the filesystem.
    #[error("cart slot write failed: {0}")]
    Io(#[from] io::Error),

    /// The entries could not be serialized.
    #[error("cart serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Durable slot for the serialized cart.
pub trait CartStorage {
    /// Read the persisted entries. Absent or corrupt data yields an empty
    /// collection, never an error.
    fn load(&self) -> Vec<CartEntry>;

    /// Replace the slot contents with `entries`.
    ///
    /// # Errors
    ///
    /// Serialization or write failure; the caller decides whether that is
    /// fatal (the cart treats it as a logged warning).
    fn save(&mut self, entries: &[CartEntry]) -> Result<(), StorageError>;
}

/// File-backed slot holding the cart as a JSON document.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Create a slot at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CartStorage for JsonFileStorage {
    fn load(&self) -> Vec<CartEntry> {
        let Ok(raw) = fs::read_to_string(&self.path) else {
            debug!(path = %self.path.display(), "No persisted cart, starting empty");
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    error = %e,
                    path = %self.path.display(),
                    "Persisted cart is corrupt, starting empty"
                );
                Vec::new()
            }
        }
    }

    fn save(&mut self, entries: &[CartEntry]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(entries)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

/// In-memory slot for tests and sessions without durable storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Vec<CartEntry>,
}

impl CartStorage for MemoryStorage {
    fn load(&self) -> Vec<CartEntry> {
        self.entries.clone()
    }

    fn save(&mut self, entries: &[CartEntry]) -> Result<(), StorageError> {
        self.entries = entries.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use speedparts_core::ProductId;

    use super::*;

    fn slot_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("speedparts-{}-{name}.json", std::process::id()))
    }

    fn cleanup(path: &Path) {
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_file_round_trip() {
        let path = slot_path("round-trip");
        let entries = vec![
            CartEntry {
                id: ProductId::new(1),
                quantity: 2,
            },
            CartEntry {
                id: ProductId::new(7),
                quantity: 1,
            },
        ];

        let mut storage = JsonFileStorage::new(&path);
        storage.save(&entries).expect("save");
        assert_eq!(storage.load(), entries);

        cleanup(&path);
    }

    #[test]
    fn test_absent_slot_loads_empty() {
        let storage = JsonFileStorage::new(slot_path("absent"));
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_corrupt_slot_loads_empty() {
        let path = slot_path("corrupt");
        fs::write(&path, "{not json").expect("write");

        let storage = JsonFileStorage::new(&path);
        assert!(storage.load().is_empty());

        cleanup(&path);
    }

    #[test]
    fn test_save_overwrites_previous_contents() {
        let path = slot_path("overwrite");
        let mut storage = JsonFileStorage::new(&path);

        storage
            .save(&[CartEntry {
                id: ProductId::new(1),
                quantity: 5,
            }])
            .expect("first save");
        storage.save(&[]).expect("second save");

        assert!(storage.load().is_empty());
        cleanup(&path);
    }
}
