//! File-backed signal store
//!
//! One file per learned (command, action) pair at
//! `commands/<command>/<action>`, hex-encoded. The empty action maps to the
//! fixed file name [`DEFAULT_ACTION`], which is also the action macros
//! replay. Macro scripts live at `macros/<name>` as plain text.
//!
//! The store is deliberately lock-free: the engine executes one command at a
//! time, and concurrent writers to the same key from outside the process are
//! last-writer-wins.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// File name used for signals learned without an explicit action
pub const DEFAULT_ACTION: &str = "default";

/// File-backed repository of captured signals and macro scripts
#[derive(Debug, Clone)]
pub struct SignalStore {
    root: PathBuf,
}

impl SignalStore {
    /// Create a store rooted at the given data directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The data directory this store reads and writes
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the signal file for a (command, action) pair
    pub fn signal_path(&self, command: &str, action: &str) -> PathBuf {
        let action = if action.is_empty() {
            DEFAULT_ACTION
        } else {
            action
        };
        self.root.join("commands").join(command).join(action)
    }

    /// Path of a macro script
    pub fn macro_path(&self, name: &str) -> PathBuf {
        self.root.join("macros").join(name)
    }

    /// Whether a signal has been learned for this pair
    pub fn has(&self, command: &str, action: &str) -> bool {
        self.signal_path(command, action).is_file()
    }

    /// Persist a captured signal, overwriting any previous capture
    pub fn write(&self, command: &str, action: &str, blob: &[u8]) -> Result<(), StoreError> {
        let path = self.signal_path(command, action);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, hex::encode(blob)).map_err(|source| StoreError::Io { path, source })
    }

    /// Load a captured signal
    pub fn read(&self, command: &str, action: &str) -> Result<Vec<u8>, StoreError> {
        let path = self.signal_path(command, action);
        let text = read_text(&path)?;
        hex::decode(text.trim()).map_err(|source| StoreError::Hex { path, source })
    }

    /// Load a macro script, fresh from disk on every call
    pub fn read_macro(&self, name: &str) -> Result<String, StoreError> {
        read_text(&self.macro_path(name))
    }
}

fn read_text(path: &Path) -> Result<String, StoreError> {
    fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            StoreError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            StoreError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, SignalStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SignalStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn round_trips_arbitrary_blobs() {
        let (_dir, store) = temp_store();

        for blob in [
            b"".as_slice(),
            b"\x00\x00\x00",
            b"\x26\x00\x0a\x00\x0d\x1e",
            &[0xff; 64],
        ] {
            store.write("tv_power", "on", blob).unwrap();
            assert_eq!(store.read("tv_power", "on").unwrap(), blob);
        }
    }

    #[test]
    fn empty_action_maps_to_default_file() {
        let (dir, store) = temp_store();

        store.write("tv_power", "", b"\x26\x00").unwrap();
        assert!(dir
            .path()
            .join("commands/tv_power/default")
            .is_file());
        assert!(store.has("tv_power", ""));
        assert!(store.has("tv_power", DEFAULT_ACTION));
        assert_eq!(store.read("tv_power", DEFAULT_ACTION).unwrap(), b"\x26\x00");
    }

    #[test]
    fn stored_file_is_lowercase_hex() {
        let (dir, store) = temp_store();

        store.write("tv_power", "on", b"\xAB\xCD").unwrap();
        let text = fs::read_to_string(dir.path().join("commands/tv_power/on")).unwrap();
        assert_eq!(text, "abcd");
    }

    #[test]
    fn read_trims_surrounding_whitespace() {
        let (dir, store) = temp_store();

        let path = dir.path().join("commands/tv_power/on");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "  26000a00 \n").unwrap();

        assert_eq!(store.read("tv_power", "on").unwrap(), b"\x26\x00\x0a\x00");
    }

    #[test]
    fn missing_signal_is_not_found() {
        let (_dir, store) = temp_store();

        assert!(!store.has("tv_power", "on"));
        let err = store.read("tv_power", "on").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn corrupt_file_is_a_hex_error() {
        let (dir, store) = temp_store();

        let path = dir.path().join("commands/tv_power/on");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not hex at all").unwrap();

        assert!(matches!(
            store.read("tv_power", "on"),
            Err(StoreError::Hex { .. })
        ));
    }

    #[test]
    fn write_overwrites_previous_capture() {
        let (_dir, store) = temp_store();

        store.write("tv_power", "on", b"old").unwrap();
        store.write("tv_power", "on", b"new").unwrap();
        assert_eq!(store.read("tv_power", "on").unwrap(), b"new");
    }

    #[test]
    fn macros_are_read_fresh_each_time() {
        let (dir, store) = temp_store();

        let path = dir.path().join("macros/evening");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "tv_power\n").unwrap();
        assert_eq!(store.read_macro("evening").unwrap(), "tv_power\n");

        fs::write(&path, "tv_power\npause 500\n").unwrap();
        assert_eq!(store.read_macro("evening").unwrap(), "tv_power\npause 500\n");
    }

    #[test]
    fn missing_macro_is_not_found() {
        let (_dir, store) = temp_store();
        assert!(store.read_macro("evening").unwrap_err().is_not_found());
    }
}
