//! File-backed cart storage.
//!
//! All slots live in one JSON object file (`{"cart": "[...]"}`), the
//! filesystem counterpart of an application-scoped key/value store. Writes
//! go to a sibling temp file which is then renamed over the original, so a
//! crash mid-write never leaves a half-written file behind.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::warn;

use tiendita_core::{CartStore, StoreError};

type Slots = BTreeMap<String, String>;

/// A [`CartStore`] persisted to a single JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Use `path` as the backing file. Nothing is read or created yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_slots(&self) -> Result<Slots, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Slots::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Slots::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    /// Like `read_slots`, but a corrupt file counts as empty.
    fn read_slots_lenient(&self) -> Result<Slots, StoreError> {
        match self.read_slots() {
            Err(StoreError::Format(e)) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring corrupt storage file");
                Ok(Slots::new())
            }
            other => other,
        }
    }

    fn write_slots(&self, slots: &Slots) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(slots)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl CartStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_slots_lenient()?.remove(key))
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut slots = self.read_slots_lenient()?;
        slots.insert(key.to_owned(), value.to_owned());
        self.write_slots(&slots)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let mut slots = self.read_slots_lenient()?;
        if slots.remove(key).is_some() {
            self.write_slots(&slots)?;
        }
        Ok(())
    }
}
