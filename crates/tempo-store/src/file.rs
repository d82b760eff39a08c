//! JSON file store with atomic replace

use std::fs;
use std::path::{Path, PathBuf};

use tempo_core::{ClockStore, PersistedClock, StoreError};

/// Clock store backed by a single JSON file
///
/// The temporary path lives in the same directory as the target so the final
/// rename never crosses a filesystem boundary.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        self.path.with_extension("tmp")
    }
}

impl ClockStore for JsonFileStore {
    fn save(&self, record: &PersistedClock) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(record)
            .map_err(|e| StoreError::Format(e.to_string()))?;

        let tmp = self.tmp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        tracing::debug!(path = %self.path.display(), "saved clock state");
        Ok(())
    }

    fn load(&self) -> Result<Option<PersistedClock>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let record: PersistedClock =
            serde_json::from_str(&raw).map_err(|e| StoreError::Format(e.to_string()))?;

        tracing::debug!(path = %self.path.display(), "loaded clock state");
        Ok(Some(record))
    }
}
