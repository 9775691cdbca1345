use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::core_api::{CoreError, CoreErrorCode};
use crate::person::SkillLevel;

/// Prior skill levels keyed by person name, one level per skill in
/// [`SkillName::ALL`](crate::person::SkillName::ALL) order.
pub trait SnapshotStore {
    fn load(&self, name: &str) -> Option<Vec<SkillLevel>>;
    fn save(&mut self, name: &str, levels: Vec<SkillLevel>);
}

#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    entries: BTreeMap<String, Vec<SkillLevel>>,
}

impl MemorySnapshotStore {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self, name: &str) -> Option<Vec<SkillLevel>> {
        self.entries.get(name).cloned()
    }

    fn save(&mut self, name: &str, levels: Vec<SkillLevel>) {
        self.entries.insert(name.to_string(), levels);
    }
}

/// JSON file store. Changes stay in memory until [`flush`](Self::flush).
#[derive(Debug, Clone)]
pub struct JsonSnapshotStore {
    path: PathBuf,
    entries: BTreeMap<String, Vec<SkillLevel>>,
    dirty: bool,
}

impl JsonSnapshotStore {
    /// Opens the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).map_err(|e| {
                CoreError::new(
                    CoreErrorCode::Snapshot,
                    format!("invalid snapshot file {}: {e}", path.display()),
                )
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no snapshot file yet");
                BTreeMap::new()
            }
            Err(e) => {
                return Err(CoreError::new(
                    CoreErrorCode::Io,
                    format!("failed to read {}: {e}", path.display()),
                ));
            }
        };
        Ok(Self {
            path,
            entries,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Writes the store back to disk, creating the parent directory if needed.
    /// Does nothing when no entry changed since opening.
    pub fn flush(&mut self) -> Result<(), CoreError> {
        if !self.dirty {
            return Ok(());
        }
        let io_error = |e: std::io::Error| {
            CoreError::new(
                CoreErrorCode::Io,
                format!("failed to write {}: {e}", self.path.display()),
            )
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let text = serde_json::to_string_pretty(&self.entries).map_err(|e| {
            CoreError::new(CoreErrorCode::Snapshot, format!("failed to encode snapshots: {e}"))
        })?;
        fs::write(&self.path, text).map_err(io_error)?;
        tracing::info!(path = %self.path.display(), people = self.entries.len(), "saved skill snapshots");
        self.dirty = false;
        Ok(())
    }
}

impl SnapshotStore for JsonSnapshotStore {
    fn load(&self, name: &str) -> Option<Vec<SkillLevel>> {
        self.entries.get(name).cloned()
    }

    fn save(&mut self, name: &str, levels: Vec<SkillLevel>) {
        if self.entries.get(name) != Some(&levels) {
            self.entries.insert(name.to_string(), levels);
            self.dirty = true;
        }
    }
}
