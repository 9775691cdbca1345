//! Scenario configuration: where saves live and which ones have names.
//!
//! ```toml
//! saves = "/home/me/.config/unity3d/Ludeon Studios/RimWorld/Saves"
//! snapshots = "/home/me/.local/share/colony-report/skills.json"
//!
//! [scenarios.tundra]
//! file = "/home/me/.config/unity3d/Ludeon Studios/RimWorld/Saves/Tundra.rws"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core_api::{CoreError, CoreErrorCode};

pub const SAVE_EXTENSION: &str = "rws";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub file: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub saves: Option<PathBuf>,
    pub snapshots: Option<PathBuf>,
    pub scenarios: BTreeMap<String, Scenario>,
}

/// Scenario names touched by [`AppConfig::rebuild`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RebuildSummary {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

fn config_error(path: &Path, detail: impl std::fmt::Display) -> CoreError {
    CoreError::new(
        CoreErrorCode::Config,
        format!("{}: {detail}", path.display()),
    )
}

impl AppConfig {
    /// Reads the config at `path`. A missing file is an empty config.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        match fs::read_to_string(path) {
            Ok(text) => toml::from_str(&text).map_err(|e| config_error(path, e)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(CoreError::new(
                CoreErrorCode::Io,
                format!("failed to read {}: {e}", path.display()),
            )),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), CoreError> {
        let text = toml::to_string_pretty(self).map_err(|e| config_error(path, e))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                CoreError::new(
                    CoreErrorCode::Io,
                    format!("failed to create {}: {e}", parent.display()),
                )
            })?;
        }
        fs::write(path, text).map_err(|e| {
            CoreError::new(
                CoreErrorCode::Io,
                format!("failed to write {}: {e}", path.display()),
            )
        })
    }

    pub fn scenario_names(&self) -> Vec<&str> {
        self.scenarios.keys().map(String::as_str).collect()
    }

    /// A scenario name wins over a path of the same spelling.
    pub fn resolve_save(&self, name_or_path: &str) -> PathBuf {
        match self.scenarios.get(name_or_path) {
            Some(scenario) => scenario.file.clone(),
            None => PathBuf::from(name_or_path),
        }
    }

    /// Drops scenarios whose file is gone and names every unreferenced save
    /// in the saves directory after its file stem.
    pub fn rebuild(&mut self) -> Result<RebuildSummary, CoreError> {
        let saves = self.saves.clone().ok_or_else(|| {
            CoreError::new(
                CoreErrorCode::Config,
                "no saves directory configured; set `saves` in the config file",
            )
        })?;

        let mut summary = RebuildSummary::default();
        self.scenarios.retain(|name, scenario| {
            let keep = scenario.file.exists();
            if !keep {
                summary.removed.push(name.clone());
            }
            keep
        });

        let entries = fs::read_dir(&saves).map_err(|e| {
            CoreError::new(
                CoreErrorCode::Io,
                format!("failed to list {}: {e}", saves.display()),
            )
        })?;
        let mut found: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == SAVE_EXTENSION))
            .collect();
        found.sort();

        for path in found {
            if self.scenarios.values().any(|s| s.file == path) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                tracing::warn!(path = %path.display(), "skipping save with non-UTF-8 name");
                continue;
            };
            let mut name = stem.to_string();
            let mut suffix = 2;
            while self.scenarios.contains_key(&name) {
                name = format!("{stem}-{suffix}");
                suffix += 1;
            }
            summary.added.push(name.clone());
            self.scenarios.insert(name, Scenario { file: path });
        }

        tracing::info!(
            added = summary.added.len(),
            removed = summary.removed.len(),
            "rebuilt scenario list"
        );
        Ok(summary)
    }
}
