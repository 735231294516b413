//! Content factory for loading battle content from a data directory.

use std::path::{Path, PathBuf};

use battle_core::{AbilityCatalog, BattleConfig};

use crate::loaders::{AbilityCatalogLoader, ConfigLoader, LoadResult, RosterStore};

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── abilities.ron
/// └── roster.json
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load battle configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load the ability catalog from `abilities.ron`.
    pub fn load_abilities(&self) -> LoadResult<AbilityCatalog> {
        let path = self.data_dir.join("abilities.ron");
        AbilityCatalogLoader::load(&path)
    }

    /// Load `abilities.ron` if the directory has one, the embedded presets otherwise.
    pub fn load_abilities_or_embedded(&self) -> LoadResult<AbilityCatalog> {
        let path = self.data_dir.join("abilities.ron");
        if path.exists() {
            AbilityCatalogLoader::load(&path)
        } else {
            AbilityCatalogLoader::load_embedded()
        }
    }

    /// Store for `roster.json`.
    pub fn roster_store(&self) -> RosterStore {
        RosterStore::new(self.data_dir.join("roster.json"))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
