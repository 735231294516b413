//! JSON roster store.
//!
//! Persists combatants as [`CombatantRecord`]s keyed by id. Abilities are
//! stored as catalog identifiers and re-resolved when loading.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use battle_core::{AbilityCatalog, Combatant, CombatantRecord};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Default, Serialize, Deserialize)]
struct RosterFile {
    combatants: BTreeMap<u64, CombatantRecord>,
}

/// File-backed store of combatant records.
///
/// # File Format
///
/// ```json
/// { "combatants": { "1": { "id": 1, "name": "Alron", ... } } }
/// ```
#[derive(Clone, Debug)]
pub struct RosterStore {
    path: PathBuf,
}

impl RosterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Reads every stored record in id order. A missing file is an empty roster.
    pub fn load_records(&self) -> LoadResult<Vec<CombatantRecord>> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "no roster file found");
            return Ok(Vec::new());
        }

        let content = read_file(&self.path)?;
        let file: RosterFile = serde_json::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Corrupt roster file {}: {}", self.path.display(), e)
        })?;

        for (key, record) in &file.combatants {
            if *key != record.id.0 {
                anyhow::bail!(
                    "Corrupt roster file {}: entry {} holds combatant {}",
                    self.path.display(),
                    key,
                    record.id
                );
            }
        }

        Ok(file.combatants.into_values().collect())
    }

    /// Loads and rebuilds every stored combatant against `catalog`.
    pub fn load(&self, catalog: &AbilityCatalog) -> LoadResult<Vec<Combatant>> {
        let combatants = self
            .load_records()?
            .into_iter()
            .map(|record| Combatant::from_record(record, catalog))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Failed to rebuild roster {}: {}", self.path.display(), e))?;

        tracing::debug!(path = %self.path.display(), count = combatants.len(), "loaded roster");
        Ok(combatants)
    }

    /// Replaces the stored roster with `combatants`.
    pub fn save<'a>(&self, combatants: impl IntoIterator<Item = &'a Combatant>) -> LoadResult<()> {
        let file = RosterFile {
            combatants: combatants
                .into_iter()
                .map(|combatant| (combatant.id().0, combatant.to_record()))
                .collect(),
        };
        let json = serde_json::to_string_pretty(&file)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // Write then rename so a crash never leaves a half-written roster.
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!(
            path = %self.path.display(),
            count = file.combatants.len(),
            "saved roster"
        );
        Ok(())
    }

    /// Deletes the roster file if present.
    pub fn clear(&self) -> LoadResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| {
                anyhow::anyhow!("Failed to delete roster {}: {}", self.path.display(), e)
            })?;
            tracing::info!(path = %self.path.display(), "roster cleared");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{Attributes, CombatantId, GrowthParameters, ResourceCurrent};

    use crate::loaders::AbilityCatalogLoader;

    fn sample(catalog: &AbilityCatalog) -> Vec<Combatant> {
        vec![
            Combatant::new(
                CombatantId(2),
                "Bebert",
                Attributes::new(6, 8, 9),
                GrowthParameters::new(4, 4, 5),
            )
            .with_ability(catalog.get("basic_attack").unwrap())
            .with_ability(catalog.get("heal").unwrap())
            .with_resources(ResourceCurrent::new(321, 12, 30)),
            Combatant::new(
                CombatantId(1),
                "Alron",
                Attributes::new(10, 5, 5),
                GrowthParameters::new(10, 1, 2),
            )
            .with_ability(catalog.get("basic_attack").unwrap())
            .with_progress(3, 40),
        ]
    }

    #[test]
    fn test_save_and_load_preserves_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = RosterStore::new(dir.path().join("roster.json"));
        let catalog = AbilityCatalogLoader::load_embedded().unwrap();
        let combatants = sample(&catalog);

        store.save(&combatants).unwrap();
        let loaded = store.load(&catalog).unwrap();

        // Records come back in id order.
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0], combatants[1]);
        assert_eq!(loaded[1], combatants[0]);
        assert_eq!(loaded[1].health(), 321);
        assert_eq!(loaded[0].level(), 3);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = RosterStore::new(dir.path().join("nothing.json"));

        assert!(store.load_records().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.json");
        fs::write(&path, "{ not json").unwrap();

        let err = RosterStore::new(&path).load_records().unwrap_err();
        assert!(err.to_string().contains("Corrupt roster file"));
    }

    #[test]
    fn test_unknown_ability_fails_rebuild() {
        let dir = tempfile::tempdir().unwrap();
        let store = RosterStore::new(dir.path().join("roster.json"));
        let catalog = AbilityCatalogLoader::load_embedded().unwrap();
        store.save(&sample(&catalog)).unwrap();

        let empty = AbilityCatalog::new();
        assert!(store.load(&empty).is_err());
    }

    #[test]
    fn test_clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = RosterStore::new(dir.path().join("nested/roster.json"));
        let catalog = AbilityCatalogLoader::load_embedded().unwrap();

        store.save(&sample(&catalog)).unwrap();
        assert!(store.exists());

        store.clear().unwrap();
        assert!(!store.exists());
        store.clear().unwrap();
    }
}
