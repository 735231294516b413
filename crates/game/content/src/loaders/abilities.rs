//! Ability preset loader.
//!
//! Loads ability definitions from RON into an [`AbilityCatalog`].

use std::path::Path;

use battle_core::{AbilityCatalog, AbilityDefinition};

use crate::loaders::{LoadResult, read_file};

const EMBEDDED_ABILITIES: &str = include_str!("../../data/abilities.ron");

/// Loader for ability catalogs.
///
/// File format: `Vec<AbilityDefinition>`
///
/// ```ron
/// [
///     (
///         id: "basic_attack",
///         name: "Basic Attack",
///         ai_priority: 50.0,
///         targeting: SingleEnemy,
///         costs: (stamina: 2),
///         effects: [(kind: PhysicalDamage, power: 100.0)],
///     ),
/// ]
/// ```
pub struct AbilityCatalogLoader;

impl AbilityCatalogLoader {
    /// Loads the presets compiled into this crate.
    pub fn load_embedded() -> LoadResult<AbilityCatalog> {
        Self::parse(EMBEDDED_ABILITIES, "embedded abilities.ron")
    }

    /// Loads a catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<AbilityCatalog> {
        let content = read_file(path)?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parses RON content. `source` only labels error messages.
    pub fn parse(content: &str, source: &str) -> LoadResult<AbilityCatalog> {
        let definitions: Vec<AbilityDefinition> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse ability RON at {}: {}", source, e))?;

        let catalog = AbilityCatalog::from_definitions(definitions)
            .map_err(|e| anyhow::anyhow!("Invalid ability catalog {}: {}", source, e))?;

        tracing::debug!(source, abilities = catalog.len(), "loaded ability catalog");
        Ok(catalog)
    }
}
