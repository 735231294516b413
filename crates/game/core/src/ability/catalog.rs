//! Lookup-by-identifier registry of ability definitions.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::{AbilityDefinition, AbilityId, CatalogError};

/// Immutable-after-load set of ability definitions.
///
/// The catalog is an explicit value: loaders build it and factories or record
/// reconstruction borrow it. Definitions are handed out as shared `Arc`s so
/// every learned instance points at the same data.
#[derive(Clone, Debug, Default)]
pub struct AbilityCatalog {
    definitions: BTreeMap<AbilityId, Arc<AbilityDefinition>>,
}

impl AbilityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_definitions(
        definitions: impl IntoIterator<Item = AbilityDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for definition in definitions {
            catalog.register(definition)?;
        }
        Ok(catalog)
    }

    /// Adds a definition. Identifiers must be unique.
    pub fn register(&mut self, definition: AbilityDefinition) -> Result<(), CatalogError> {
        validate(&definition)?;

        if self.definitions.contains_key(&definition.id) {
            return Err(CatalogError::DuplicateAbility {
                id: definition.id.clone(),
            });
        }

        tracing::debug!(
            "registered ability {} ({}, {} effect(s))",
            definition.id,
            definition.targeting,
            definition.effects.len()
        );
        self.definitions
            .insert(definition.id.clone(), Arc::new(definition));
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<Arc<AbilityDefinition>> {
        self.definitions.get(id).cloned()
    }

    /// Like [`AbilityCatalog::get`] but an unknown id is an error.
    pub fn resolve(&self, id: &AbilityId) -> Result<Arc<AbilityDefinition>, CatalogError> {
        self.get(id.as_str())
            .ok_or_else(|| CatalogError::UnknownAbility { id: id.clone() })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.definitions.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &AbilityId> {
        self.definitions.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<AbilityDefinition>> {
        self.definitions.values()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

fn validate(definition: &AbilityDefinition) -> Result<(), CatalogError> {
    let invalid = |reason: &str| CatalogError::InvalidDefinition {
        id: definition.id.clone(),
        reason: reason.to_owned(),
    };

    if definition.id.as_str().is_empty() {
        return Err(invalid("identifier is empty"));
    }
    if definition.targeting.is_group() && definition.target_count == 0 {
        return Err(invalid("group targeting requires target_count >= 1"));
    }
    if definition
        .effects
        .iter()
        .any(|effect| !effect.power.is_finite() || effect.power < 0.0)
    {
        return Err(invalid("effect power must be a finite, non-negative number"));
    }
    Ok(())
}
