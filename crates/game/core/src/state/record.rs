//! Persistent combatant record.
//!
//! Only stored state goes into a record. Maximums and speed are recomputed
//! from the attributes, and abilities are kept as catalog identifiers that are
//! re-resolved on load.

use crate::ability::{AbilityCatalog, AbilityId, CatalogError};
use crate::state::{Combatant, CombatantId};
use crate::stats::{Attributes, GrowthParameters, ResourceCurrent};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantRecord {
    pub id: CombatantId,
    pub name: String,
    pub attributes: Attributes,
    pub resources: ResourceCurrent,
    pub level: u32,
    pub experience: u32,
    pub growth: GrowthParameters,
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: Vec<AbilityId>,
}

impl Combatant {
    pub fn to_record(&self) -> CombatantRecord {
        CombatantRecord {
            id: self.id(),
            name: self.name().to_owned(),
            attributes: *self.attributes(),
            resources: *self.resources(),
            level: self.level(),
            experience: self.experience(),
            growth: *self.growth(),
            abilities: self
                .abilities()
                .iter()
                .map(|instance| instance.definition().id.clone())
                .collect(),
        }
    }

    /// Rebuilds a combatant, resolving every ability id against `catalog`.
    ///
    /// Stored resources are clamped to the maximums derived from the stored
    /// attributes.
    pub fn from_record(
        record: CombatantRecord,
        catalog: &AbilityCatalog,
    ) -> Result<Self, CatalogError> {
        let mut combatant = Combatant::new(
            record.id,
            record.name,
            record.attributes,
            record.growth,
        )
        .with_resources(record.resources)
        .with_progress(record.level, record.experience);

        for id in &record.abilities {
            combatant.learn(catalog.resolve(id)?);
        }
        Ok(combatant)
    }
}
