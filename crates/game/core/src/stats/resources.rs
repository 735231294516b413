//! Resources - health, stamina and mana pools.
//!
//! Resource pools are partially stored:
//! - Maximum values: computed from [`Attributes`] (NOT stored)
//! - Current values: combatant state (MUST be stored)
//!
//! Formulas:
//! - Health_max  = STR × 100
//! - Stamina_max = END × 5
//! - Mana_max    = INT × 7

use super::core::Attributes;

/// Enum representing individual resource types.
///
/// Used by effects, costs and change notifications to reference a pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceKind {
    Health,
    Stamina,
    Mana,
}

/// Maximum resource values computed from attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMaximums {
    pub health: u32,
    pub stamina: u32,
    pub mana: u32,
}

impl ResourceMaximums {
    pub const HEALTH_PER_STRENGTH: u32 = 100;
    pub const STAMINA_PER_ENDURANCE: u32 = 5;
    pub const MANA_PER_INTELLIGENCE: u32 = 7;

    /// Compute maximums from attributes.
    pub const fn from_attributes(attributes: &Attributes) -> Self {
        Self {
            health: attributes.strength.saturating_mul(Self::HEALTH_PER_STRENGTH),
            stamina: attributes
                .endurance
                .saturating_mul(Self::STAMINA_PER_ENDURANCE),
            mana: attributes
                .intelligence
                .saturating_mul(Self::MANA_PER_INTELLIGENCE),
        }
    }

    /// Get the max value for a specific resource.
    pub const fn get(&self, resource: ResourceKind) -> u32 {
        match resource {
            ResourceKind::Health => self.health,
            ResourceKind::Stamina => self.stamina,
            ResourceKind::Mana => self.mana,
        }
    }
}

/// Current resource values (combatant state, must be stored).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceCurrent {
    pub health: u32,
    pub stamina: u32,
    pub mana: u32,
}

impl ResourceCurrent {
    pub const fn new(health: u32, stamina: u32, mana: u32) -> Self {
        Self {
            health,
            stamina,
            mana,
        }
    }

    /// Create current resources at maximum.
    pub const fn at_max(max: &ResourceMaximums) -> Self {
        Self {
            health: max.health,
            stamina: max.stamina,
            mana: max.mana,
        }
    }

    pub const fn get(&self, resource: ResourceKind) -> u32 {
        match resource {
            ResourceKind::Health => self.health,
            ResourceKind::Stamina => self.stamina,
            ResourceKind::Mana => self.mana,
        }
    }

    pub(crate) fn slot_mut(&mut self, resource: ResourceKind) -> &mut u32 {
        match resource {
            ResourceKind::Health => &mut self.health,
            ResourceKind::Stamina => &mut self.stamina,
            ResourceKind::Mana => &mut self.mana,
        }
    }

    /// Clamp every pool into `[0, max]`.
    #[must_use]
    pub fn clamped(self, max: &ResourceMaximums) -> Self {
        Self {
            health: self.health.min(max.health),
            stamina: self.stamina.min(max.stamina),
            mana: self.mana.min(max.mana),
        }
    }
}

/// Fraction `current / max`, with an empty pool reported as 0.
pub fn fraction(current: u32, max: u32) -> f32 {
    if max == 0 {
        0.0
    } else {
        current as f32 / max as f32
    }
}
