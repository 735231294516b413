//! Core attributes - the stored stats of a combatant.
//!
//! Strength, Endurance and Intelligence are the single source of truth for
//! every derived value (resource maximums, speed, damage scaling).

/// The three base attributes of a combatant.
///
/// - **Strength**: health pool and physical damage
/// - **Endurance**: stamina pool, speed and physical mitigation
/// - **Intelligence**: mana pool, magical damage, healing and magical mitigation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attributes {
    pub strength: u32,
    pub endurance: u32,
    pub intelligence: u32,
}

impl Attributes {
    pub const fn new(strength: u32, endurance: u32, intelligence: u32) -> Self {
        Self {
            strength,
            endurance,
            intelligence,
        }
    }

    /// Returns the attributes after one level of growth.
    #[must_use]
    pub const fn grown(self, growth: GrowthParameters) -> Self {
        Self {
            strength: self.strength.saturating_add(growth.strength),
            endurance: self.endurance.saturating_add(growth.endurance),
            intelligence: self.intelligence.saturating_add(growth.intelligence),
        }
    }
}

/// Per-level attribute increments applied on level up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GrowthParameters {
    pub strength: u32,
    pub endurance: u32,
    pub intelligence: u32,
}

impl GrowthParameters {
    pub const fn new(strength: u32, endurance: u32, intelligence: u32) -> Self {
        Self {
            strength,
            endurance,
            intelligence,
        }
    }

    /// Total attribute points gained per level.
    pub const fn total(&self) -> u32 {
        self.strength + self.endurance + self.intelligence
    }
}
