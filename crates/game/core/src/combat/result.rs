//! Effect resolution results.

use crate::ability::{AbilityId, EffectKind};
use crate::events::CombatantChange;
use crate::state::CombatantId;
use crate::stats::ResourceKind;

/// Numeric result of one effect on one target.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectOutcome {
    /// Health damage. `dealt` is what actually left the pool.
    Damage { planned: u32, dealt: u32, lethal: bool },

    /// Health restored, already clamped by missing health.
    Heal { planned: u32, restored: u32 },

    /// Stamina or mana change; negative for drains.
    Resource { resource: ResourceKind, delta: i64 },
}

impl EffectOutcome {
    /// Signed health change caused by this outcome.
    pub fn health_delta(&self) -> i64 {
        match self {
            Self::Damage { dealt, .. } => -(*dealt as i64),
            Self::Heal { restored, .. } => *restored as i64,
            Self::Resource { .. } => 0,
        }
    }
}

/// One effect applied to one target.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AppliedEffect {
    pub target: CombatantId,
    /// Position of the effect within the ability's effect list.
    pub effect_index: usize,
    pub outcome: EffectOutcome,
}

/// Everything an [`AbilityInstance::apply`](crate::AbilityInstance::apply)
/// call did.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityReport {
    pub ability: AbilityId,
    pub wielder: CombatantId,
    /// False when the wielder could not pay the costs; nothing else happened.
    pub activated: bool,
    pub effects: Vec<AppliedEffect>,
    /// Effect kinds that were skipped because they have no numeric resolution.
    pub unimplemented: Vec<EffectKind>,
    /// Every state mutation, in the order it happened (costs first).
    pub changes: Vec<CombatantChange>,
}

impl AbilityReport {
    pub(crate) fn new(ability: AbilityId, wielder: CombatantId) -> Self {
        Self {
            ability,
            wielder,
            activated: false,
            effects: Vec::new(),
            unimplemented: Vec::new(),
            changes: Vec::new(),
        }
    }

    /// Total health damage dealt.
    pub fn total_damage(&self) -> u32 {
        self.effects
            .iter()
            .map(|applied| match applied.outcome {
                EffectOutcome::Damage { dealt, .. } => dealt,
                _ => 0,
            })
            .sum()
    }

    pub fn total_healing(&self) -> u32 {
        self.effects
            .iter()
            .map(|applied| match applied.outcome {
                EffectOutcome::Heal { restored, .. } => restored,
                _ => 0,
            })
            .sum()
    }

    /// Targets killed by this application.
    pub fn kills(&self) -> impl Iterator<Item = CombatantId> + '_ {
        self.effects.iter().filter_map(|applied| match applied.outcome {
            EffectOutcome::Damage { lethal: true, .. } => Some(applied.target),
            _ => None,
        })
    }
}
