//! Change notifications and battle observability events.
//!
//! Mutating operations on a [`Combatant`](crate::Combatant) return
//! [`CombatantChange`] records instead of firing callbacks. The scheduler
//! collects them, together with turn-level events, into the event list of each
//! [`TurnReport`](crate::TurnReport). Presentation layers consume these lists
//! (directly or through the runtime's event bus) to resynchronize.

use crate::ability::{AbilityId, EffectKind};
use crate::combat::EffectOutcome;
use crate::state::{CombatantId, Side};
use crate::stats::{Attributes, ResourceKind};

/// One mutation of a combatant's stored state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatantChange {
    /// A resource pool changed value (already clamped).
    Resource {
        combatant: CombatantId,
        resource: ResourceKind,
        before: u32,
        after: u32,
    },

    /// Attributes changed (level-up growth).
    Attributes {
        combatant: CombatantId,
        attributes: Attributes,
        level: u32,
    },

    /// Experience total changed.
    Experience {
        combatant: CombatantId,
        experience: u32,
        level: u32,
    },
}

impl CombatantChange {
    pub fn combatant(&self) -> CombatantId {
        match self {
            Self::Resource { combatant, .. }
            | Self::Attributes { combatant, .. }
            | Self::Experience { combatant, .. } => *combatant,
        }
    }

    /// Signed delta of a resource change, `None` for other variants.
    pub fn resource_delta(&self) -> Option<i64> {
        match self {
            Self::Resource { before, after, .. } => Some(*after as i64 - *before as i64),
            _ => None,
        }
    }

    /// True when nothing actually changed (e.g. restoring a full pool).
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::Resource { before, after, .. } if before == after)
    }
}

/// Everything observable that happens during a battle, in order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    /// The scheduler was initialized with these rosters.
    BattleStarted {
        side_a: Vec<CombatantId>,
        side_b: Vec<CombatantId>,
    },

    /// A dead combatant left the working roster.
    CombatantRemoved { combatant: CombatantId },

    /// Counters were reset because no combatant could act.
    CountersReset,

    /// An actor was selected.
    TurnStarted {
        turn: u64,
        actor: CombatantId,
        counter: f32,
    },

    /// The evaluator picked an action.
    ActionChosen {
        actor: CombatantId,
        ability: AbilityId,
        targets: Vec<CombatantId>,
        score: f32,
    },

    /// The actor had no usable ability with a valid target.
    TurnForfeited { actor: CombatantId },

    /// The wielder could not pay the ability's costs at apply time.
    ActivationRefused {
        actor: CombatantId,
        ability: AbilityId,
    },

    /// One effect resolved against one target.
    EffectResolved {
        source: CombatantId,
        target: CombatantId,
        ability: AbilityId,
        outcome: EffectOutcome,
    },

    /// An effect kind without numeric resolution was skipped.
    EffectUnimplemented {
        source: CombatantId,
        ability: AbilityId,
        kind: EffectKind,
    },

    /// Stored combatant state changed.
    Changed(CombatantChange),

    /// One side has no living members left.
    BattleEnded { winner: Side, turns: u64 },
}
