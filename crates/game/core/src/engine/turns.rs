//! Per-turn results returned by the scheduler.

use crate::ability::AbilityId;
use crate::events::BattleEvent;
use crate::state::{CombatantId, Side};

/// Final result of a battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleResult {
    pub winner: Side,
    /// Turns taken before the end was detected.
    pub turns: u64,
    /// Living members of the winning side, in roster order.
    pub survivors: Vec<CombatantId>,
}

/// What one scheduler iteration did.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnOutcome {
    /// The actor used an ability.
    Acted {
        actor: CombatantId,
        ability: AbilityId,
        targets: Vec<CombatantId>,
    },

    /// The actor had no ability with a valid target.
    Forfeited { actor: CombatantId },

    /// The working set was empty; counters were reset.
    CountersReset,

    /// One side has no living members.
    Finished(BattleResult),
}

impl TurnOutcome {
    pub fn actor(&self) -> Option<CombatantId> {
        match self {
            Self::Acted { actor, .. } | Self::Forfeited { actor } => Some(*actor),
            Self::CountersReset | Self::Finished(_) => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished(_))
    }
}

/// Outcome of [`BattleEngine::advance_one_turn`](super::BattleEngine::advance_one_turn)
/// together with every event it produced, in order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    pub turn: u64,
    pub outcome: TurnOutcome,
    pub events: Vec<BattleEvent>,
}
