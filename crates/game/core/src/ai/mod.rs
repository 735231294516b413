//! Utility-based action selection.
//!
//! For the acting combatant the evaluator enumerates every
//! (ability, target subset) pair the targeting rules allow, scores each one
//! (see [`scoring`]) and picks the highest value. Every actor, on both sides,
//! is decided this way.
//!
//! # Determinism
//!
//! Random subsets for group abilities come from an [`RngOracle`] seeded by
//! the battle seed, the turn nonce, the actor and the ability index, so equal
//! inputs always produce equal choices.

pub mod candidates;
pub mod scoring;

pub use candidates::SampleContext;
pub use scoring::Score;

use crate::ability::AbilityId;
use crate::config::BattleConfig;
use crate::engine::BattleError;
use crate::env::{PcgRng, RngOracle};
use crate::state::{CombatantId, Roster};

/// A scored candidate action.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChosenAction {
    /// Index into the actor's ability list.
    pub ability_index: usize,
    pub ability: AbilityId,
    pub targets: Vec<CombatantId>,
    pub score: Score,
}

#[derive(Clone, Debug, Default)]
pub struct ActionEvaluator<R = PcgRng> {
    config: BattleConfig,
    rng: R,
}

impl ActionEvaluator<PcgRng> {
    pub fn new(config: BattleConfig) -> Self {
        Self::with_rng(config, PcgRng)
    }
}

impl<R: RngOracle> ActionEvaluator<R> {
    pub fn with_rng(config: BattleConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// Every feasible candidate for `actor`, in ability order then subset
    /// order.
    pub fn possible_actions(
        &self,
        actor: CombatantId,
        roster: &Roster,
        nonce: u64,
    ) -> Result<Vec<ChosenAction>, BattleError> {
        let combatant = roster.combatant(actor)?;
        let mut actions = Vec::new();

        for (ability_index, instance) in combatant.abilities().iter().enumerate() {
            let ctx = SampleContext {
                nonce,
                actor,
                ability_index,
            };
            let subsets =
                candidates::target_subsets(instance, roster, &self.config, &self.rng, ctx)?;

            for targets in subsets {
                let score = scoring::score_candidate(instance, combatant, roster, &targets)?;
                actions.push(ChosenAction {
                    ability_index,
                    ability: instance.id().clone(),
                    targets,
                    score,
                });
            }
        }

        Ok(actions)
    }

    /// Highest-valued candidate; the first one wins ties. `None` when the
    /// actor has no ability with a valid target, or when even the winner
    /// cannot be paid for.
    pub fn best_action(
        &self,
        actor: CombatantId,
        roster: &Roster,
        nonce: u64,
    ) -> Result<Option<ChosenAction>, BattleError> {
        let combatant = roster.combatant(actor)?;
        let mut best: Option<ChosenAction> = None;

        for action in self.possible_actions(actor, roster, nonce)? {
            tracing::debug!(
                "  {} -> {:?}: score={} (base={}, impact={}, cost={}, finish={})",
                action.ability,
                action.targets,
                action.score.value(),
                action.score.base_priority,
                action.score.health_impact,
                action.score.resource_penalty,
                action.score.finishing_blow
            );

            let better = best
                .as_ref()
                .is_none_or(|current| action.score.value() > current.score.value());
            if better {
                best = Some(action);
            }
        }

        Ok(best.filter(|action| {
            let usable = combatant
                .abilities()
                .get(action.ability_index)
                .is_some_and(|instance| instance.can_activate(combatant));
            if !usable {
                tracing::debug!("  {} cannot pay for {}", combatant.name(), action.ability);
            }
            usable
        }))
    }
}
