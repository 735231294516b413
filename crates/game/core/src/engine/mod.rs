//! Speed-counter turn scheduler.
//!
//! The [`BattleEngine`] owns the two-sided roster for the duration of a
//! battle. Each call to [`BattleEngine::advance_one_turn`] runs one scheduler
//! iteration:
//!
//! 1. drop dead combatants from the working set
//! 2. end the battle if a side has no living members
//! 3. add Speed to every remaining counter until one reaches the turn cost
//! 4. pick the strictly greatest counter (roster order breaks ties)
//! 5. ask the evaluator for the best action and apply it, or forfeit
//! 6. subtract the turn cost from the actor's counter
//!
//! Counters only accumulate while none has reached the turn cost, so turn
//! order differs from adding Speed on every iteration.
//!
//! Pacing between turns is the caller's business; the engine never sleeps.

mod errors;
mod turns;

pub use errors::BattleError;
pub use turns::{BattleResult, TurnOutcome, TurnReport};

use crate::ai::ActionEvaluator;
use crate::combat::AbilityReport;
use crate::config::BattleConfig;
use crate::env::{PcgRng, RngOracle};
use crate::events::BattleEvent;
use crate::state::{Combatant, CombatantId, Roster, Side, TurnState};

pub struct BattleEngine<R = PcgRng> {
    config: BattleConfig,
    roster: Roster,
    turn: TurnState,
    evaluator: ActionEvaluator<R>,
    initialized: bool,
    result: Option<BattleResult>,
}

impl BattleEngine<PcgRng> {
    pub fn new(config: BattleConfig) -> Self {
        Self::with_rng(config, PcgRng)
    }
}

impl<R: RngOracle> BattleEngine<R> {
    pub fn with_rng(config: BattleConfig, rng: R) -> Self {
        Self {
            evaluator: ActionEvaluator::with_rng(config.clone(), rng),
            config,
            roster: Roster::new(),
            turn: TurnState::default(),
            initialized: false,
            result: None,
        }
    }

    /// Resets all battle state and takes ownership of both sides.
    ///
    /// Counters start at zero; the working set is side A then side B in the
    /// given order.
    pub fn initialize(
        &mut self,
        side_a: Vec<Combatant>,
        side_b: Vec<Combatant>,
    ) -> Result<Vec<BattleEvent>, BattleError> {
        if side_a.is_empty() && side_b.is_empty() {
            return Err(BattleError::EmptyRoster);
        }
        if !(self.config.turn_cost.is_finite() && self.config.turn_cost > 0.0) {
            return Err(BattleError::InvalidTurnCost);
        }

        let roster = Roster::from_sides(side_a, side_b)?;
        let side_a = roster.ids_on(Side::A);
        let side_b = roster.ids_on(Side::B);

        tracing::info!(
            "battle initialized: {} vs {} combatant(s)",
            side_a.len(),
            side_b.len()
        );

        self.turn = TurnState::new(roster.iter().map(|entry| entry.id()));
        self.roster = roster;
        self.result = None;
        self.initialized = true;

        Ok(vec![BattleEvent::BattleStarted { side_a, side_b }])
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn turn_state(&self) -> &TurnState {
        &self.turn
    }

    pub fn result(&self) -> Option<&BattleResult> {
        self.result.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_finished(&self) -> bool {
        self.result.is_some()
    }

    /// Hands every combatant (dead or alive) back in roster order.
    pub fn into_combatants(self) -> Vec<Combatant> {
        self.roster.into_combatants()
    }

    /// Runs the battle to completion. Returns `None` if the engine was never
    /// initialized.
    pub fn run(&mut self) -> Result<Option<BattleResult>, BattleError> {
        if !self.initialized {
            return Ok(None);
        }

        loop {
            if let TurnOutcome::Finished(result) = self.advance_one_turn()?.outcome {
                return Ok(Some(result));
            }
        }
    }

    /// Runs one scheduler iteration.
    ///
    /// Once the battle has ended every further call reports the same
    /// [`TurnOutcome::Finished`] without doing anything.
    pub fn advance_one_turn(&mut self) -> Result<TurnReport, BattleError> {
        if !self.initialized {
            return Err(BattleError::NotInitialized);
        }
        if let Some(result) = &self.result {
            return Ok(self.report(TurnOutcome::Finished(result.clone()), Vec::new()));
        }

        let mut events = Vec::new();

        self.remove_dead(&mut events);

        if let Some(result) = self.check_battle_end() {
            tracing::info!(
                "side {} wins after {} turn(s); survivors: {:?}",
                result.winner,
                result.turns,
                result.survivors
            );
            events.push(BattleEvent::BattleEnded {
                winner: result.winner,
                turns: result.turns,
            });
            self.result = Some(result.clone());
            return Ok(self.report(TurnOutcome::Finished(result), events));
        }

        if let Some(limit) = self.config.turn_limit.filter(|limit| self.turn.turn >= *limit) {
            tracing::warn!("turn limit {} reached", limit);
            return Err(BattleError::turn_limit_exceeded(limit, self.turn.turn));
        }

        self.advance_counters()?;

        let Some(leader) = self.turn.leader() else {
            tracing::debug!("no combatant can act; resetting counters");
            self.turn.reset();
            events.push(BattleEvent::CountersReset);
            return Ok(self.report(TurnOutcome::CountersReset, events));
        };
        let actor = leader.combatant;

        self.turn.turn += 1;
        let turn = self.turn.turn;
        tracing::debug!(
            "turn {}: {} acts (counter {:.2})",
            turn,
            self.roster.combatant(actor)?.name(),
            leader.value
        );
        events.push(BattleEvent::TurnStarted {
            turn,
            actor,
            counter: leader.value,
        });

        let outcome = match self.evaluator.best_action(actor, &self.roster, turn)? {
            Some(action) => {
                events.push(BattleEvent::ActionChosen {
                    actor,
                    ability: action.ability.clone(),
                    targets: action.targets.clone(),
                    score: action.score.value(),
                });

                let instance = self
                    .roster
                    .combatant(actor)?
                    .abilities()
                    .get(action.ability_index)
                    .cloned()
                    .ok_or_else(|| BattleError::missing_ability(actor, action.ability_index, turn))?;

                let report = instance.apply(&mut self.roster, &action.targets)?;
                push_report_events(report, &mut events);

                TurnOutcome::Acted {
                    actor,
                    ability: action.ability,
                    targets: action.targets,
                }
            }
            None => {
                tracing::info!(
                    "{} has no usable ability with a valid target; turn forfeited",
                    self.roster.combatant(actor)?.name()
                );
                events.push(BattleEvent::TurnForfeited { actor });
                TurnOutcome::Forfeited { actor }
            }
        };

        if let Some(counter) = self.turn.counter_mut(actor) {
            *counter -= self.config.turn_cost;
        }

        Ok(self.report(outcome, events))
    }

    fn report(&self, outcome: TurnOutcome, events: Vec<BattleEvent>) -> TurnReport {
        TurnReport {
            turn: self.turn.turn,
            outcome,
            events,
        }
    }

    fn remove_dead(&mut self, events: &mut Vec<BattleEvent>) {
        let dead: Vec<CombatantId> = self
            .turn
            .counters
            .iter()
            .map(|counter| counter.combatant)
            .filter(|id| !self.roster.get(*id).is_some_and(Combatant::is_alive))
            .collect();

        for id in dead {
            self.turn.remove(id);
            tracing::debug!("removing {} from the working set", id);
            events.push(BattleEvent::CombatantRemoved { combatant: id });
        }
    }

    fn check_battle_end(&self) -> Option<BattleResult> {
        let winner = if self.roster.living_count(Side::A) == 0 {
            Side::B
        } else if self.roster.living_count(Side::B) == 0 {
            Side::A
        } else {
            return None;
        };

        Some(BattleResult {
            winner,
            turns: self.turn.turn,
            survivors: self
                .roster
                .living_on(winner)
                .map(|entry| entry.id())
                .collect(),
        })
    }

    /// Adds Speed to every counter in as many whole steps as it takes for at
    /// least one counter to reach the turn cost. An actor whose counter is
    /// still at or above the cost after acting goes again without further
    /// accumulation, which keeps turn frequency proportional to Speed.
    fn advance_counters(&mut self) -> Result<(), BattleError> {
        let cost = f64::from(self.config.turn_cost);
        let mut speeds = Vec::with_capacity(self.turn.counters.len());
        for counter in &self.turn.counters {
            speeds.push(f64::from(self.roster.combatant(counter.combatant)?.speed()));
        }

        let steps = self
            .turn
            .counters
            .iter()
            .zip(&speeds)
            .filter(|(_, speed)| **speed > 0.0)
            .map(|(counter, speed)| ((cost - f64::from(counter.value)) / speed).ceil())
            .fold(f64::INFINITY, f64::min);
        if !steps.is_finite() || steps <= 0.0 {
            return Ok(());
        }

        for (counter, speed) in self.turn.counters.iter_mut().zip(&speeds) {
            counter.value = (f64::from(counter.value) + speed * steps) as f32;
        }
        Ok(())
    }
}

fn push_report_events(report: AbilityReport, events: &mut Vec<BattleEvent>) {
    if !report.activated {
        events.push(BattleEvent::ActivationRefused {
            actor: report.wielder,
            ability: report.ability,
        });
        return;
    }

    for applied in report.effects {
        events.push(BattleEvent::EffectResolved {
            source: report.wielder,
            target: applied.target,
            ability: report.ability.clone(),
            outcome: applied.outcome,
        });
    }
    for kind in report.unimplemented {
        events.push(BattleEvent::EffectUnimplemented {
            source: report.wielder,
            ability: report.ability.clone(),
            kind,
        });
    }
    events.extend(report.changes.into_iter().map(BattleEvent::Changed));
}
