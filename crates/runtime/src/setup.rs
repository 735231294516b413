//! Battle preparation.

use battle_core::{BattleConfig, BattleEngine, BattleEvent, Combatant};

use crate::error::Result;

/// The two sides of a battle before it starts.
///
/// Building restores every participant to full resources, then initializes
/// the engine with side A and side B in the given order.
#[derive(Clone, Debug, Default)]
pub struct BattleSetup {
    side_a: Vec<Combatant>,
    side_b: Vec<Combatant>,
}

impl BattleSetup {
    pub fn new(side_a: Vec<Combatant>, side_b: Vec<Combatant>) -> Self {
        Self { side_a, side_b }
    }

    pub fn side_a(&self) -> &[Combatant] {
        &self.side_a
    }

    pub fn side_b(&self) -> &[Combatant] {
        &self.side_b
    }

    /// Returns the ready engine and the events produced while preparing it:
    /// resource restorations first, then `BattleStarted`.
    pub fn build(self, config: BattleConfig) -> Result<(BattleEngine, Vec<BattleEvent>)> {
        let Self {
            mut side_a,
            mut side_b,
        } = self;

        let mut events: Vec<BattleEvent> = side_a
            .iter_mut()
            .chain(side_b.iter_mut())
            .flat_map(Combatant::restore_full)
            .filter(|change| !change.is_noop())
            .map(BattleEvent::Changed)
            .collect();

        tracing::debug!(
            restored = events.len(),
            "participants restored to full resources"
        );

        let mut engine = BattleEngine::new(config);
        events.extend(engine.initialize(side_a, side_b)?);
        Ok((engine, events))
    }
}
