//! Paced battle loop.
//!
//! [`BattleRuntime`] owns the engine and the event bus. Each iteration calls
//! `advance_one_turn`, publishes the produced events, then sleeps for the
//! configured turn delay. A [`StopHandle`] interrupts the loop between turns.

use std::sync::Arc;

use battle_core::{BattleEngine, BattleEvent, BattleResult, Combatant, TurnOutcome};
use tokio::sync::{broadcast, watch};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::setup::BattleSetup;

/// Cloneable handle that asks a running battle to stop.
#[derive(Clone, Debug)]
pub struct StopHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.tx.send_replace(true);
    }
}

/// Hosts one battle from setup to result.
pub struct BattleRuntime {
    config: RuntimeConfig,
    engine: BattleEngine,
    bus: EventBus,
    pending: Vec<BattleEvent>,
    stop_tx: Arc<watch::Sender<bool>>,
    stop_rx: watch::Receiver<bool>,
}

impl BattleRuntime {
    /// Prepares both sides. Setup events are published when [`run`](Self::run) starts,
    /// so subscribers created in between see them.
    pub fn new(config: RuntimeConfig, setup: BattleSetup) -> Result<Self> {
        let (engine, pending) = setup.build(config.battle.clone())?;
        let bus = EventBus::with_capacity(config.event_capacity);
        let (stop_tx, stop_rx) = watch::channel(false);

        Ok(Self {
            config,
            engine,
            bus,
            pending,
            stop_tx: Arc::new(stop_tx),
            stop_rx,
        })
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn engine(&self) -> &BattleEngine {
        &self.engine
    }

    /// Shared handle to the event bus.
    pub fn bus(&self) -> EventBus {
        self.bus.clone()
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.bus.subscribe(topic)
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            tx: Arc::clone(&self.stop_tx),
        }
    }

    /// Runs the battle to completion.
    ///
    /// Calling it again after the battle ended returns the same result
    /// immediately.
    pub async fn run(&mut self) -> Result<BattleResult> {
        for battle in std::mem::take(&mut self.pending) {
            self.bus.publish(Event::new(0, battle));
        }

        let mut stop = self.stop_rx.clone();
        loop {
            if *stop.borrow() {
                let turn = self.engine.turn_state().turn;
                tracing::info!(turn, "battle stopped by host");
                return Err(RuntimeError::Stopped { turn });
            }

            let report = self.engine.advance_one_turn()?;
            for battle in report.events {
                self.bus.publish(Event::new(report.turn, battle));
            }

            match report.outcome {
                TurnOutcome::Finished(result) => {
                    tracing::info!(
                        winner = %result.winner,
                        turns = result.turns,
                        survivors = result.survivors.len(),
                        "battle finished"
                    );
                    return Ok(result);
                }
                // Nobody acted; no reason to make observers wait.
                TurnOutcome::CountersReset => continue,
                TurnOutcome::Acted { .. } | TurnOutcome::Forfeited { .. } => {}
            }

            if !self.config.turn_delay.is_zero() {
                tokio::select! {
                    _ = tokio::time::sleep(self.config.turn_delay) => {}
                    _ = stop.changed() => {}
                }
            }
        }
    }

    /// Hands every combatant back in roster order, dead or alive.
    pub fn into_combatants(self) -> Vec<Combatant> {
        self.engine.into_combatants()
    }
}
