//! Topic-based event bus implementation.

use battle_core::BattleEvent;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Scheduling: actor selection, chosen actions, forfeits, counter resets
    Turn,
    /// Effect resolution and combatant state changes
    Combat,
    /// Battle start and end
    Outcome,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Turn, Topic::Combat, Topic::Outcome];

    /// Topic a battle event is published on.
    pub fn of(event: &BattleEvent) -> Self {
        match event {
            BattleEvent::TurnStarted { .. }
            | BattleEvent::ActionChosen { .. }
            | BattleEvent::TurnForfeited { .. }
            | BattleEvent::CountersReset => Topic::Turn,
            BattleEvent::ActivationRefused { .. }
            | BattleEvent::EffectResolved { .. }
            | BattleEvent::EffectUnimplemented { .. }
            | BattleEvent::Changed(_)
            | BattleEvent::CombatantRemoved { .. } => Topic::Combat,
            BattleEvent::BattleStarted { .. } | BattleEvent::BattleEnded { .. } => Topic::Outcome,
        }
    }
}

/// A battle event stamped with the turn it happened in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Scheduler turn number; 0 before the first actor was selected.
    pub turn: u64,
    pub battle: BattleEvent,
}

impl Event {
    pub fn new(turn: u64, battle: BattleEvent) -> Self {
        Self { turn, battle }
    }

    pub fn topic(&self) -> Topic {
        Topic::of(&self.battle)
    }
}

/// Topic-based event bus
///
/// Publishing never blocks. Subscribers that fall behind by more than the
/// configured capacity observe `RecvError::Lagged` and skip ahead.
#[derive(Clone)]
pub struct EventBus {
    turn: broadcast::Sender<Event>,
    combat: broadcast::Sender<Event>,
    outcome: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            turn: broadcast::channel(capacity).0,
            combat: broadcast::channel(capacity).0,
            outcome: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Turn => &self.turn,
            Topic::Combat => &self.combat,
            Topic::Outcome => &self.outcome,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> Vec<(Topic, broadcast::Receiver<Event>)> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{CombatantId, Side};

    #[tokio::test]
    async fn routes_events_by_topic() {
        let bus = EventBus::with_capacity(8);
        let mut turns = bus.subscribe(Topic::Turn);
        let mut outcomes = bus.subscribe(Topic::Outcome);

        bus.publish(Event::new(
            1,
            BattleEvent::TurnForfeited {
                actor: CombatantId(1),
            },
        ));
        bus.publish(Event::new(
            1,
            BattleEvent::BattleEnded {
                winner: Side::A,
                turns: 1,
            },
        ));

        assert_eq!(turns.recv().await.unwrap().topic(), Topic::Turn);
        let outcome = outcomes.recv().await.unwrap();
        assert!(matches!(
            outcome.battle,
            BattleEvent::BattleEnded { winner: Side::A, .. }
        ));
        assert!(turns.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::default();
        bus.publish(Event::new(0, BattleEvent::CountersReset));
    }

    #[test]
    fn classifies_every_lifecycle_event() {
        let started = BattleEvent::BattleStarted {
            side_a: vec![],
            side_b: vec![],
        };
        assert_eq!(Topic::of(&started), Topic::Outcome);
        assert_eq!(
            Topic::of(&BattleEvent::CombatantRemoved {
                combatant: CombatantId(3)
            }),
            Topic::Combat
        );
        assert_eq!(Topic::of(&BattleEvent::CountersReset), Topic::Turn);
    }
}
