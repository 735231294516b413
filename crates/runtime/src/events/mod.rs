//! Topic-based event bus for battle events.
//!
//! Every [`BattleEvent`](battle_core::BattleEvent) produced by the engine is
//! published to one topic, and consumers subscribe only to the topics they need.

mod bus;

pub use bus::{Event, EventBus, Topic};
