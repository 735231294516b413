//! Host runtime for battles.
//!
//! `battle-core` advances one turn per call and never waits. This crate wraps
//! it for interactive hosts: it prepares both sides, paces turns with a
//! configurable delay, and re-publishes every [`BattleEvent`](battle_core::BattleEvent)
//! on a topic-based [`EventBus`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the paced battle loop
//! - [`setup`] prepares combatants and the engine
//! - [`events`] provides the topic-based event bus
//! - [`config`] reads runtime settings from the environment
pub mod config;
pub mod error;
pub mod events;
pub mod runtime;
pub mod setup;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use events::{Event, EventBus, Topic};
pub use runtime::{BattleRuntime, StopHandle};
pub use setup::BattleSetup;
