//! Authoritative battle state.
//!
//! This module owns the data structures that describe combatants, the
//! two-sided roster and the scheduler's turn bookkeeping. Runtime layers read
//! this state but mutate it exclusively through the engine and the ability
//! resolver.
mod combatant;
mod common;
mod record;
mod roster;
mod turn;

pub use combatant::Combatant;
pub use common::{CombatantId, Side};
pub use record::CombatantRecord;
pub use roster::{Roster, RosterEntry};
pub use turn::{SpeedCounter, TurnState};
