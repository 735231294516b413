//! Stat system.
//!
//! ```text
//! [ Attributes (STR / END / INT, level) ]   stored
//!      ↓
//! [ Resource maximums, Speed ]              derived, never stored
//!      ↓
//! [ Current resources ]                     stored, clamped to [0, max]
//! ```
//!
//! Only the attributes, the level and the current resource values are part of
//! a combatant's persistent record. Everything else is recomputed on demand.

pub mod core;
pub mod resources;
pub mod speed;

pub use self::core::{Attributes, GrowthParameters};
pub use resources::{ResourceCurrent, ResourceKind, ResourceMaximums};
pub use speed::speed_of;
