//! Speed - how fast a combatant's turn counter fills.
//!
//! Speed = 80 + END × 0.25
//!
//! The scheduler adds Speed to a combatant's counter every iteration and
//! subtracts a fixed turn cost when it acts, so turn frequency is
//! proportional to Speed.

use super::core::Attributes;

/// Speed every combatant has before Endurance scaling.
pub const BASE_SPEED: f32 = 80.0;

/// Speed gained per point of Endurance.
pub const SPEED_PER_ENDURANCE: f32 = 0.25;

/// Computes Speed from attributes.
pub fn speed_of(attributes: &Attributes) -> f32 {
    BASE_SPEED + attributes.endurance as f32 * SPEED_PER_ENDURANCE
}
