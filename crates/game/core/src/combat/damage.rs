//! Damage and heal formulas.
//!
//! # Damage
//!
//! ```text
//! Physical: offense = power + attacker.STR × 0.7   mitigation = target.END × 0.5
//! Magical:  offense = power + attacker.INT × 0.9   mitigation = target.INT × 0.3
//! Pure:     offense = power                        mitigation = 0
//!
//! final = max(offense - mitigation, 0)
//! final = max(final, power × 0.1)
//! final = max(round(final), 1)
//! ```
//!
//! # Heal
//!
//! ```text
//! value = max(power + healer.INT × 1.0, power × 0.1)
//! value = max(round(value), 1)
//! ```
//!
//! Rounding is to nearest with ties to even.

use crate::ability::DamageType;
use crate::stats::Attributes;

pub const PHYSICAL_STRENGTH_SCALING: f32 = 0.7;
pub const PHYSICAL_ENDURANCE_MITIGATION: f32 = 0.5;
pub const MAGICAL_INTELLIGENCE_SCALING: f32 = 0.9;
pub const MAGICAL_INTELLIGENCE_MITIGATION: f32 = 0.3;
pub const HEAL_INTELLIGENCE_SCALING: f32 = 1.0;

/// Fraction of power that survives any amount of mitigation.
pub const MINIMUM_POWER_FRACTION: f32 = 0.1;

/// Health damage dealt by `attacker` to `defender` at the given power.
pub fn calculate_damage(
    attacker: &Attributes,
    defender: &Attributes,
    damage_type: DamageType,
    power: f32,
) -> u32 {
    let (offense, mitigation) = match damage_type {
        DamageType::Physical => (
            power + attacker.strength as f32 * PHYSICAL_STRENGTH_SCALING,
            defender.endurance as f32 * PHYSICAL_ENDURANCE_MITIGATION,
        ),
        DamageType::Magical => (
            power + attacker.intelligence as f32 * MAGICAL_INTELLIGENCE_SCALING,
            defender.intelligence as f32 * MAGICAL_INTELLIGENCE_MITIGATION,
        ),
        DamageType::Pure => (power, 0.0),
    };

    let raw = (offense - mitigation).max(0.0);
    finalize(raw.max(power * MINIMUM_POWER_FRACTION))
}

/// Heal amount from `healer` at the given power, before clamping by the
/// target's missing health.
pub fn calculate_heal(healer: &Attributes, power: f32) -> u32 {
    let value = power + healer.intelligence as f32 * HEAL_INTELLIGENCE_SCALING;
    finalize(value.max(power * MINIMUM_POWER_FRACTION))
}

/// Stamina/mana amount: integer part of the power, never negative.
pub fn resource_amount(power: f32) -> u32 {
    if power.is_finite() && power > 0.0 {
        power.trunc() as u32
    } else {
        0
    }
}

fn finalize(value: f32) -> u32 {
    (value.round_ties_even() as u32).max(1)
}
