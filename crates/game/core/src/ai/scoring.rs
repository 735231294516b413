//! Utility scoring of one (ability, target subset) candidate.
//!
//! # Score Formula
//!
//! ```text
//! score = base_priority + health_impact - resource_penalty + finishing_blow
//! ```
//!
//! Each component is kept separately in [`Score`] so a decision can be
//! explained in logs.

use crate::ability::{AbilityInstance, EffectKind};
use crate::engine::BattleError;
use crate::state::{Combatant, CombatantId, Roster};
use crate::stats::ResourceKind;

// ===== damage =====
pub const DAMAGE_LOW_HEALTH_FACTOR: f32 = 1.5;
pub const DAMAGE_MID_HEALTH_FACTOR: f32 = 1.2;
const DAMAGE_LOW_HEALTH: f32 = 0.2;
const DAMAGE_MID_HEALTH: f32 = 0.5;

// ===== healing =====
pub const HEAL_LOW_HEALTH_FACTOR: f32 = 3.0;
pub const HEAL_MID_HEALTH_FACTOR: f32 = 1.5;
pub const HEAL_HIGH_HEALTH_FACTOR: f32 = 0.5;
pub const OVERHEAL_PENALTY: f32 = 5000.0;
/// Bonus for lifting a target out of reach of the strongest incoming hit.
pub const LETHAL_RESCUE_BONUS: f32 = 1000.0 * HEAL_MID_HEALTH_FACTOR;
/// Bonus for lifting a target from below to at least 20% health.
pub const CRITICAL_LIFT_BONUS: f32 = 200.0;
const HEAL_LOW_HEALTH: f32 = 0.1;
const HEAL_MID_HEALTH: f32 = 0.4;
const CRITICAL_HEALTH: f32 = 0.2;

// ===== stamina / mana =====
pub const STAMINA_DAMAGE_FACTOR: f32 = 0.7;
pub const STAMINA_RESTORE_FACTOR: f32 = 0.5;
pub const MANA_DAMAGE_FACTOR: f32 = 0.8;
pub const MANA_RESTORE_FACTOR: f32 = 0.6;

// ===== costs =====
pub const UNUSABLE_PENALTY: f32 = 1_000_000.0;
pub const RESOURCE_LOW_PENALTY_FACTOR: f32 = 1.5;

pub const FINISHING_BLOW_BONUS: f32 = 1000.0;

/// Components of a candidate's utility.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Score {
    pub base_priority: f32,
    pub health_impact: f32,
    pub resource_penalty: f32,
    pub finishing_blow: f32,
}

impl Score {
    pub fn value(&self) -> f32 {
        self.base_priority + self.health_impact - self.resource_penalty + self.finishing_blow
    }
}

/// Scores one candidate against the current roster.
pub fn score_candidate(
    instance: &AbilityInstance,
    actor: &Combatant,
    roster: &Roster,
    targets: &[CombatantId],
) -> Result<Score, BattleError> {
    let targets = targets
        .iter()
        .map(|id| roster.combatant(*id))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Score {
        base_priority: instance.definition().ai_priority,
        health_impact: health_impact(instance, actor, roster, &targets)?,
        resource_penalty: resource_penalty(instance, actor),
        finishing_blow: finishing_blow(instance, actor, &targets),
    })
}

/// Sum over effects and living targets of the effect's weighted value.
pub fn health_impact(
    instance: &AbilityInstance,
    actor: &Combatant,
    roster: &Roster,
    targets: &[&Combatant],
) -> Result<f32, BattleError> {
    let mut total = 0.0;

    for effect in &instance.definition().effects {
        for (index, target) in targets.iter().enumerate() {
            if !target.is_alive() {
                continue;
            }
            let value =
                instance.expected_value(effect, actor.attributes(), target.attributes(), index)
                    as f32;

            total += match effect.kind {
                EffectKind::PhysicalDamage | EffectKind::MagicalDamage => {
                    damage_utility(value, target.health_fraction())
                }
                EffectKind::HealthHeal => heal_utility(value, target, roster)?,
                EffectKind::StaminaDamage => value * STAMINA_DAMAGE_FACTOR,
                EffectKind::StaminaRestore => value * STAMINA_RESTORE_FACTOR,
                EffectKind::ManaDamage => value * MANA_DAMAGE_FACTOR,
                EffectKind::ManaRestore => value * MANA_RESTORE_FACTOR,
                EffectKind::StatModify | EffectKind::StatusApply | EffectKind::StatusRemove => 0.0,
            };
        }
    }

    Ok(total)
}

fn damage_utility(damage: f32, health_fraction: f32) -> f32 {
    if health_fraction < DAMAGE_LOW_HEALTH {
        damage * DAMAGE_LOW_HEALTH_FACTOR
    } else if health_fraction < DAMAGE_MID_HEALTH {
        damage * DAMAGE_MID_HEALTH_FACTOR
    } else {
        damage
    }
}

fn heal_utility(heal: f32, target: &Combatant, roster: &Roster) -> Result<f32, BattleError> {
    let missing = target.missing_health() as f32;
    if missing <= 0.0 {
        return Ok(-OVERHEAL_PENALTY);
    }

    let fraction = target.health_fraction();
    let factor = if fraction < HEAL_LOW_HEALTH {
        HEAL_LOW_HEALTH_FACTOR
    } else if fraction < HEAL_MID_HEALTH {
        HEAL_MID_HEALTH_FACTOR
    } else {
        HEAL_HIGH_HEALTH_FACTOR
    };
    let mut utility = heal.min(missing) * factor;

    let health = target.health() as f32;
    let incoming = incoming_threat(roster, target.id())? as f32;
    let max_health = target.maximums().health as f32;

    if health <= incoming && health + heal > incoming {
        utility += LETHAL_RESCUE_BONUS;
    } else if fraction < CRITICAL_HEALTH && (health + heal) / max_health >= CRITICAL_HEALTH {
        utility += CRITICAL_LIFT_BONUS;
    }

    Ok(utility)
}

/// Largest expected damage any single activatable ability of a living opponent
/// could deal to `target` right now.
pub fn incoming_threat(roster: &Roster, target: CombatantId) -> Result<u32, BattleError> {
    let target_side = roster.side_of(target)?;
    let victim = roster.combatant(target)?;
    let mut worst = 0;

    for entry in roster.living_on(target_side.opposite()) {
        let attacker = &entry.combatant;
        for instance in attacker.abilities() {
            let definition = instance.definition();
            if !definition.deals_damage() || !instance.can_activate(attacker) {
                continue;
            }
            if !definition
                .targeting
                .matches(entry.side, false, target_side)
            {
                continue;
            }
            worst = worst.max(instance.expected_damage(attacker, victim, 0));
        }
    }

    Ok(worst)
}

/// Cost of using the ability now; scaled up as the actor's pools run low.
pub fn resource_penalty(instance: &AbilityInstance, actor: &Combatant) -> f32 {
    if !instance.can_activate(actor) {
        return UNUSABLE_PENALTY;
    }

    let costs = &instance.definition().costs;
    let weighted = |cost: u32, resource: ResourceKind, scale: f32| {
        let fraction = actor.resource_fraction(resource);
        cost as f32 * (1.0 + (1.0 - fraction) * RESOURCE_LOW_PENALTY_FACTOR * scale)
    };

    weighted(costs.mana, ResourceKind::Mana, 1.0)
        + weighted(costs.stamina, ResourceKind::Stamina, 0.5)
        + weighted(costs.health, ResourceKind::Health, 2.0)
}

/// +1000 once for every living target whose health the ability's total
/// expected damage would bring to zero.
pub fn finishing_blow(instance: &AbilityInstance, actor: &Combatant, targets: &[&Combatant]) -> f32 {
    if !instance.definition().deals_damage() {
        return 0.0;
    }

    targets
        .iter()
        .enumerate()
        .filter(|(index, target)| {
            target.is_alive() && instance.expected_damage(actor, target, *index) >= target.health()
        })
        .count() as f32
        * FINISHING_BLOW_BONUS
}
