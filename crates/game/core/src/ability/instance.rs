//! Wielder-bound ability instances and effect resolution.

use std::sync::Arc;

use super::{AbilityDefinition, AbilityId, EffectKind, EffectSpec};
use crate::combat::{
    AbilityReport, AppliedEffect, EffectOutcome, calculate_damage, calculate_heal,
    resource_amount,
};
use crate::engine::BattleError;
use crate::events::CombatantChange;
use crate::state::{Combatant, CombatantId, Roster};
use crate::stats::{Attributes, ResourceKind};

/// One learned ability: a shared definition bound to the combatant that owns
/// it. Holds no state beyond that binding.
#[derive(Clone, Debug, PartialEq)]
pub struct AbilityInstance {
    definition: Arc<AbilityDefinition>,
    wielder: CombatantId,
}

impl AbilityInstance {
    pub fn new(definition: Arc<AbilityDefinition>, wielder: CombatantId) -> Self {
        Self {
            definition,
            wielder,
        }
    }

    pub fn definition(&self) -> &AbilityDefinition {
        &self.definition
    }

    pub fn id(&self) -> &AbilityId {
        &self.definition.id
    }

    pub fn wielder(&self) -> CombatantId {
        self.wielder
    }

    /// Costs are affordable: mana and stamina at least the cost, health
    /// strictly above it.
    pub fn can_activate(&self, actor: &Combatant) -> bool {
        let costs = &self.definition.costs;
        actor.mana() >= costs.mana
            && actor.stamina() >= costs.stamina
            && actor.health() > costs.health
    }

    /// Every living combatant the targeting rule accepts, in roster order.
    pub fn valid_targets(&self, roster: &Roster) -> Result<Vec<CombatantId>, BattleError> {
        let wielder_side = roster.side_of(self.wielder)?;
        let rule = self.definition.targeting;

        Ok(roster
            .living()
            .filter(|entry| rule.matches(wielder_side, entry.id() == self.wielder, entry.side))
            .map(|entry| entry.id())
            .collect())
    }

    // ===== projections =====

    /// Value one effect would produce against a target at `index` in the
    /// subset: damage or heal before clamping, or the stamina/mana amount.
    /// Reserved kinds project to 0.
    pub fn expected_value(
        &self,
        effect: &EffectSpec,
        actor: &Attributes,
        target: &Attributes,
        index: usize,
    ) -> u32 {
        let power = effect.power_for(index);
        match effect.kind {
            EffectKind::PhysicalDamage | EffectKind::MagicalDamage => {
                calculate_damage(actor, target, effect.damage_type, power)
            }
            EffectKind::HealthHeal => calculate_heal(actor, power),
            EffectKind::StaminaDamage
            | EffectKind::StaminaRestore
            | EffectKind::ManaDamage
            | EffectKind::ManaRestore => resource_amount(power),
            EffectKind::StatModify | EffectKind::StatusApply | EffectKind::StatusRemove => 0,
        }
    }

    /// Total health damage against `target` at subset `index`.
    pub fn expected_damage(&self, actor: &Combatant, target: &Combatant, index: usize) -> u32 {
        self.sum_where(actor, target, index, |kind| kind.is_damage())
    }

    /// Total heal against `target` at subset `index`, before clamping.
    pub fn expected_heal(&self, actor: &Combatant, target: &Combatant, index: usize) -> u32 {
        self.sum_where(actor, target, index, |kind| kind.is_heal())
    }

    /// Signed stamina or mana change against `target`, before clamping.
    /// Health is covered by the damage/heal projections and yields 0.
    pub fn expected_resource_delta(
        &self,
        actor: &Combatant,
        target: &Combatant,
        index: usize,
        resource: ResourceKind,
    ) -> i64 {
        let (drain, restore) = match resource {
            ResourceKind::Stamina => (EffectKind::StaminaDamage, EffectKind::StaminaRestore),
            ResourceKind::Mana => (EffectKind::ManaDamage, EffectKind::ManaRestore),
            ResourceKind::Health => return 0,
        };
        let restored = self.sum_where(actor, target, index, |kind| kind == restore) as i64;
        let drained = self.sum_where(actor, target, index, |kind| kind == drain) as i64;
        restored - drained
    }

    fn sum_where(
        &self,
        actor: &Combatant,
        target: &Combatant,
        index: usize,
        filter: impl Fn(EffectKind) -> bool,
    ) -> u32 {
        self.definition
            .effects
            .iter()
            .filter(|effect| filter(effect.kind))
            .map(|effect| self.expected_value(effect, actor.attributes(), target.attributes(), index))
            .fold(0u32, u32::saturating_add)
    }

    // ===== application =====

    /// Pays the costs and applies every effect, in order, to every target, in
    /// order. Targets that are dead when an effect reaches them are skipped.
    ///
    /// If the wielder cannot pay, nothing happens and the report comes back
    /// with `activated == false`.
    pub fn apply(
        &self,
        roster: &mut Roster,
        targets: &[CombatantId],
    ) -> Result<AbilityReport, BattleError> {
        let mut report = AbilityReport::new(self.definition.id.clone(), self.wielder);

        let wielder = roster.combatant(self.wielder)?;
        if !self.can_activate(wielder) {
            tracing::warn!(
                "{} cannot activate {}: insufficient resources",
                wielder.name(),
                self.definition.id
            );
            return Ok(report);
        }
        let attacker = *wielder.attributes();
        report.activated = true;

        let costs = self.definition.costs;
        let wielder = roster.combatant_mut(self.wielder)?;
        for (resource, cost) in [
            (ResourceKind::Mana, costs.mana),
            (ResourceKind::Stamina, costs.stamina),
            (ResourceKind::Health, costs.health),
        ] {
            if cost > 0 {
                report.changes.push(wielder.drain(resource, cost));
            }
        }

        for (effect_index, effect) in self.definition.effects.iter().enumerate() {
            if effect.kind.is_reserved() {
                tracing::warn!(
                    "{}: effect {} is not implemented, skipping",
                    self.definition.id,
                    effect.kind
                );
                report.unimplemented.push(effect.kind);
                continue;
            }

            for (index, target_id) in targets.iter().enumerate() {
                let target = roster.combatant_mut(*target_id)?;
                if !target.is_alive() {
                    tracing::debug!("{} skipped: {} is already down", self.definition.id, target_id);
                    continue;
                }

                let value = self.expected_value(effect, &attacker, target.attributes(), index);
                let (outcome, change) = resolve(effect.kind, value, target);

                report.effects.push(AppliedEffect {
                    target: *target_id,
                    effect_index,
                    outcome,
                });
                report.changes.push(change);
            }
        }

        Ok(report)
    }
}

fn resolve(
    kind: EffectKind,
    value: u32,
    target: &mut Combatant,
) -> (EffectOutcome, CombatantChange) {
    let resource_change = |target: &mut Combatant, resource: ResourceKind, drain: bool| {
        let change = if drain {
            target.drain(resource, value)
        } else {
            target.restore(resource, value)
        };
        let delta = change.resource_delta().unwrap_or_default();
        (EffectOutcome::Resource { resource, delta }, change)
    };

    match kind {
        EffectKind::HealthHeal => {
            let change = target.heal(value);
            let restored = change.resource_delta().unwrap_or_default().max(0) as u32;
            (
                EffectOutcome::Heal {
                    planned: value,
                    restored,
                },
                change,
            )
        }
        EffectKind::StaminaDamage => resource_change(target, ResourceKind::Stamina, true),
        EffectKind::StaminaRestore => resource_change(target, ResourceKind::Stamina, false),
        EffectKind::ManaDamage => resource_change(target, ResourceKind::Mana, true),
        EffectKind::ManaRestore => resource_change(target, ResourceKind::Mana, false),
        // Damage kinds; reserved kinds never reach this point.
        _ => {
            let change = target.take_damage(value);
            let dealt = (-change.resource_delta().unwrap_or_default()).max(0) as u32;
            (
                EffectOutcome::Damage {
                    planned: value,
                    dealt,
                    lethal: !target.is_alive(),
                },
                change,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::{ResourceCosts, TargetRule};
    use crate::stats::{GrowthParameters, ResourceCurrent};

    fn unit(id: u64, attributes: Attributes) -> Combatant {
        Combatant::new(
            CombatantId(id),
            format!("unit-{id}"),
            attributes,
            GrowthParameters::default(),
        )
    }

    fn roster_with(definition: AbilityDefinition) -> (Roster, AbilityInstance) {
        let definition = Arc::new(definition);
        let caster = unit(1, Attributes::new(10, 10, 10)).with_ability(definition.clone());
        let instance = caster.abilities()[0].clone();
        let roster = Roster::from_sides(
            [caster, unit(2, Attributes::new(10, 10, 10))],
            [
                unit(3, Attributes::new(10, 10, 10)),
                unit(4, Attributes::new(1, 1, 1)),
            ],
        )
        .unwrap();
        (roster, instance)
    }

    #[test]
    fn valid_targets_follow_the_rule() {
        let cases = [
            (TargetRule::SelfOnly, vec![1]),
            (TargetRule::SingleEnemy, vec![3, 4]),
            (TargetRule::SingleAlly, vec![2]),
            (TargetRule::AllyOrSelf, vec![1, 2]),
            (TargetRule::AnySingle, vec![1, 2, 3, 4]),
            (TargetRule::RandomAllies, vec![2]),
        ];
        for (rule, expected) in cases {
            let (roster, instance) = roster_with(AbilityDefinition::new("t", "T", rule));
            let ids: Vec<u64> = instance
                .valid_targets(&roster)
                .unwrap()
                .into_iter()
                .map(|id| id.0)
                .collect();
            assert_eq!(ids, expected, "{rule}");
        }
    }

    #[test]
    fn dead_combatants_are_never_valid_targets() {
        let (mut roster, instance) =
            roster_with(AbilityDefinition::new("t", "T", TargetRule::AllEnemies));
        roster.get_mut(CombatantId(3)).unwrap().take_damage(u32::MAX);
        assert_eq!(instance.valid_targets(&roster).unwrap(), vec![CombatantId(4)]);
    }

    #[test]
    fn apply_deducts_costs_then_damages() {
        let definition = AbilityDefinition::new("strike", "Strike", TargetRule::SingleEnemy)
            .with_costs(ResourceCosts::new(0, 2, 0))
            .with_effect(EffectSpec::physical(100.0));
        let (mut roster, instance) = roster_with(definition);

        let report = instance.apply(&mut roster, &[CombatantId(3)]).unwrap();

        assert!(report.activated);
        assert_eq!(roster.get(CombatantId(1)).unwrap().stamina(), 48);
        assert_eq!(roster.get(CombatantId(3)).unwrap().health(), 1000 - 102);
        assert_eq!(report.total_damage(), 102);
    }

    #[test]
    fn refused_activation_changes_nothing() {
        let definition = AbilityDefinition::new("nova", "Nova", TargetRule::AllEnemies)
            .with_costs(ResourceCosts::new(500, 0, 0))
            .with_effect(EffectSpec::magical(100.0));
        let (mut roster, instance) = roster_with(definition);
        let before = roster.clone();

        let report = instance
            .apply(&mut roster, &[CombatantId(3), CombatantId(4)])
            .unwrap();

        assert!(!report.activated);
        assert!(report.changes.is_empty());
        assert_eq!(roster, before);
    }

    #[test]
    fn health_cost_must_leave_the_wielder_alive() {
        let definition = AbilityDefinition::new("pact", "Pact", TargetRule::SelfOnly)
            .with_costs(ResourceCosts::new(0, 0, 1000));
        let (roster, instance) = roster_with(definition);
        assert!(!instance.can_activate(roster.get(CombatantId(1)).unwrap()));
    }

    #[test]
    fn targets_killed_by_an_earlier_effect_are_skipped() {
        let definition = AbilityDefinition::new("combo", "Combo", TargetRule::SingleEnemy)
            .with_effect(EffectSpec::physical(1000.0))
            .with_effect(EffectSpec::new(EffectKind::ManaDamage, 5.0));
        let (mut roster, instance) = roster_with(definition);

        let report = instance.apply(&mut roster, &[CombatantId(4)]).unwrap();

        assert_eq!(report.effects.len(), 1);
        assert_eq!(report.kills().collect::<Vec<_>>(), vec![CombatantId(4)]);
        assert_eq!(roster.get(CombatantId(4)).unwrap().mana(), 7);
    }

    #[test]
    fn heal_is_clamped_by_missing_health() {
        let definition = AbilityDefinition::new("heal", "Heal", TargetRule::AllyOrSelf)
            .with_effect(EffectSpec::heal(70.0));
        let (mut roster, instance) = roster_with(definition);
        roster.get_mut(CombatantId(2)).unwrap().take_damage(30);

        let report = instance.apply(&mut roster, &[CombatantId(2)]).unwrap();

        assert_eq!(
            report.effects[0].outcome,
            EffectOutcome::Heal {
                planned: 80,
                restored: 30
            }
        );
        assert_eq!(roster.get(CombatantId(2)).unwrap().health(), 1000);
    }

    #[test]
    fn overrides_apply_per_subset_index() {
        let definition = AbilityDefinition::new("fireball", "Fireball", TargetRule::MultipleEnemies)
            .with_target_count(2)
            .with_effect(
                EffectSpec::magical(85.0)
                    .with_damage_type(crate::ability::DamageType::Pure)
                    .with_primary_power(100.0)
                    .with_secondary_powers([70.0]),
            );
        let (mut roster, instance) = roster_with(definition);

        let report = instance
            .apply(&mut roster, &[CombatantId(3), CombatantId(4)])
            .unwrap();

        let dealt: Vec<u32> = report
            .effects
            .iter()
            .map(|applied| match applied.outcome {
                EffectOutcome::Damage { planned, .. } => planned,
                _ => 0,
            })
            .collect();
        assert_eq!(dealt, vec![100, 70]);
    }

    #[test]
    fn resource_effects_clamp_to_pool_bounds() {
        let definition = AbilityDefinition::new("drain", "Drain", TargetRule::SingleEnemy)
            .with_effect(EffectSpec::new(EffectKind::StaminaDamage, 80.0))
            .with_effect(EffectSpec::new(EffectKind::ManaRestore, 12.9));
        let (mut roster, instance) = roster_with(definition);
        let target = roster.get_mut(CombatantId(3)).unwrap();
        *target = target.clone().with_resources(ResourceCurrent::new(1000, 50, 65));

        let report = instance.apply(&mut roster, &[CombatantId(3)]).unwrap();

        let target = roster.get(CombatantId(3)).unwrap();
        assert_eq!(target.stamina(), 0);
        assert_eq!(target.mana(), 70);
        assert_eq!(
            report.effects[1].outcome,
            EffectOutcome::Resource {
                resource: ResourceKind::Mana,
                delta: 5
            }
        );
    }

    #[test]
    fn reserved_effects_are_reported_and_skipped() {
        let definition = AbilityDefinition::new("hex", "Hex", TargetRule::SingleEnemy)
            .with_effect(EffectSpec::new(EffectKind::StatusApply, 0.0).with_status("poison", 3));
        let (mut roster, instance) = roster_with(definition);

        let report = instance.apply(&mut roster, &[CombatantId(3)]).unwrap();

        assert!(report.activated);
        assert!(report.effects.is_empty());
        assert_eq!(report.unimplemented, vec![EffectKind::StatusApply]);
    }

    #[test]
    fn unknown_wielder_side_is_an_error() {
        let definition = Arc::new(AbilityDefinition::new("t", "T", TargetRule::SingleEnemy));
        let orphan = AbilityInstance::new(definition, CombatantId(99));
        let roster = Roster::from_sides([unit(1, Attributes::new(1, 1, 1))], []).unwrap();
        assert_eq!(
            orphan.valid_targets(&roster),
            Err(BattleError::UnknownCombatant { id: CombatantId(99) })
        );
    }

    #[test]
    fn expected_resource_delta_nets_drain_and_restore() {
        let definition = AbilityDefinition::new("swap", "Swap", TargetRule::SingleEnemy)
            .with_effect(EffectSpec::new(EffectKind::ManaDamage, 9.0))
            .with_effect(EffectSpec::new(EffectKind::ManaRestore, 4.0));
        let (roster, instance) = roster_with(definition);
        let actor = roster.get(CombatantId(1)).unwrap();
        let target = roster.get(CombatantId(3)).unwrap();
        assert_eq!(
            instance.expected_resource_delta(actor, target, 0, ResourceKind::Mana),
            -5
        );
        assert_eq!(
            instance.expected_resource_delta(actor, target, 0, ResourceKind::Stamina),
            0
        );
    }
}
