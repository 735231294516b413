//! Target subset enumeration.

use std::cmp::Ordering;

use crate::ability::{AbilityInstance, TargetRule};
use crate::config::BattleConfig;
use crate::engine::BattleError;
use crate::env::{RngOracle, compute_seed};
use crate::state::{CombatantId, Roster};

/// Identifies the draws of one evaluation so sampling is reproducible.
#[derive(Clone, Copy, Debug)]
pub struct SampleContext {
    pub nonce: u64,
    pub actor: CombatantId,
    pub ability_index: usize,
}

impl SampleContext {
    fn seed(&self, config: &BattleConfig, sample: usize) -> u64 {
        let context = ((self.ability_index as u32) << 8) | (sample as u32 & 0xff);
        compute_seed(config.seed, self.nonce, self.actor.0, context)
    }
}

/// Every subset of valid targets worth scoring for one ability.
///
/// - Whole-side rules: one subset with every valid target
/// - Single rules: one subset per valid target
/// - Group rules: all targets if they fit, otherwise the heuristic best
///   subset plus random samples, de-duplicated by membership
pub fn target_subsets<R: RngOracle>(
    instance: &AbilityInstance,
    roster: &Roster,
    config: &BattleConfig,
    rng: &R,
    ctx: SampleContext,
) -> Result<Vec<Vec<CombatantId>>, BattleError> {
    let valid = instance.valid_targets(roster)?;
    if valid.is_empty() {
        return Ok(Vec::new());
    }

    let definition = instance.definition();
    let rule = definition.targeting;

    if rule.is_whole() {
        return Ok(vec![valid]);
    }
    if rule.is_single() {
        return Ok(valid.into_iter().map(|id| vec![id]).collect());
    }

    let count = definition.target_count;
    if valid.len() <= count {
        return Ok(vec![valid]);
    }
    if count <= 1 {
        return Ok(valid.into_iter().map(|id| vec![id]).collect());
    }

    let mut groups = vec![best_subset(rule, &valid, roster, count)];
    for sample in 0..config.random_target_groups {
        let mut shuffled = valid.clone();
        rng.shuffle(ctx.seed(config, sample), &mut shuffled);
        shuffled.truncate(count);
        groups.push(shuffled);
    }

    Ok(dedup_by_membership(groups))
}

/// Enemy rules: the `count` lowest current health. Ally rules: the `count`
/// lowest health fraction. Ties keep roster order.
fn best_subset(
    rule: TargetRule,
    valid: &[CombatantId],
    roster: &Roster,
    count: usize,
) -> Vec<CombatantId> {
    let mut ranked: Vec<_> = valid
        .iter()
        .filter_map(|id| roster.get(*id))
        .collect();

    if rule.targets_enemies() {
        ranked.sort_by_key(|combatant| combatant.health());
    } else {
        ranked.sort_by(|a, b| {
            a.health_fraction()
                .partial_cmp(&b.health_fraction())
                .unwrap_or(Ordering::Equal)
        });
    }

    ranked.into_iter().take(count).map(|c| c.id()).collect()
}

/// Drops subsets whose members equal an earlier subset's, ignoring order.
fn dedup_by_membership(groups: Vec<Vec<CombatantId>>) -> Vec<Vec<CombatantId>> {
    let mut seen: Vec<Vec<CombatantId>> = Vec::with_capacity(groups.len());
    let mut unique = Vec::with_capacity(groups.len());

    for group in groups {
        let mut key = group.clone();
        key.sort_unstable();
        if !seen.contains(&key) {
            seen.push(key);
            unique.push(group);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::ability::AbilityDefinition;
    use crate::env::PcgRng;
    use crate::state::Combatant;
    use crate::stats::{Attributes, GrowthParameters};

    fn unit(id: u64, damage_taken: u32) -> Combatant {
        let mut combatant = Combatant::new(
            CombatantId(id),
            format!("unit-{id}"),
            Attributes::new(10, 10, 10),
            GrowthParameters::default(),
        );
        combatant.take_damage(damage_taken);
        combatant
    }

    fn subsets(rule: TargetRule, count: usize, enemies: Vec<Combatant>) -> Vec<Vec<u64>> {
        let definition = Arc::new(AbilityDefinition::new("a", "A", rule).with_target_count(count));
        let caster = unit(1, 0).with_ability(definition);
        let instance = caster.abilities()[0].clone();
        let roster = Roster::from_sides([caster], enemies).unwrap();
        let ctx = SampleContext {
            nonce: 0,
            actor: CombatantId(1),
            ability_index: 0,
        };

        target_subsets(&instance, &roster, &BattleConfig::default(), &PcgRng, ctx)
            .unwrap()
            .into_iter()
            .map(|group| group.into_iter().map(|id| id.0).collect())
            .collect()
    }

    #[test]
    fn single_rule_yields_one_subset_per_target() {
        let groups = subsets(TargetRule::SingleEnemy, 1, vec![unit(2, 0), unit(3, 0)]);
        assert_eq!(groups, vec![vec![2], vec![3]]);
    }

    #[test]
    fn whole_side_rule_yields_one_subset() {
        let groups = subsets(TargetRule::AllEnemies, 1, vec![unit(2, 0), unit(3, 0)]);
        assert_eq!(groups, vec![vec![2, 3]]);
    }

    #[test]
    fn group_rule_with_few_targets_takes_all() {
        let groups = subsets(TargetRule::MultipleEnemies, 3, vec![unit(2, 0), unit(3, 0)]);
        assert_eq!(groups, vec![vec![2, 3]]);
    }

    #[test]
    fn group_rule_best_subset_comes_first_and_subsets_are_unique() {
        let enemies = vec![unit(2, 100), unit(3, 900), unit(4, 0), unit(5, 500)];
        let groups = subsets(TargetRule::MultipleEnemies, 2, enemies);

        assert_eq!(groups[0], vec![3, 5]);
        assert!(groups.len() >= 1 && groups.len() <= 6);
        for group in &groups {
            assert_eq!(group.len(), 2);
        }
        let mut keys: Vec<Vec<u64>> = groups
            .iter()
            .map(|g| {
                let mut k = g.clone();
                k.sort_unstable();
                k
            })
            .collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), groups.len());
    }

    #[test]
    fn ally_best_subset_ranks_by_health_fraction() {
        let ally = |id, strength, damage_taken| {
            let mut combatant = Combatant::new(
                CombatantId(id),
                format!("ally-{id}"),
                Attributes::new(strength, 10, 10),
                GrowthParameters::default(),
            );
            combatant.take_damage(damage_taken);
            combatant
        };
        let definition = Arc::new(
            AbilityDefinition::new("mend", "Mend", TargetRule::MultipleAllies).with_target_count(2),
        );
        let caster = unit(1, 0).with_ability(definition);
        let instance = caster.abilities()[0].clone();
        // 1000/2000 (50%), 300/1000 (30%), 95/100 (95%, but the fewest points)
        let roster = Roster::from_sides(
            [caster, ally(2, 20, 1000), ally(3, 10, 700), ally(4, 1, 5)],
            [],
        )
        .unwrap();
        let ctx = SampleContext {
            nonce: 0,
            actor: CombatantId(1),
            ability_index: 0,
        };

        let groups =
            target_subsets(&instance, &roster, &BattleConfig::default(), &PcgRng, ctx).unwrap();

        assert_eq!(groups[0], vec![CombatantId(3), CombatantId(2)]);
    }

    #[test]
    fn group_rule_with_count_one_enumerates_singles() {
        let groups = subsets(
            TargetRule::RandomEnemies,
            1,
            vec![unit(2, 0), unit(3, 0), unit(4, 0)],
        );
        assert_eq!(groups, vec![vec![2], vec![3], vec![4]]);
    }

    #[test]
    fn sampling_is_deterministic() {
        let enemies = || vec![unit(2, 0), unit(3, 0), unit(4, 0), unit(5, 0), unit(6, 0)];
        assert_eq!(
            subsets(TargetRule::RandomEnemies, 2, enemies()),
            subsets(TargetRule::RandomEnemies, 2, enemies())
        );
    }

    #[test]
    fn dedup_ignores_order() {
        let groups = vec![
            vec![CombatantId(1), CombatantId(2)],
            vec![CombatantId(2), CombatantId(1)],
            vec![CombatantId(3)],
        ];
        assert_eq!(
            dedup_by_membership(groups),
            vec![vec![CombatantId(1), CombatantId(2)], vec![CombatantId(3)]]
        );
    }
}
