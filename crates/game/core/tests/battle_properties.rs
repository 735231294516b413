use std::collections::HashMap;
use std::sync::Arc;

use battle_core::{
    AbilityCatalog, AbilityDefinition, AbilityId, AiCommand, Attributes, BattleConfig,
    BattleEngine, BattleError, BattleEvent, Combatant, CombatantId, EffectKind, EffectSpec,
    GrowthParameters, ResourceCosts, ResourceCurrent, Side, TargetRule, TurnOutcome,
};

fn catalog() -> AbilityCatalog {
    AbilityCatalog::from_definitions([
        AbilityDefinition::new("basic_attack", "Basic Attack", TargetRule::SingleEnemy)
            .with_priority(50.0)
            .with_costs(ResourceCosts::new(0, 2, 0))
            .with_effect(EffectSpec::physical(100.0)),
        AbilityDefinition::new("fireball", "Fireball", TargetRule::MultipleEnemies)
            .with_priority(70.0)
            .with_target_count(3)
            .with_costs(ResourceCosts::new(3, 0, 0))
            .with_effect(
                EffectSpec::magical(85.0)
                    .with_primary_power(100.0)
                    .with_secondary_powers([70.0, 50.0]),
            ),
        AbilityDefinition::new("heal", "Heal", TargetRule::AllyOrSelf)
            .with_command(AiCommand::Heal)
            .with_priority(80.0)
            .with_costs(ResourceCosts::new(3, 0, 0))
            .with_effect(EffectSpec::heal(70.0)),
        AbilityDefinition::new("exhaust", "Exhaust", TargetRule::AllEnemies)
            .with_priority(10.0)
            .with_effect(EffectSpec::new(EffectKind::StaminaDamage, 9.0))
            .with_effect(EffectSpec::new(EffectKind::ManaDamage, 9.0)),
    ])
    .unwrap()
}

fn combatant(
    id: u64,
    attributes: Attributes,
    abilities: &[&str],
    catalog: &AbilityCatalog,
) -> Combatant {
    let mut c = Combatant::new(
        CombatantId(id),
        format!("c{id}"),
        attributes,
        GrowthParameters::new(5, 4, 4),
    );
    for ability in abilities {
        c.learn(catalog.resolve(&AbilityId::from(*ability)).unwrap());
    }
    c
}

fn assert_resources_in_bounds(engine: &BattleEngine) {
    for entry in engine.roster().iter() {
        let c = &entry.combatant;
        let max = c.maximums();
        assert!(c.health() <= max.health, "{} health out of bounds", c.name());
        assert!(c.stamina() <= max.stamina, "{} stamina out of bounds", c.name());
        assert!(c.mana() <= max.mana, "{} mana out of bounds", c.name());
    }
}

#[test]
fn full_battle_keeps_every_resource_in_bounds() {
    let catalog = catalog();
    let all = ["basic_attack", "fireball", "heal", "exhaust"];
    let side_a = vec![
        combatant(1, Attributes::new(8, 6, 9), &all, &catalog),
        combatant(2, Attributes::new(5, 10, 7), &all, &catalog),
        combatant(3, Attributes::new(10, 5, 5), &all, &catalog),
    ];
    let side_b = vec![
        combatant(4, Attributes::new(7, 7, 7), &all, &catalog),
        combatant(5, Attributes::new(6, 9, 10), &all, &catalog),
        combatant(6, Attributes::new(9, 8, 6), &all, &catalog),
    ];

    let mut engine = BattleEngine::new(BattleConfig::default().with_turn_limit(2_000));
    engine.initialize(side_a, side_b).unwrap();

    // Stalemates (everyone out of resources) stop at the turn limit; bounds
    // must hold either way.
    let result = loop {
        match engine.advance_one_turn() {
            Ok(report) => {
                assert_resources_in_bounds(&engine);
                if let TurnOutcome::Finished(result) = report.outcome {
                    break Some(result);
                }
            }
            Err(BattleError::TurnLimitExceeded { .. }) => break None,
            Err(other) => panic!("unexpected error: {other}"),
        }
    };

    if let Some(result) = result {
        let loser = result.winner.opposite();
        assert_eq!(engine.roster().living_count(loser), 0);
        assert!(!result.survivors.is_empty());
    }
    assert_eq!(engine.into_combatants().len(), 6);
}

#[test]
fn faster_combatant_acts_twice_as_often() {
    // Speed = 80 + END × 0.25: END 80 → 100, END 480 → 200.
    let slow = Combatant::new(
        CombatantId(1),
        "slow",
        Attributes::new(10, 80, 10),
        GrowthParameters::default(),
    );
    let fast = Combatant::new(
        CombatantId(2),
        "fast",
        Attributes::new(10, 480, 10),
        GrowthParameters::default(),
    );
    assert_eq!(slow.speed(), 100.0);
    assert_eq!(fast.speed(), 200.0);

    // Neither side can act, so every turn is a forfeit and nobody dies.
    let mut engine = BattleEngine::new(BattleConfig::default());
    engine.initialize(vec![slow], vec![fast]).unwrap();

    let mut turns: HashMap<CombatantId, u32> = HashMap::new();
    for _ in 0..300 {
        let report = engine.advance_one_turn().unwrap();
        let actor = report.outcome.actor().unwrap();
        *turns.entry(actor).or_default() += 1;
    }

    assert_eq!(turns[&CombatantId(1)], 100);
    assert_eq!(turns[&CombatantId(2)], 200);
}

#[test]
fn side_without_members_loses_immediately() {
    let catalog = catalog();
    let mut engine = BattleEngine::new(BattleConfig::default());
    engine
        .initialize(
            Vec::new(),
            vec![combatant(1, Attributes::new(5, 5, 5), &["basic_attack"], &catalog)],
        )
        .unwrap();

    let report = engine.advance_one_turn().unwrap();

    match report.outcome {
        TurnOutcome::Finished(result) => {
            assert_eq!(result.winner, Side::B);
            assert_eq!(result.turns, 0);
        }
        other => panic!("expected battle end, got {other:?}"),
    }
    assert!(
        report
            .events
            .iter()
            .any(|event| matches!(event, BattleEvent::BattleEnded { winner: Side::B, .. }))
    );
}

#[test]
fn side_starting_dead_loses_immediately() {
    let catalog = catalog();
    let corpse = combatant(1, Attributes::new(5, 5, 5), &["basic_attack"], &catalog)
        .with_resources(ResourceCurrent::new(0, 25, 35));
    let mut engine = BattleEngine::new(BattleConfig::default());
    engine
        .initialize(
            vec![corpse],
            vec![combatant(2, Attributes::new(5, 5, 5), &["basic_attack"], &catalog)],
        )
        .unwrap();

    let report = engine.advance_one_turn().unwrap();

    assert!(report.outcome.is_finished());
    assert_eq!(
        report.events[0],
        BattleEvent::CombatantRemoved {
            combatant: CombatantId(1)
        }
    );
}

#[test]
fn attack_turn_reports_chosen_action_and_damage() {
    let catalog = catalog();
    let attacker = combatant(1, Attributes::new(10, 40, 10), &["basic_attack"], &catalog);
    let defender = combatant(2, Attributes::new(10, 10, 10), &[], &catalog);

    let mut engine = BattleEngine::new(BattleConfig::default());
    engine.initialize(vec![attacker], vec![defender]).unwrap();
    let report = engine.advance_one_turn().unwrap();

    assert_eq!(
        report.outcome,
        TurnOutcome::Acted {
            actor: CombatantId(1),
            ability: AbilityId::from("basic_attack"),
            targets: vec![CombatantId(2)],
        }
    );
    assert_eq!(engine.roster().get(CombatantId(2)).unwrap().health(), 898);
    assert_eq!(engine.roster().get(CombatantId(1)).unwrap().stamina(), 198);
    assert!(report.events.iter().any(|event| matches!(
        event,
        BattleEvent::ActionChosen { score, .. } if *score == 50.0 + 102.0 - 2.0
    )));
}

#[test]
fn same_seed_replays_identically() {
    let run = |seed: u64| {
        let catalog = catalog();
        let all = ["basic_attack", "fireball", "heal"];
        let side_a = (1..=4)
            .map(|id| combatant(id, Attributes::new(6 + id as u32, 7, 8), &all, &catalog))
            .collect();
        let side_b = (5..=8)
            .map(|id| combatant(id, Attributes::new(5 + id as u32 % 3, 9, 6), &all, &catalog))
            .collect();
        let mut engine = BattleEngine::new(BattleConfig::default().with_seed(seed));
        engine.initialize(side_a, side_b).unwrap();

        let mut log = Vec::new();
        loop {
            let report = engine.advance_one_turn().unwrap();
            let done = report.outcome.is_finished();
            log.push(report);
            if done {
                break;
            }
        }
        log
    };

    assert_eq!(run(42), run(42));
}

#[test]
fn learned_abilities_are_bound_to_their_owner() {
    let catalog = catalog();
    let definition: Arc<AbilityDefinition> = catalog.resolve(&AbilityId::from("heal")).unwrap();
    let a = Combatant::new(
        CombatantId(1),
        "a",
        Attributes::new(5, 5, 5),
        GrowthParameters::default(),
    )
    .with_ability(definition.clone());
    let b = Combatant::new(
        CombatantId(2),
        "b",
        Attributes::new(5, 5, 5),
        GrowthParameters::default(),
    )
    .with_ability(definition);

    assert_eq!(a.abilities()[0].wielder(), CombatantId(1));
    assert_eq!(b.abilities()[0].wielder(), CombatantId(2));
}
