//! One-line descriptions of turn events for the terminal.

use std::collections::HashMap;

use battle_core::{BattleEvent, Combatant, CombatantId};

/// Display names by combatant id.
#[derive(Clone, Debug, Default)]
pub struct Names(HashMap<CombatantId, String>);

impl Names {
    pub fn from_teams(side_a: &[Combatant], side_b: &[Combatant]) -> Self {
        Self(
            side_a
                .iter()
                .chain(side_b)
                .map(|c| (c.id(), c.name().to_owned()))
                .collect(),
        )
    }

    /// Name of `id`, or the id itself for strangers.
    pub fn get(&self, id: CombatantId) -> String {
        self.0.get(&id).cloned().unwrap_or_else(|| id.to_string())
    }
}

/// Describes turn-level events; everything else is left to the log.
pub fn describe(event: &BattleEvent, names: &Names) -> Option<String> {
    match event {
        BattleEvent::ActionChosen {
            actor,
            ability,
            targets,
            score,
        } => {
            let targets = targets
                .iter()
                .map(|id| names.get(*id))
                .collect::<Vec<_>>()
                .join(", ");
            Some(format!(
                "{} uses {} on {} (score {:.1})",
                names.get(*actor),
                ability,
                targets,
                score
            ))
        }
        BattleEvent::TurnForfeited { actor } => {
            Some(format!("{} has nothing to do", names.get(*actor)))
        }
        BattleEvent::CountersReset => Some("nobody can act; counters reset".to_owned()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{AbilityId, Attributes, GrowthParameters};

    fn names() -> Names {
        let a = Combatant::new(
            CombatantId(1),
            "Alron",
            Attributes::new(5, 5, 5),
            GrowthParameters::default(),
        );
        let b = Combatant::new(
            CombatantId(2),
            "Bebert",
            Attributes::new(5, 5, 5),
            GrowthParameters::default(),
        );
        Names::from_teams(&[a], &[b])
    }

    #[test]
    fn describes_chosen_action() {
        let event = BattleEvent::ActionChosen {
            actor: CombatantId(1),
            ability: AbilityId::from("fireball"),
            targets: vec![CombatantId(2), CombatantId(9)],
            score: 151.0,
        };

        assert_eq!(
            describe(&event, &names()).unwrap(),
            "Alron uses fireball on Bebert, #9 (score 151.0)"
        );
    }

    #[test]
    fn describes_forfeit() {
        let event = BattleEvent::TurnForfeited {
            actor: CombatantId(2),
        };
        assert_eq!(describe(&event, &names()).unwrap(), "Bebert has nothing to do");
    }

    #[test]
    fn skips_turn_started() {
        let event = BattleEvent::TurnStarted {
            turn: 1,
            actor: CombatantId(1),
            counter: 100.0,
        };
        assert!(describe(&event, &names()).is_none());
    }
}
