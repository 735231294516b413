use crate::state::CombatantId;

/// Speed counter of one combatant still in the working set.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeedCounter {
    pub combatant: CombatantId,
    pub value: f32,
}

/// Battle-scoped scheduling state.
///
/// `counters` doubles as the working set: a combatant is scheduled as long as
/// it has a counter here, in roster insertion order. Dead combatants are
/// dropped from it but stay in the roster so their records can be handed back.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// Number of turns taken so far (acted or forfeited).
    pub turn: u64,
    pub counters: Vec<SpeedCounter>,
}

impl TurnState {
    /// Zeroed counters for the given working set.
    pub fn new(order: impl IntoIterator<Item = CombatantId>) -> Self {
        Self {
            turn: 0,
            counters: order
                .into_iter()
                .map(|combatant| SpeedCounter {
                    combatant,
                    value: 0.0,
                })
                .collect(),
        }
    }

    pub fn counter(&self, id: CombatantId) -> Option<f32> {
        self.counters
            .iter()
            .find(|counter| counter.combatant == id)
            .map(|counter| counter.value)
    }

    pub fn counter_mut(&mut self, id: CombatantId) -> Option<&mut f32> {
        self.counters
            .iter_mut()
            .find(|counter| counter.combatant == id)
            .map(|counter| &mut counter.value)
    }

    /// Drops a combatant from the working set. Returns whether it was present.
    pub fn remove(&mut self, id: CombatantId) -> bool {
        let before = self.counters.len();
        self.counters.retain(|counter| counter.combatant != id);
        self.counters.len() != before
    }

    pub fn reset(&mut self) {
        for counter in &mut self.counters {
            counter.value = 0.0;
        }
    }

    /// Strictly greatest counter; the first one seen wins ties.
    pub fn leader(&self) -> Option<SpeedCounter> {
        let mut best: Option<SpeedCounter> = None;
        for counter in &self.counters {
            match best {
                Some(current) if counter.value <= current.value => {}
                _ => best = Some(*counter),
            }
        }
        best
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}
