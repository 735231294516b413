//! Two-sided battle roster.

use crate::engine::BattleError;
use crate::state::{Combatant, CombatantId, Side};

/// A combatant tagged with the side it fights for in this battle.
#[derive(Clone, Debug, PartialEq)]
pub struct RosterEntry {
    pub combatant: Combatant,
    pub side: Side,
}

impl RosterEntry {
    pub fn new(combatant: Combatant, side: Side) -> Self {
        Self { combatant, side }
    }

    pub fn id(&self) -> CombatantId {
        self.combatant.id()
    }
}

/// Union of both sides in insertion order (side A first, then side B).
///
/// Insertion order is the scheduler's tie-breaker, so entries are never
/// reordered; removal keeps the relative order of the rest.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a roster from two ordered lists.
    pub fn from_sides(
        side_a: impl IntoIterator<Item = Combatant>,
        side_b: impl IntoIterator<Item = Combatant>,
    ) -> Result<Self, BattleError> {
        let mut roster = Self::new();
        for combatant in side_a {
            roster.push(combatant, Side::A)?;
        }
        for combatant in side_b {
            roster.push(combatant, Side::B)?;
        }
        Ok(roster)
    }

    /// Appends a combatant. Ids must be unique within a battle.
    pub fn push(&mut self, combatant: Combatant, side: Side) -> Result<(), BattleError> {
        let id = combatant.id();
        if self.contains(id) {
            return Err(BattleError::DuplicateCombatant { id });
        }
        self.entries.push(RosterEntry::new(combatant, side));
        Ok(())
    }

    pub fn contains(&self, id: CombatantId) -> bool {
        self.entries.iter().any(|entry| entry.id() == id)
    }

    pub fn get(&self, id: CombatantId) -> Option<&Combatant> {
        self.entry(id).map(|entry| &entry.combatant)
    }

    pub fn get_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.entries
            .iter_mut()
            .find(|entry| entry.id() == id)
            .map(|entry| &mut entry.combatant)
    }

    pub fn entry(&self, id: CombatantId) -> Option<&RosterEntry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    /// Like [`Roster::get`] but an unknown id is an error.
    pub fn combatant(&self, id: CombatantId) -> Result<&Combatant, BattleError> {
        self.get(id).ok_or(BattleError::UnknownCombatant { id })
    }

    pub fn combatant_mut(&mut self, id: CombatantId) -> Result<&mut Combatant, BattleError> {
        self.get_mut(id).ok_or(BattleError::UnknownCombatant { id })
    }

    /// Side lookup. Unknown ids are never defaulted to a side.
    pub fn side_of(&self, id: CombatantId) -> Result<Side, BattleError> {
        self.entry(id)
            .map(|entry| entry.side)
            .ok_or(BattleError::UnknownCombatant { id })
    }

    pub fn iter(&self) -> impl Iterator<Item = &RosterEntry> {
        self.entries.iter()
    }

    pub fn living(&self) -> impl Iterator<Item = &RosterEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.combatant.is_alive())
    }

    pub fn living_on(&self, side: Side) -> impl Iterator<Item = &RosterEntry> {
        self.living().filter(move |entry| entry.side == side)
    }

    pub fn living_count(&self, side: Side) -> usize {
        self.living_on(side).count()
    }

    pub fn ids_on(&self, side: Side) -> Vec<CombatantId> {
        self.entries
            .iter()
            .filter(|entry| entry.side == side)
            .map(RosterEntry::id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hands the combatants back in insertion order.
    pub fn into_entries(self) -> Vec<RosterEntry> {
        self.entries
    }

    pub fn into_combatants(self) -> Vec<Combatant> {
        self.entries
            .into_iter()
            .map(|entry| entry.combatant)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{Attributes, GrowthParameters};

    fn unit(id: u64) -> Combatant {
        Combatant::new(
            CombatantId(id),
            format!("unit-{id}"),
            Attributes::new(5, 5, 5),
            GrowthParameters::default(),
        )
    }

    #[test]
    fn keeps_insertion_order_a_then_b() {
        let roster = Roster::from_sides([unit(3), unit(1)], [unit(2)]).unwrap();
        let order: Vec<_> = roster.iter().map(|e| (e.id().0, e.side)).collect();
        assert_eq!(order, vec![(3, Side::A), (1, Side::A), (2, Side::B)]);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = Roster::from_sides([unit(1)], [unit(1)]).unwrap_err();
        assert_eq!(err, BattleError::DuplicateCombatant { id: CombatantId(1) });
    }

    #[test]
    fn unknown_side_lookup_is_an_error() {
        let roster = Roster::from_sides([unit(1)], []).unwrap();
        assert_eq!(
            roster.side_of(CombatantId(9)),
            Err(BattleError::UnknownCombatant { id: CombatantId(9) })
        );
    }

    #[test]
    fn living_filters_the_dead() {
        let mut roster = Roster::from_sides([unit(1), unit(2)], [unit(3)]).unwrap();
        roster.get_mut(CombatantId(2)).unwrap().take_damage(10_000);
        assert_eq!(roster.living_count(Side::A), 1);
        assert_eq!(roster.living_count(Side::B), 1);
        assert_eq!(roster.len(), 3);
    }
}
