//! Random combatant generation.
//!
//! Every combatant starts at level 1 with full resources, a basic attack and
//! one or more extra abilities drawn from a pool. Generation is driven by a
//! seeded [`StdRng`], so a factory seed always yields the same recruits.

use std::ops::RangeInclusive;

use battle_core::{
    AbilityCatalog, AbilityId, Attributes, CatalogError, Combatant, CombatantId, GrowthParameters,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Ability every generated combatant knows.
pub const BASIC_ATTACK: &str = "basic_attack";

/// Default pool of extra abilities.
pub const EXTRA_ABILITIES: [&str; 2] = ["fireball", "heal"];

const NAME_PREFIXES: [&str; 10] = ["Al", "Be", "Ce", "De", "El", "Fa", "Ga", "Ha", "Il", "Jo"];
const NAME_SUFFIXES: [&str; 10] = [
    "ron", "bert", "vin", "ton", "rick", "son", "mar", "len", "don", "fred",
];

const ATTRIBUTE_RANGE: RangeInclusive<u32> = 5..=10;
const GROWTH_POINTS: u32 = 13;
const MAX_EXTRA_ABILITIES: usize = 3;

/// Builds random combatants from an [`AbilityCatalog`].
pub struct CombatantFactory<'a> {
    catalog: &'a AbilityCatalog,
    rng: StdRng,
    next_id: u64,
    extras: Vec<AbilityId>,
}

impl<'a> CombatantFactory<'a> {
    pub fn new(catalog: &'a AbilityCatalog, seed: u64) -> Self {
        Self {
            catalog,
            rng: StdRng::seed_from_u64(seed),
            next_id: 1,
            extras: EXTRA_ABILITIES.iter().copied().map(AbilityId::from).collect(),
        }
    }

    /// First id handed out; later combatants count up from here.
    #[must_use]
    pub fn starting_at(mut self, id: u64) -> Self {
        self.next_id = id;
        self
    }

    /// Replaces the extra ability pool.
    #[must_use]
    pub fn with_extra_abilities<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<AbilityId>,
    {
        self.extras = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn create(&mut self) -> Result<Combatant, CatalogError> {
        let id = CombatantId(self.next_id);
        self.next_id += 1;

        let name = self.random_name();
        let attributes = Attributes::new(
            self.rng.gen_range(ATTRIBUTE_RANGE),
            self.rng.gen_range(ATTRIBUTE_RANGE),
            self.rng.gen_range(ATTRIBUTE_RANGE),
        );
        let growth = self.random_growth();

        let mut combatant = Combatant::new(id, name, attributes, growth);
        combatant.learn(self.catalog.resolve(&AbilityId::from(BASIC_ATTACK))?);

        let mut extras = self.extras.clone();
        if !extras.is_empty() {
            extras.shuffle(&mut self.rng);
            let count = self.rng.gen_range(1..=extras.len().min(MAX_EXTRA_ABILITIES));
            for ability in &extras[..count] {
                combatant.learn(self.catalog.resolve(ability)?);
            }
        }

        tracing::debug!(
            id = %combatant.id(),
            name = combatant.name(),
            abilities = combatant.abilities().len(),
            "created combatant"
        );
        Ok(combatant)
    }

    pub fn create_team(&mut self, size: usize) -> Result<Vec<Combatant>, CatalogError> {
        (0..size).map(|_| self.create()).collect()
    }

    fn random_name(&mut self) -> String {
        let prefix = NAME_PREFIXES[self.rng.gen_range(0..NAME_PREFIXES.len())];
        let suffix = NAME_SUFFIXES[self.rng.gen_range(0..NAME_SUFFIXES.len())];
        format!("{prefix}{suffix}")
    }

    /// Splits [`GROWTH_POINTS`] over the three attributes, at least 1 each.
    fn random_growth(&mut self) -> GrowthParameters {
        let strength = self.rng.gen_range(1..GROWTH_POINTS - 2);
        let endurance = self.rng.gen_range(1..GROWTH_POINTS - strength - 1);
        let intelligence = GROWTH_POINTS - strength - endurance;
        GrowthParameters::new(strength, endurance, intelligence)
    }
}
