//! Combatant state.

use std::sync::Arc;

use crate::ability::{AbilityDefinition, AbilityInstance};
use crate::events::CombatantChange;
use crate::state::CombatantId;
use crate::stats::resources::fraction;
use crate::stats::{
    Attributes, GrowthParameters, ResourceCurrent, ResourceKind, ResourceMaximums, speed_of,
};

/// A battle participant: attributes, resources, learned abilities and
/// progression.
///
/// # Invariants
///
/// - Every current resource lies in `[0, max]`, where max is derived from the
///   current attributes
/// - Alive ⇔ current health > 0
///
/// All mutators keep the invariants and return the [`CombatantChange`]s they
/// caused, which is how presentation layers learn about mutations.
#[derive(Clone, Debug, PartialEq)]
pub struct Combatant {
    id: CombatantId,
    name: String,
    attributes: Attributes,
    resources: ResourceCurrent,
    level: u32,
    experience: u32,
    growth: GrowthParameters,
    abilities: Vec<AbilityInstance>,
}

impl Combatant {
    /// Experience needed per level: threshold = level × 100.
    pub const EXPERIENCE_PER_LEVEL: u32 = 100;

    /// Creates a level 1 combatant with every resource at maximum.
    pub fn new(
        id: CombatantId,
        name: impl Into<String>,
        attributes: Attributes,
        growth: GrowthParameters,
    ) -> Self {
        let resources = ResourceCurrent::at_max(&ResourceMaximums::from_attributes(&attributes));
        Self {
            id,
            name: name.into(),
            attributes,
            resources,
            level: 1,
            experience: 0,
            growth,
            abilities: Vec::new(),
        }
    }

    /// Overrides current resources (clamped to the maximums).
    #[must_use]
    pub fn with_resources(mut self, resources: ResourceCurrent) -> Self {
        self.resources = resources.clamped(&self.maximums());
        self
    }

    /// Overrides level and experience.
    #[must_use]
    pub fn with_progress(mut self, level: u32, experience: u32) -> Self {
        self.level = level.max(1);
        self.experience = experience;
        self
    }

    /// Learns an ability, binding a new instance to this combatant.
    #[must_use]
    pub fn with_ability(mut self, definition: Arc<AbilityDefinition>) -> Self {
        self.learn(definition);
        self
    }

    // ===== accessors =====

    pub fn id(&self) -> CombatantId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn resources(&self) -> &ResourceCurrent {
        &self.resources
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn experience(&self) -> u32 {
        self.experience
    }

    pub fn experience_to_next_level(&self) -> u32 {
        self.level.saturating_mul(Self::EXPERIENCE_PER_LEVEL)
    }

    pub fn growth(&self) -> &GrowthParameters {
        &self.growth
    }

    pub fn abilities(&self) -> &[AbilityInstance] {
        &self.abilities
    }

    pub fn maximums(&self) -> ResourceMaximums {
        ResourceMaximums::from_attributes(&self.attributes)
    }

    pub fn speed(&self) -> f32 {
        speed_of(&self.attributes)
    }

    pub fn health(&self) -> u32 {
        self.resources.health
    }

    pub fn stamina(&self) -> u32 {
        self.resources.stamina
    }

    pub fn mana(&self) -> u32 {
        self.resources.mana
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.resources.health > 0
    }

    pub fn missing_health(&self) -> u32 {
        self.maximums().health.saturating_sub(self.resources.health)
    }

    /// Current fraction of a pool; an empty maximum reads as 0.
    pub fn resource_fraction(&self, resource: ResourceKind) -> f32 {
        fraction(
            self.resources.get(resource),
            self.maximums().get(resource),
        )
    }

    pub fn health_fraction(&self) -> f32 {
        self.resource_fraction(ResourceKind::Health)
    }

    // ===== abilities =====

    /// Learns an ability. Each call creates a fresh instance wielded by this
    /// combatant; instances are never shared.
    pub fn learn(&mut self, definition: Arc<AbilityDefinition>) {
        self.abilities.push(AbilityInstance::new(definition, self.id));
    }

    // ===== resource mutation =====

    /// Lowers a pool by `amount`, never below zero.
    pub fn drain(&mut self, resource: ResourceKind, amount: u32) -> CombatantChange {
        let slot = self.resources.slot_mut(resource);
        let before = *slot;
        *slot = before.saturating_sub(amount);
        let after = *slot;

        if resource == ResourceKind::Health && before > 0 && after == 0 {
            tracing::debug!("{} ({}) has fallen", self.name, self.id);
        }

        CombatantChange::Resource {
            combatant: self.id,
            resource,
            before,
            after,
        }
    }

    /// Raises a pool by `amount`, never above its maximum.
    pub fn restore(&mut self, resource: ResourceKind, amount: u32) -> CombatantChange {
        let max = self.maximums().get(resource);
        let slot = self.resources.slot_mut(resource);
        let before = *slot;
        *slot = before.saturating_add(amount).min(max);

        CombatantChange::Resource {
            combatant: self.id,
            resource,
            before,
            after: *slot,
        }
    }

    pub fn take_damage(&mut self, amount: u32) -> CombatantChange {
        self.drain(ResourceKind::Health, amount)
    }

    pub fn heal(&mut self, amount: u32) -> CombatantChange {
        self.restore(ResourceKind::Health, amount)
    }

    /// Sets every pool to its maximum.
    pub fn restore_full(&mut self) -> Vec<CombatantChange> {
        let max = self.maximums();
        [ResourceKind::Health, ResourceKind::Stamina, ResourceKind::Mana]
            .into_iter()
            .map(|resource| {
                let slot = self.resources.slot_mut(resource);
                let before = *slot;
                *slot = max.get(resource);
                CombatantChange::Resource {
                    combatant: self.id,
                    resource,
                    before,
                    after: *slot,
                }
            })
            .collect()
    }

    // ===== progression =====

    /// Adds experience and levels up as many times as the total allows.
    pub fn add_experience(&mut self, amount: u32) -> Vec<CombatantChange> {
        let mut changes = Vec::new();
        self.experience = self.experience.saturating_add(amount);
        tracing::debug!(
            "{} gained {} experience ({}/{})",
            self.name,
            amount,
            self.experience,
            self.experience_to_next_level()
        );

        while self.experience >= self.experience_to_next_level() {
            self.experience -= self.experience_to_next_level();
            changes.extend(self.level_up());
        }

        changes.push(CombatantChange::Experience {
            combatant: self.id,
            experience: self.experience,
            level: self.level,
        });
        changes
    }

    /// Raises the level by one, applies growth and refills every pool.
    pub fn level_up(&mut self) -> Vec<CombatantChange> {
        self.level += 1;
        self.attributes = self.attributes.grown(self.growth);
        tracing::info!("{} reached level {}", self.name, self.level);

        let mut changes = vec![CombatantChange::Attributes {
            combatant: self.id,
            attributes: self.attributes,
            level: self.level,
        }];
        changes.extend(self.restore_full());
        changes
    }
}
