//! Immutable ability definitions.

use std::borrow::Borrow;
use std::fmt;

use super::effect::EffectSpec;
use super::targeting::TargetRule;

/// Catalog identifier of an ability (e.g. `"fireball"`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AbilityId(pub String);

impl AbilityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AbilityId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for AbilityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for AbilityId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AbilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display category used by presentation layers.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AiCommand {
    #[default]
    Attack,
    Heal,
    Support,
}

/// Resources deducted from the wielder when an ability is applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ResourceCosts {
    pub mana: u32,
    pub stamina: u32,
    pub health: u32,
}

impl ResourceCosts {
    pub const FREE: Self = Self {
        mana: 0,
        stamina: 0,
        health: 0,
    };

    pub const fn new(mana: u32, stamina: u32, health: u32) -> Self {
        Self {
            mana,
            stamina,
            health,
        }
    }

    pub const fn is_free(&self) -> bool {
        self.mana == 0 && self.stamina == 0 && self.health == 0
    }
}

/// Static description of an ability.
///
/// `target_count` only matters for group rules (see
/// [`TargetRule::is_group`]); the other rules ignore it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityDefinition {
    pub id: AbilityId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ai_command: AiCommand,
    /// Base utility score added to every candidate using this ability.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ai_priority: f32,
    pub targeting: TargetRule,
    #[cfg_attr(feature = "serde", serde(default = "default_target_count"))]
    pub target_count: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub costs: ResourceCosts,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<EffectSpec>,
}

#[cfg(feature = "serde")]
fn default_target_count() -> usize {
    1
}

impl AbilityDefinition {
    pub fn new(id: impl Into<AbilityId>, name: impl Into<String>, targeting: TargetRule) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            ai_command: AiCommand::Attack,
            ai_priority: 0.0,
            targeting,
            target_count: 1,
            costs: ResourceCosts::FREE,
            effects: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_command(mut self, command: AiCommand) -> Self {
        self.ai_command = command;
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: f32) -> Self {
        self.ai_priority = priority;
        self
    }

    #[must_use]
    pub fn with_target_count(mut self, count: usize) -> Self {
        self.target_count = count;
        self
    }

    #[must_use]
    pub fn with_costs(mut self, costs: ResourceCosts) -> Self {
        self.costs = costs;
        self
    }

    #[must_use]
    pub fn with_effect(mut self, effect: EffectSpec) -> Self {
        self.effects.push(effect);
        self
    }

    /// True if any effect lowers the target's health.
    pub fn deals_damage(&self) -> bool {
        self.effects.iter().any(|effect| effect.kind.is_damage())
    }
}
