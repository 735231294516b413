//! Effect specifications attached to ability definitions.

/// What an effect does to its target.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    PhysicalDamage,
    MagicalDamage,
    HealthHeal,
    StaminaDamage,
    StaminaRestore,
    ManaDamage,
    ManaRestore,
    /// Declared for content; not numerically resolved.
    StatModify,
    /// Declared for content; not numerically resolved.
    StatusApply,
    /// Declared for content; not numerically resolved.
    StatusRemove,
}

impl EffectKind {
    /// Health damage (physical or magical).
    pub const fn is_damage(self) -> bool {
        matches!(self, Self::PhysicalDamage | Self::MagicalDamage)
    }

    pub const fn is_heal(self) -> bool {
        matches!(self, Self::HealthHeal)
    }

    /// Stamina or mana drain/restore.
    pub const fn is_resource(self) -> bool {
        matches!(
            self,
            Self::StaminaDamage | Self::StaminaRestore | Self::ManaDamage | Self::ManaRestore
        )
    }

    /// Kinds that are carried but produce no numeric outcome.
    pub const fn is_reserved(self) -> bool {
        matches!(self, Self::StatModify | Self::StatusApply | Self::StatusRemove)
    }
}

/// Which offense and mitigation formula a damage effect uses.
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
pub enum DamageType {
    #[default]
    Physical,
    Magical,
    Pure,
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatKind {
    Strength,
    Endurance,
    Intelligence,
    Speed,
}

/// One effect of an ability, applied to every target in order.
///
/// Power for the target at subset index `i`:
/// - `i == 0` and `primary_power` is set: `primary_power`
/// - `secondary_powers[i - 1]` exists: that value
/// - otherwise: `power`
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectSpec {
    pub kind: EffectKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_type: DamageType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stat: Option<StatKind>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration: u32,
    pub power: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub primary_power: Option<f32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub secondary_powers: Vec<f32>,
}

impl EffectSpec {
    pub fn new(kind: EffectKind, power: f32) -> Self {
        let damage_type = match kind {
            EffectKind::MagicalDamage => DamageType::Magical,
            _ => DamageType::Physical,
        };
        Self {
            kind,
            damage_type,
            stat: None,
            status: None,
            duration: 0,
            power,
            primary_power: None,
            secondary_powers: Vec::new(),
        }
    }

    pub fn physical(power: f32) -> Self {
        Self::new(EffectKind::PhysicalDamage, power)
    }

    pub fn magical(power: f32) -> Self {
        Self::new(EffectKind::MagicalDamage, power)
    }

    pub fn heal(power: f32) -> Self {
        Self::new(EffectKind::HealthHeal, power)
    }

    #[must_use]
    pub fn with_damage_type(mut self, damage_type: DamageType) -> Self {
        self.damage_type = damage_type;
        self
    }

    #[must_use]
    pub fn with_primary_power(mut self, power: f32) -> Self {
        self.primary_power = Some(power);
        self
    }

    #[must_use]
    pub fn with_secondary_powers(mut self, powers: impl Into<Vec<f32>>) -> Self {
        self.secondary_powers = powers.into();
        self
    }

    #[must_use]
    pub fn with_stat(mut self, stat: StatKind) -> Self {
        self.stat = Some(stat);
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>, duration: u32) -> Self {
        self.status = Some(status.into());
        self.duration = duration;
        self
    }

    /// Resolved power for the target at `index` within the chosen subset.
    pub fn power_for(&self, index: usize) -> f32 {
        match (index, self.primary_power) {
            (0, Some(primary)) => primary,
            (0, None) => self.power,
            (i, _) => self.secondary_powers.get(i - 1).copied().unwrap_or(self.power),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_overrides_follow_subset_index() {
        let effect = EffectSpec::magical(85.0)
            .with_primary_power(100.0)
            .with_secondary_powers([70.0, 50.0]);

        assert_eq!(effect.power_for(0), 100.0);
        assert_eq!(effect.power_for(1), 70.0);
        assert_eq!(effect.power_for(2), 50.0);
        assert_eq!(effect.power_for(3), 85.0);
    }

    #[test]
    fn secondary_overrides_apply_without_primary() {
        let effect = EffectSpec::physical(40.0).with_secondary_powers([10.0]);
        assert_eq!(effect.power_for(0), 40.0);
        assert_eq!(effect.power_for(1), 10.0);
    }

    #[test]
    fn kind_classification() {
        assert!(EffectKind::MagicalDamage.is_damage());
        assert!(EffectKind::ManaRestore.is_resource());
        assert!(EffectKind::StatusApply.is_reserved());
        assert_eq!(EffectKind::HealthHeal.to_string(), "health_heal");
    }
}
