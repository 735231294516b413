//! Targeting rules.
//!
//! A rule selects candidates relative to the wielder's side. Rules never
//! narrow by count; the evaluator builds subsets from the full valid list.

use crate::state::Side;

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
pub enum TargetRule {
    /// The wielder only.
    #[strum(serialize = "self")]
    SelfOnly,
    SingleEnemy,
    SingleAlly,
    AnySingle,
    AllyOrSelf,
    MultipleEnemies,
    MultipleAllies,
    AllEnemies,
    AllAllies,
    RandomEnemies,
    RandomAllies,
}

impl TargetRule {
    /// One subset per valid target.
    pub const fn is_single(self) -> bool {
        matches!(
            self,
            Self::SingleEnemy | Self::SingleAlly | Self::AnySingle | Self::AllyOrSelf
        )
    }

    /// Count-limited subsets (`target_count`).
    pub const fn is_group(self) -> bool {
        matches!(
            self,
            Self::MultipleEnemies | Self::MultipleAllies | Self::RandomEnemies | Self::RandomAllies
        )
    }

    /// A single subset containing the whole valid list.
    pub const fn is_whole(self) -> bool {
        matches!(self, Self::SelfOnly | Self::AllEnemies | Self::AllAllies)
    }

    pub const fn targets_enemies(self) -> bool {
        matches!(
            self,
            Self::SingleEnemy | Self::MultipleEnemies | Self::AllEnemies | Self::RandomEnemies
        )
    }

    pub const fn targets_allies(self) -> bool {
        matches!(
            self,
            Self::SingleAlly
                | Self::AllyOrSelf
                | Self::MultipleAllies
                | Self::AllAllies
                | Self::RandomAllies
        )
    }

    /// Whether a living candidate is valid for a wielder.
    pub fn matches(self, wielder_side: Side, is_wielder: bool, candidate_side: Side) -> bool {
        let same_side = wielder_side == candidate_side;
        match self {
            Self::SelfOnly => is_wielder,
            Self::AnySingle => true,
            Self::AllyOrSelf => same_side,
            Self::SingleAlly | Self::MultipleAllies | Self::AllAllies | Self::RandomAllies => {
                same_side && !is_wielder
            }
            Self::SingleEnemy | Self::MultipleEnemies | Self::AllEnemies | Self::RandomEnemies => {
                !same_side
            }
        }
    }
}
