//! Error types for the battle scheduler.

use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::state::CombatantId;

/// Errors surfaced while setting up or advancing a battle.
///
/// Running out of resources or having no valid action are not errors; they
/// show up as refused activations and forfeited turns in the event stream.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleError {
    /// Both sides were empty at initialization.
    #[error("cannot start a battle with two empty rosters")]
    EmptyRoster,

    /// A combatant id has no roster entry (and therefore no side).
    #[error("combatant {id} is not part of this battle")]
    UnknownCombatant { id: CombatantId },

    /// Two roster entries share an id.
    #[error("combatant {id} appears more than once")]
    DuplicateCombatant { id: CombatantId },

    /// The configured turn cost is not a positive finite number.
    #[error("turn cost must be a positive finite number")]
    InvalidTurnCost,

    /// `advance_one_turn` was called before `initialize`.
    #[error("battle has not been initialized")]
    NotInitialized,

    /// The configured turn limit was reached without a winner.
    #[error("turn limit of {limit} reached without a winner")]
    TurnLimitExceeded {
        limit: u64,
        #[cfg_attr(feature = "serde", serde(skip))]
        context: ErrorContext,
    },

    /// The evaluator picked an ability slot the actor does not have.
    #[error("combatant {actor} has no ability at index {index}")]
    MissingAbility {
        actor: CombatantId,
        index: usize,
        #[cfg_attr(feature = "serde", serde(skip))]
        context: ErrorContext,
    },
}

impl BattleError {
    pub fn turn_limit_exceeded(limit: u64, turn: u64) -> Self {
        Self::TurnLimitExceeded {
            limit,
            context: ErrorContext::new(turn).with_message("no side was defeated in time"),
        }
    }

    pub fn missing_ability(actor: CombatantId, index: usize, turn: u64) -> Self {
        Self::MissingAbility {
            actor,
            index,
            context: ErrorContext::new(turn)
                .with_combatant(actor)
                .with_message("chosen action refers to an unknown ability slot"),
        }
    }
}

impl GameError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EmptyRoster
            | Self::UnknownCombatant { .. }
            | Self::DuplicateCombatant { .. }
            | Self::InvalidTurnCost => ErrorSeverity::Validation,
            Self::NotInitialized | Self::TurnLimitExceeded { .. } => ErrorSeverity::Recoverable,
            Self::MissingAbility { .. } => ErrorSeverity::Internal,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::TurnLimitExceeded { context, .. } | Self::MissingAbility { context, .. } => {
                Some(context)
            }
            _ => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyRoster => "BATTLE_EMPTY_ROSTER",
            Self::UnknownCombatant { .. } => "BATTLE_UNKNOWN_COMBATANT",
            Self::DuplicateCombatant { .. } => "BATTLE_DUPLICATE_COMBATANT",
            Self::InvalidTurnCost => "BATTLE_INVALID_TURN_COST",
            Self::NotInitialized => "BATTLE_NOT_INITIALIZED",
            Self::TurnLimitExceeded { .. } => "BATTLE_TURN_LIMIT_EXCEEDED",
            Self::MissingAbility { .. } => "BATTLE_MISSING_ABILITY",
        }
    }
}
