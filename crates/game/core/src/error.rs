//! Common error infrastructure for battle-core.
//!
//! This module provides shared types and traits used across all error types in
//! battle-core. Domain-specific errors (`BattleError`, `CatalogError`) are
//! defined in their respective modules alongside the operations they guard.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each subsystem has its own error type with specific variants
//! - **Rich Context**: Errors carry the combatant and turn number where relevant
//! - **Severity Classification**: Errors are categorized for recovery strategies

use crate::state::CombatantId;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: The battle may continue or the call may be retried
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: Unrecoverable errors; the battle cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry or continue.
    ///
    /// Examples: turn limit reached while the host wants to extend it
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: empty rosters, unknown ability identifiers
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: an actor missing from its own roster
    Internal,

    /// Fatal error - battle state corrupted, cannot continue.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Contextual information attached to errors for debugging and diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    /// Combatant that triggered the error (if applicable).
    pub combatant: Option<CombatantId>,

    /// Scheduler turn number at the time of error.
    pub turn: u64,

    /// Optional static message providing additional context.
    pub message: Option<&'static str>,
}

impl ErrorContext {
    /// Creates a new error context for the given turn.
    #[must_use]
    pub const fn new(turn: u64) -> Self {
        Self {
            combatant: None,
            turn,
            message: None,
        }
    }

    /// Attaches a combatant to this context (builder pattern).
    #[must_use]
    pub const fn with_combatant(mut self, combatant: CombatantId) -> Self {
        self.combatant = Some(combatant);
        self
    }

    /// Attaches a static message to this context (builder pattern).
    #[must_use]
    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

/// Common trait for all battle-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the context information for this error, if available.
    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for error categorization, metrics, and testing.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
