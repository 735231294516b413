//! Ability catalog errors.

use crate::ability::AbilityId;
use crate::error::{ErrorSeverity, GameError};

/// Errors raised while registering or resolving ability definitions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CatalogError {
    /// No definition is registered under this identifier.
    #[error("unknown ability `{id}`")]
    UnknownAbility { id: AbilityId },

    /// A definition with this identifier is already registered.
    #[error("ability `{id}` is already registered")]
    DuplicateAbility { id: AbilityId },

    /// The definition is internally inconsistent.
    #[error("invalid ability `{id}`: {reason}")]
    InvalidDefinition { id: AbilityId, reason: String },
}

impl GameError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownAbility { .. } => "CATALOG_UNKNOWN_ABILITY",
            Self::DuplicateAbility { .. } => "CATALOG_DUPLICATE_ABILITY",
            Self::InvalidDefinition { .. } => "CATALOG_INVALID_DEFINITION",
        }
    }
}
