//! Common error infrastructure for arena-core.
//!
//! Eligibility and targeting failures are not errors: they surface as
//! [`Eligibility::Blocked`](crate::ability::Eligibility) or as a cancelled
//! query. The error types here cover rejected requests (validation) and
//! refused operations that would corrupt occupancy (invariant violations).
//!
//! # Design Principles
//!
//! - **Type Safety**: Each layer has its own error enum with specific variants
//! - **Rich Context**: Errors name the creature, ability and hex involved
//! - **Severity Classification**: Errors are categorized for recovery strategies
//! - **No Partial Mutation**: Every error is raised before state changes commit

use crate::ability::AbilityId;
use crate::hex::HexCoord;
use crate::state::CreatureId;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the request may succeed later (e.g., after animations settle)
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistencies that require investigation
/// - **Fatal**: the operation would leave the board in an unrecoverable layout
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry once the blocking condition clears.
    ///
    /// Examples: input frozen by an animation, another query pending
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown creature, selection that was never offered
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: missing oracle, ability without a definition
    Internal,

    /// Fatal error - committing the operation would corrupt occupancy.
    ///
    /// Examples: two creatures on one hex, pull path with no free hexes
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a bug or corrupted layout.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Where an error happened, derived from the variant's own fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    pub creature: Option<CreatureId>,
    pub ability: Option<AbilityId>,
    pub hex: Option<HexCoord>,
}

impl ErrorContext {
    #[must_use]
    pub const fn creature(creature: CreatureId) -> Self {
        Self {
            creature: Some(creature),
            ability: None,
            hex: None,
        }
    }

    /// An ability implies its owning creature.
    #[must_use]
    pub const fn ability(ability: AbilityId) -> Self {
        Self {
            creature: Some(ability.creature),
            ability: Some(ability),
            hex: None,
        }
    }

    #[must_use]
    pub const fn with_hex(mut self, hex: HexCoord) -> Self {
        self.hex = Some(hex);
        self
    }

    pub const fn is_empty(&self) -> bool {
        self.creature.is_none() && self.ability.is_none() && self.hex.is_none()
    }
}

/// Common trait for all arena-core errors.
///
/// - All error enums implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Creature, ability and hex named by this error; empty when it names none.
    fn context(&self) -> ErrorContext {
        ErrorContext::default()
    }

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
