//! Oracle access errors.

use crate::ability::AbilityKind;
use crate::error::{ErrorSeverity, GameError};

/// Required collaborator data is missing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("AbilityOracle not available")]
    AbilitiesNotAvailable,

    #[error("MessageOracle not available")]
    MessagesNotAvailable,

    #[error("no definition registered for ability {0}")]
    DefinitionNotFound(AbilityKind),

    #[error("no behaviour registered for ability {0}")]
    BehaviorNotFound(AbilityKind),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            // Missing collaborators are wiring bugs in the host
            AbilitiesNotAvailable | MessagesNotAvailable => ErrorSeverity::Internal,
            DefinitionNotFound(_) | BehaviorNotFound(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            AbilitiesNotAvailable => "ORACLE_ABILITIES_NOT_AVAILABLE",
            MessagesNotAvailable => "ORACLE_MESSAGES_NOT_AVAILABLE",
            DefinitionNotFound(_) => "ORACLE_DEFINITION_NOT_FOUND",
            BehaviorNotFound(_) => "ORACLE_BEHAVIOR_NOT_FOUND",
        }
    }
}
