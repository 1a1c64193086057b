//! Error types for ability resolution.

use crate::ability::{AbilityId, TransitionError};
use crate::env::OracleError;
use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::hex::Direction;
use crate::movement::AnimationTicket;
use crate::state::{CreatureId, InvariantViolation, StateError};

/// Malformed requests, always reported before any mutation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValidationError {
    #[error("creature {0} does not exist")]
    UnknownCreature(CreatureId),

    #[error("ability {0} does not exist")]
    UnknownAbility(AbilityId),

    #[error("creature {0} is dead")]
    DeadCreature(CreatureId),

    #[error("no target query is pending")]
    NoPendingQuery,

    #[error("expected a {expected} selection, got a {got} selection")]
    SelectionMismatch {
        expected: &'static str,
        got: &'static str,
    },

    #[error("direction {0:?} was not offered")]
    DirectionNotOffered(Direction),

    #[error("creature {0} was not offered")]
    CreatureNotOffered(CreatureId),

    #[error("choice {index} is out of range ({options} options)")]
    ChoiceOutOfRange { index: usize, options: usize },

    #[error("scan toward {0:?} found no target")]
    ScanWithoutTarget(Direction),

    #[error("target {0} listed twice")]
    DuplicateTarget(CreatureId),

    #[error("target {0} is dead")]
    DeadTarget(CreatureId),

    #[error("single-target damage applied to {targets} targets")]
    AreaMismatch { targets: usize },

    #[error("resolved target does not fit ability {0}")]
    UnexpectedTarget(AbilityId),

    #[error("animation ticket {0:?} is not outstanding")]
    UnknownTicket(AnimationTicket),

    #[error("a turn is still in progress")]
    TurnInProgress,
}

impl GameError for ValidationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use ValidationError::*;
        match self {
            UnknownCreature(_) => "VALIDATION_UNKNOWN_CREATURE",
            UnknownAbility(_) => "VALIDATION_UNKNOWN_ABILITY",
            DeadCreature(_) => "VALIDATION_DEAD_CREATURE",
            NoPendingQuery => "VALIDATION_NO_PENDING_QUERY",
            SelectionMismatch { .. } => "VALIDATION_SELECTION_MISMATCH",
            DirectionNotOffered(_) => "VALIDATION_DIRECTION_NOT_OFFERED",
            CreatureNotOffered(_) => "VALIDATION_CREATURE_NOT_OFFERED",
            ChoiceOutOfRange { .. } => "VALIDATION_CHOICE_OUT_OF_RANGE",
            ScanWithoutTarget(_) => "VALIDATION_SCAN_WITHOUT_TARGET",
            DuplicateTarget(_) => "VALIDATION_DUPLICATE_TARGET",
            DeadTarget(_) => "VALIDATION_DEAD_TARGET",
            AreaMismatch { .. } => "VALIDATION_AREA_MISMATCH",
            UnexpectedTarget(_) => "VALIDATION_UNEXPECTED_TARGET",
            UnknownTicket(_) => "VALIDATION_UNKNOWN_TICKET",
            TurnInProgress => "VALIDATION_TURN_IN_PROGRESS",
        }
    }

    fn context(&self) -> ErrorContext {
        use ValidationError::*;
        match self {
            UnknownCreature(creature)
            | DeadCreature(creature)
            | CreatureNotOffered(creature)
            | DuplicateTarget(creature)
            | DeadTarget(creature) => ErrorContext::creature(*creature),
            UnknownAbility(ability) | UnexpectedTarget(ability) => ErrorContext::ability(*ability),
            _ => ErrorContext::default(),
        }
    }
}

/// Errors surfaced while driving abilities through the engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound(deserialize = "'de: 'static")))]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("ability {0} is waiting for a target")]
    QueryPending(AbilityId),

    #[error("input is frozen by {outstanding} running animation(s)")]
    InputFrozen { outstanding: usize },

    #[error("no creature is taking its turn")]
    NoActiveCreature,

    #[error("ability {ability}: {source}")]
    Lifecycle {
        ability: AbilityId,
        source: TransitionError,
    },
}

impl From<InvariantViolation> for EngineError {
    fn from(violation: InvariantViolation) -> Self {
        EngineError::State(StateError::Invariant(violation))
    }
}

impl EngineError {
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, EngineError::State(StateError::Invariant(_)))
    }
}

impl GameError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            EngineError::Validation(error) => error.severity(),
            EngineError::State(error) => error.severity(),
            EngineError::Oracle(error) => error.severity(),
            EngineError::QueryPending(_)
            | EngineError::InputFrozen { .. }
            | EngineError::NoActiveCreature => ErrorSeverity::Recoverable,
            EngineError::Lifecycle { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            EngineError::Validation(error) => error.error_code(),
            EngineError::State(error) => error.error_code(),
            EngineError::Oracle(error) => error.error_code(),
            EngineError::QueryPending(_) => "ENGINE_QUERY_PENDING",
            EngineError::InputFrozen { .. } => "ENGINE_INPUT_FROZEN",
            EngineError::NoActiveCreature => "ENGINE_NO_ACTIVE_CREATURE",
            EngineError::Lifecycle { .. } => "ENGINE_LIFECYCLE",
        }
    }

    fn context(&self) -> ErrorContext {
        match self {
            EngineError::Validation(error) => error.context(),
            EngineError::State(error) => error.context(),
            EngineError::QueryPending(ability) | EngineError::Lifecycle { ability, .. } => {
                ErrorContext::ability(*ability)
            }
            _ => ErrorContext::default(),
        }
    }
}
