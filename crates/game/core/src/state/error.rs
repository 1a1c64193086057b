//! State management errors.
//!
//! Occupancy invariants and roster validation. Every check runs before the
//! board is touched, so a returned error always means "nothing changed".

use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::hex::HexCoord;
use crate::state::CreatureId;

/// Operations refused because committing them would corrupt occupancy.
///
/// A board with two creatures on one hex is not recoverable locally, so these
/// are reported as fatal instead of being resolved silently.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InvariantViolation {
    /// Destination hex already holds another creature.
    #[error("hex {hex} is occupied by {occupant}, cannot place {creature}")]
    DestinationOccupied {
        creature: CreatureId,
        hex: HexCoord,
        occupant: CreatureId,
    },

    /// Two moves in the same operation would land on the same hex.
    #[error("{first} and {second} would both land on {hex}")]
    DestinationsOverlap {
        first: CreatureId,
        second: CreatureId,
        hex: HexCoord,
    },

    /// Destination hex is outside the board or impassable.
    #[error("hex {hex} cannot hold {creature}")]
    DestinationBlocked { creature: CreatureId, hex: HexCoord },

    /// Forced movement found no free hex between the participants.
    #[error("pull between {puller} and {pulled} has no free hexes")]
    EmptyPullPath {
        puller: CreatureId,
        pulled: CreatureId,
    },

    /// Grid occupancy disagrees with a creature's recorded position.
    #[error("occupancy desync at {hex}: grid has {grid:?}, creature {creature} expected")]
    OccupancyDesync {
        hex: HexCoord,
        creature: CreatureId,
        grid: Option<CreatureId>,
    },
}

impl GameError for InvariantViolation {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use InvariantViolation::*;
        match self {
            DestinationOccupied { .. } => "INVARIANT_DESTINATION_OCCUPIED",
            DestinationsOverlap { .. } => "INVARIANT_DESTINATIONS_OVERLAP",
            DestinationBlocked { .. } => "INVARIANT_DESTINATION_BLOCKED",
            EmptyPullPath { .. } => "INVARIANT_EMPTY_PULL_PATH",
            OccupancyDesync { .. } => "INVARIANT_OCCUPANCY_DESYNC",
        }
    }

    fn context(&self) -> ErrorContext {
        use InvariantViolation::*;
        match *self {
            DestinationOccupied { creature, hex, .. }
            | DestinationBlocked { creature, hex }
            | OccupancyDesync { creature, hex, .. } => {
                ErrorContext::creature(creature).with_hex(hex)
            }
            DestinationsOverlap { first, hex, .. } => ErrorContext::creature(first).with_hex(hex),
            EmptyPullPath { pulled, .. } => ErrorContext::creature(pulled),
        }
    }
}

/// Errors raised while building or querying the roster.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    #[error("creature {0} not found")]
    UnknownCreature(CreatureId),

    #[error("creature {0} is already on the board")]
    DuplicateCreature(CreatureId),

    #[error("creature {creature} has unsupported footprint size {size}")]
    InvalidSize { creature: CreatureId, size: u8 },

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            StateError::Invariant(violation) => violation.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use StateError::*;
        match self {
            UnknownCreature(_) => "STATE_UNKNOWN_CREATURE",
            DuplicateCreature(_) => "STATE_DUPLICATE_CREATURE",
            InvalidSize { .. } => "STATE_INVALID_SIZE",
            Invariant(violation) => violation.error_code(),
        }
    }

    fn context(&self) -> ErrorContext {
        use StateError::*;
        match self {
            UnknownCreature(creature)
            | DuplicateCreature(creature)
            | InvalidSize { creature, .. } => ErrorContext::creature(*creature),
            Invariant(violation) => violation.context(),
        }
    }
}
