//! Target requests issued to the input collaborator and their answers.

use super::{DirectionScan, TargetTeam};
use crate::engine::ValidationError;
use crate::hex::{Direction, Facing, HexCoord};
use crate::state::CreatureId;

/// Pick one of the pre-scanned directions.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectionQuery {
    pub actor: CreatureId,
    pub team: TargetTeam,
    pub facing: Facing,
    pub minimum: u32,
    pub maximum: u32,
    /// Only directions whose scan found a target.
    pub options: Vec<DirectionScan>,
}

/// Pick one creature.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureQuery {
    pub actor: CreatureId,
    pub team: TargetTeam,
    pub candidates: Vec<CreatureId>,
}

/// Pick one of several hex sets.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChoiceQuery {
    pub actor: CreatureId,
    pub options: Vec<Vec<HexCoord>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetRequest {
    Direction(DirectionQuery),
    Creature(CreatureQuery),
    Choice(ChoiceQuery),
}

/// Answer from the input collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetSelection {
    Direction(Direction),
    Creature(CreatureId),
    Choice(usize),
}

impl TargetSelection {
    pub fn kind_name(&self) -> &'static str {
        match self {
            TargetSelection::Direction(_) => "direction",
            TargetSelection::Creature(_) => "creature",
            TargetSelection::Choice(_) => "choice",
        }
    }
}

/// Target handed to `apply`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResolvedTarget {
    /// Passive trigger with no query.
    None,
    Direction(DirectionScan),
    Creature(CreatureId),
    Hexes(Vec<HexCoord>),
}

impl TargetRequest {
    pub fn actor(&self) -> CreatureId {
        match self {
            TargetRequest::Direction(query) => query.actor,
            TargetRequest::Creature(query) => query.actor,
            TargetRequest::Choice(query) => query.actor,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            TargetRequest::Direction(_) => "direction",
            TargetRequest::Creature(_) => "creature",
            TargetRequest::Choice(_) => "choice",
        }
    }

    pub fn option_count(&self) -> usize {
        match self {
            TargetRequest::Direction(query) => query.options.len(),
            TargetRequest::Creature(query) => query.candidates.len(),
            TargetRequest::Choice(query) => query.options.len(),
        }
    }

    /// Every selection the request accepts, in offer order.
    pub fn selections(&self) -> Vec<TargetSelection> {
        match self {
            TargetRequest::Direction(query) => query
                .options
                .iter()
                .map(|scan| TargetSelection::Direction(scan.direction))
                .collect(),
            TargetRequest::Creature(query) => query
                .candidates
                .iter()
                .map(|&id| TargetSelection::Creature(id))
                .collect(),
            TargetRequest::Choice(query) => {
                (0..query.options.len()).map(TargetSelection::Choice).collect()
            }
        }
    }

    /// Checks `selection` against what was offered.
    pub fn resolve(&self, selection: &TargetSelection) -> Result<ResolvedTarget, ValidationError> {
        match (self, selection) {
            (TargetRequest::Direction(query), TargetSelection::Direction(direction)) => query
                .options
                .iter()
                .find(|scan| scan.direction == *direction)
                .cloned()
                .map(ResolvedTarget::Direction)
                .ok_or(ValidationError::DirectionNotOffered(*direction)),
            (TargetRequest::Creature(query), TargetSelection::Creature(id)) => {
                if query.candidates.contains(id) {
                    Ok(ResolvedTarget::Creature(*id))
                } else {
                    Err(ValidationError::CreatureNotOffered(*id))
                }
            }
            (TargetRequest::Choice(query), TargetSelection::Choice(index)) => query
                .options
                .get(*index)
                .cloned()
                .map(ResolvedTarget::Hexes)
                .ok_or(ValidationError::ChoiceOutOfRange {
                    index: *index,
                    options: query.options.len(),
                }),
            (request, selection) => Err(ValidationError::SelectionMismatch {
                expected: request.kind_name(),
                got: selection.kind_name(),
            }),
        }
    }
}
