//! Event types for different topics.

use arena_core::{
    AbilityId, ActivationReport, AnimationTicket, CreatureId, FollowUp, MessageCode, MoveOrder,
    PhaseReport, TargetRequest,
};
use serde::{Deserialize, Serialize};

/// Turn boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    RoundStarted { round: u32 },
    TurnStarted(PhaseReport),
    TurnEnded(PhaseReport),
    /// A transition was queued behind running animations.
    Deferred(FollowUp),
}

/// Ability lifecycle as seen by the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilityEvent {
    /// `require` failed; nothing changed.
    Blocked {
        ability: AbilityId,
        code: MessageCode,
        message: String,
    },
    QueryIssued {
        ability: AbilityId,
        request: TargetRequest,
    },
    /// The input collaborator reported no selection.
    QueryCancelled { ability: AbilityId },
    Activated(ActivationReport),
}

/// Presentation-facing updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusEvent {
    MoveStarted(MoveOrder),
    AnimationSettled {
        ticket: AnimationTicket,
        released: Vec<FollowUp>,
    },
    EnduranceChanged {
        creature: CreatureId,
        current: i32,
        maximum: i32,
        fatigued: bool,
    },
}
