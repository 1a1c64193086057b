use crate::ability::{PendingQuery, Phase};
use crate::movement::{FollowUp, MovementGate};

use super::CreatureId;

/// Turn bookkeeping for a single match session.
///
/// Turn order itself belongs to the host; the engine only records which
/// creature is acting, the current phase, and the one suspended query.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// Current round, starting at 1.
    pub round: u32,

    /// The creature taking its turn, if any.
    pub active: Option<CreatureId>,

    pub phase: Phase,

    /// Interactive ability waiting for target confirmation.
    ///
    /// While set, no other ability may activate.
    pub pending: Option<PendingQuery>,

    /// Outstanding movement animations and the follow-ups waiting on them.
    pub gate: MovementGate<FollowUp>,

    next_attack_event: u64,
}

impl TurnState {
    pub fn new() -> Self {
        Self {
            round: 1,
            active: None,
            phase: Phase::TurnEnd,
            pending: None,
            gate: MovementGate::new(),
            next_attack_event: 0,
        }
    }

    /// Allocates the id of the next distinct attack event.
    pub fn next_attack_event(&mut self) -> u64 {
        self.next_attack_event += 1;
        self.next_attack_event
    }

    pub fn input_frozen(&self) -> bool {
        self.gate.is_frozen()
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}
