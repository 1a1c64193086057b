//! Observational collaborators: status display and message text.

use crate::ability::MessageCode;
use crate::state::Creature;

/// Notified after endurance-affecting changes so derived status can be
/// recomputed and displayed. Never feeds back into engine state.
pub trait StatusObserver: Send + Sync {
    fn endurance_changed(&self, creature: &Creature);
}

/// Human-readable text for message codes.
pub trait MessageOracle: Send + Sync {
    fn message(&self, code: MessageCode) -> Option<&str>;
}
