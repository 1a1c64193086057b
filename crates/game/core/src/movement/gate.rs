//! Synchronization boundary with the animation collaborator.
//!
//! Occupancy changes are committed immediately; the gate only tracks which
//! animations are still playing. While any ticket is outstanding input is
//! frozen, and continuations queued with [`MovementGate::when_released`] are
//! handed back once the last ticket settles.

use std::collections::BTreeSet;

use crate::hex::HexCoord;
use crate::state::CreatureId;

/// Handle of one movement animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationTicket(pub u64);

/// Relocation for the movement collaborator to play back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveOrder {
    pub creature: CreatureId,
    pub from: HexCoord,
    pub to: HexCoord,
    pub ticket: AnimationTicket,
    pub ignore_movement_point: bool,
    pub ignore_path: bool,
}

impl MoveOrder {
    /// Forced movement: no movement cost, intervening hexes never block.
    pub fn forced(creature: CreatureId, from: HexCoord, to: HexCoord, ticket: AnimationTicket) -> Self {
        Self {
            creature,
            from,
            to,
            ticket,
            ignore_movement_point: true,
            ignore_path: true,
        }
    }
}

/// Turn actions waiting for animations to settle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FollowUp {
    EndTurn,
    StartTurn(CreatureId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovementGate<T> {
    outstanding: BTreeSet<AnimationTicket>,
    continuations: Vec<T>,
    next_ticket: u64,
}

impl<T> MovementGate<T> {
    pub fn new() -> Self {
        Self {
            outstanding: BTreeSet::new(),
            continuations: Vec::new(),
            next_ticket: 0,
        }
    }

    /// Registers a new animation and freezes input until it settles.
    pub fn issue(&mut self) -> AnimationTicket {
        self.next_ticket += 1;
        let ticket = AnimationTicket(self.next_ticket);
        self.outstanding.insert(ticket);
        ticket
    }

    pub fn is_frozen(&self) -> bool {
        !self.outstanding.is_empty()
    }

    pub fn outstanding(&self) -> usize {
        self.outstanding.len()
    }

    pub fn queued(&self) -> usize {
        self.continuations.len()
    }

    /// Returns `continuation` when nothing is playing, otherwise queues it.
    pub fn when_released(&mut self, continuation: T) -> Option<T> {
        if self.is_frozen() {
            self.continuations.push(continuation);
            None
        } else {
            Some(continuation)
        }
    }

    /// Marks `ticket` complete.
    ///
    /// Returns `None` for an unknown ticket. When the last outstanding ticket
    /// settles, every queued continuation is released in queue order.
    pub fn settle(&mut self, ticket: AnimationTicket) -> Option<Vec<T>> {
        if !self.outstanding.remove(&ticket) {
            return None;
        }
        if self.is_frozen() {
            Some(Vec::new())
        } else {
            Some(std::mem::take(&mut self.continuations))
        }
    }
}

impl<T> Default for MovementGate<T> {
    fn default() -> Self {
        Self::new()
    }
}
