//! Async orchestration around the ability engine.
//!
//! The engine itself is synchronous and deterministic. This crate supplies
//! the asynchronous edges a match needs: target queries answered by an input
//! collaborator, forced moves played back by an animator, and a topic-based
//! event bus for presentation layers.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the orchestrator and its builder
//! - [`api`] exposes the collaborator traits and error types
//! - [`events`] provides the topic-based event bus
pub mod api;
pub mod events;
pub mod session;

pub use api::{
    Animator, CancelProvider, CollaboratorKind, FirstOptionProvider, InstantAnimator,
    PacedAnimator, Result, RuntimeError, ScriptedProvider, TargetProvider,
};
pub use events::{AbilityEvent, EventBus, SessionEvent, StatusEvent, Topic, TurnEvent};
pub use session::{AbilityOutcome, Session, SessionBuilder, TurnRequest};
