//! Public runtime API surface.
//!
//! This module gathers the collaborator traits and error types exposed to
//! consumers of the runtime crate.

pub mod animator;
pub mod errors;
pub mod providers;

pub use animator::{Animator, InstantAnimator, PacedAnimator};
pub use errors::{CollaboratorKind, Result, RuntimeError};
pub use providers::{CancelProvider, FirstOptionProvider, ScriptedProvider, TargetProvider};
