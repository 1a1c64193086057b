//! Movement: the animation gate and the forced-movement resolver.
mod gate;
mod pull;

pub use gate::{AnimationTicket, FollowUp, MoveOrder, MovementGate};
pub use pull::{Landing, PullPlan, execute_pull, plan_pull, pull_path};
