//! Movement playback collaborator.
//!
//! Relocations are committed by the engine before playback starts; the
//! animator only reports when the visual move has settled.
use std::time::Duration;

use arena_core::MoveOrder;
use async_trait::async_trait;

use super::errors::Result;

#[async_trait]
pub trait Animator: Send + Sync {
    /// Resolves once the move for `order` has finished playing.
    async fn play(&self, order: &MoveOrder) -> Result<()>;
}

/// Completes every move immediately.
pub struct InstantAnimator;

#[async_trait]
impl Animator for InstantAnimator {
    async fn play(&self, _order: &MoveOrder) -> Result<()> {
        Ok(())
    }
}

/// Sleeps in proportion to the distance travelled.
pub struct PacedAnimator {
    per_hex: Duration,
}

impl PacedAnimator {
    pub fn new(per_hex: Duration) -> Self {
        Self { per_hex }
    }
}

#[async_trait]
impl Animator for PacedAnimator {
    async fn play(&self, order: &MoveOrder) -> Result<()> {
        let hexes = order.from.distance(order.to);
        tokio::time::sleep(self.per_hex * hexes).await;
        Ok(())
    }
}
