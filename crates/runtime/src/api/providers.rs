//! Asynchronous abstraction for sourcing target selections.
//!
//! Runtime users plug in [`TargetProvider`] implementations so interactive
//! abilities can be answered by human input, scripted fixtures, or AI
//! policies.
use std::collections::VecDeque;

use arena_core::{MatchState, TargetRequest, TargetSelection};
use async_trait::async_trait;
use tokio::sync::Mutex;

use super::errors::{Result, RuntimeError};

/// Trait for answering target queries.
///
/// Returning `Ok(None)` means the player cancelled; the pending ability is
/// abandoned without any state change.
#[async_trait]
pub trait TargetProvider: Send + Sync {
    async fn select(
        &self,
        request: &TargetRequest,
        state: &MatchState,
    ) -> Result<Option<TargetSelection>>;
}

/// Replays a fixed list of answers in order.
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Option<TargetSelection>>>,
}

impl ScriptedProvider {
    pub fn new(script: impl IntoIterator<Item = Option<TargetSelection>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
        }
    }

    pub async fn remaining(&self) -> usize {
        self.script.lock().await.len()
    }
}

#[async_trait]
impl TargetProvider for ScriptedProvider {
    async fn select(
        &self,
        _request: &TargetRequest,
        _state: &MatchState,
    ) -> Result<Option<TargetSelection>> {
        self.script
            .lock()
            .await
            .pop_front()
            .ok_or(RuntimeError::ScriptExhausted)
    }
}

/// Always takes the first offered option.
/// Useful for demos or as a fallback.
pub struct FirstOptionProvider;

#[async_trait]
impl TargetProvider for FirstOptionProvider {
    async fn select(
        &self,
        request: &TargetRequest,
        _state: &MatchState,
    ) -> Result<Option<TargetSelection>> {
        Ok(request.selections().into_iter().next())
    }
}

/// Cancels every query.
pub struct CancelProvider;

#[async_trait]
impl TargetProvider for CancelProvider {
    async fn select(
        &self,
        _request: &TargetRequest,
        _state: &MatchState,
    ) -> Result<Option<TargetSelection>> {
        Ok(None)
    }
}
