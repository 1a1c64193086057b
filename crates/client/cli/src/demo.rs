//! Scripted match driver.
//!
//! Every living creature takes a turn in id order and tries each of its
//! abilities once. Outcomes are printed as JSON lines on stdout.
use anyhow::Result;
use arena_core::{AbilityId, CreatureId};
use arena_runtime::{AbilityOutcome, Session, SessionEvent};
use serde::Serialize;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{debug, info};

#[derive(Serialize)]
struct Line {
    round: u32,
    ability: AbilityId,
    outcome: AbilityOutcomeView,
}

#[derive(Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
enum AbilityOutcomeView {
    Blocked { message: String },
    Cancelled,
    Activated { damage: usize, moves: usize, retaliations: usize },
}

impl From<&AbilityOutcome> for AbilityOutcomeView {
    fn from(outcome: &AbilityOutcome) -> Self {
        match outcome {
            AbilityOutcome::Blocked { message, .. } => Self::Blocked {
                message: message.clone(),
            },
            AbilityOutcome::Cancelled => Self::Cancelled,
            AbilityOutcome::Activated(report) => Self::Activated {
                damage: report.outcome.damage.len(),
                moves: report.outcome.moves.len(),
                retaliations: report.retaliations.len(),
            },
        }
    }
}

/// Logs every event on one topic until the bus closes.
pub fn spawn_event_logger(mut rx: broadcast::Receiver<SessionEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => debug!(topic = ?event.topic(), ?event, "session event"),
                Err(RecvError::Lagged(skipped)) => debug!(skipped, "event logger lagged"),
                Err(RecvError::Closed) => break,
            }
        }
    })
}

pub async fn run(session: &mut Session, rounds: u32) -> Result<()> {
    for _ in 0..rounds {
        let round = session.state().turn.round;
        info!(round, "playing round");

        let creatures = session.state().creature_ids();
        for creature in creatures {
            play_turn(session, creature).await?;
        }
        session.begin_round()?;
    }
    Ok(())
}

async fn play_turn(session: &mut Session, creature: CreatureId) -> Result<()> {
    // Earlier turns may have killed it.
    if !session.state().creature(creature).is_some_and(|c| c.is_alive()) {
        return Ok(());
    }

    session.start_turn(creature).await?;
    let slots = session
        .state()
        .creature(creature)
        .map_or(0, |c| c.abilities.len());
    for slot in 0..slots {
        let ability = AbilityId::new(creature, slot as u8);
        let outcome = session.use_ability(ability).await?;
        let line = Line {
            round: session.state().turn.round,
            ability,
            outcome: AbilityOutcomeView::from(&outcome),
        };
        println!("{}", serde_json::to_string(&line)?);
    }
    session.end_turn().await?;
    Ok(())
}
