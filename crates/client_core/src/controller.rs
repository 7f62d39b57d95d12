use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use shared::{
    domain::{Creature, GameStats, RoundState},
    error::CatalogError,
    protocol::RoundSnapshot,
};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::{answer::answers_match, catalog::CatalogSource};

const GENERIC_LOAD_ERROR: &str = "An error occurred";
const CANCELLED_LOAD_ERROR: &str = "loading the round was interrupted";
const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub enum RoundEvent {
    LoadingStarted,
    RoundStarted(Creature),
    LoadFailed(String),
    RoundResolved {
        creature: Creature,
        outcome: RoundState,
        stats: GameStats,
    },
}

struct ActiveRound {
    creature: Creature,
    state: RoundState,
}

#[derive(Default)]
struct RoundControllerState {
    round: Option<ActiveRound>,
    loading: bool,
    error: Option<String>,
    stats: GameStats,
}

/// Owns the round state machine and the session statistics.
///
/// Presentation code drives it through [`start_new_round`](Self::start_new_round),
/// [`submit_guess`](Self::submit_guess) and [`reveal_answer`](Self::reveal_answer), and reads
/// it back through [`snapshot`](Self::snapshot) or the [`subscribe`](Self::subscribe) feed.
///
/// A `start_new_round` issued while another is still loading is dropped, so two loads never
/// race to install their creature. Dropping a pending `start_new_round` clears the loading flag
/// and leaves an error, so the next call can start over.
pub struct RoundController {
    catalog: Arc<dyn CatalogSource>,
    inner: Mutex<RoundControllerState>,
    events: broadcast::Sender<RoundEvent>,
}

impl RoundController {
    pub fn new(catalog: Arc<dyn CatalogSource>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            catalog,
            inner: Mutex::new(RoundControllerState::default()),
            events,
        }
    }

    pub async fn start_new_round(&self) {
        {
            let mut inner = self.lock_state();
            if inner.loading {
                debug!("round: load already in flight, ignoring new round request");
                return;
            }
            inner.loading = true;
            inner.error = None;
            inner.round = None;
        }
        let _ = self.events.send(RoundEvent::LoadingStarted);

        let pending = PendingLoad {
            controller: self,
            armed: true,
        };
        let result = self.catalog.fetch_random_creature().await;
        pending.complete(result);
    }

    pub fn submit_guess(&self, raw_input: &str) {
        self.resolve("submit_guess", |creature| {
            answers_match(&creature.name, raw_input)
        });
    }

    /// Surrender; scored exactly like a wrong guess.
    pub fn reveal_answer(&self) {
        self.resolve("reveal_answer", |_| false);
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        let inner = self.lock_state();
        RoundSnapshot {
            creature: inner.round.as_ref().map(|round| round.creature.clone()),
            loading: inner.loading,
            error: inner.error.clone(),
            state: inner.round.as_ref().map(|round| round.state),
            stats: inner.stats,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RoundEvent> {
        self.events.subscribe()
    }

    fn lock_state(&self) -> MutexGuard<'_, RoundControllerState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn resolve(&self, intent: &'static str, judge: impl FnOnce(&Creature) -> bool) {
        let mut inner = self.lock_state();
        let state = &mut *inner;
        let Some(round) = state
            .round
            .as_mut()
            .filter(|round| round.state == RoundState::Playing)
        else {
            debug!(intent, "round: ignoring intent outside of play");
            return;
        };

        let correct = judge(&round.creature);
        round.state = if correct {
            RoundState::Correct
        } else {
            RoundState::Wrong
        };
        state.stats.record_attempt(correct);

        info!(
            intent,
            creature_id = round.creature.id.0,
            correct,
            streak = state.stats.streak,
            "round: resolved"
        );
        let _ = self.events.send(RoundEvent::RoundResolved {
            creature: round.creature.clone(),
            outcome: round.state,
            stats: state.stats,
        });
    }
}

/// Marks an in-flight load. If dropped before `complete`, the load was cancelled and the
/// controller is reset to an idle, error-bearing state.
struct PendingLoad<'a> {
    controller: &'a RoundController,
    armed: bool,
}

impl PendingLoad<'_> {
    fn complete(mut self, result: Result<Creature, CatalogError>) {
        self.armed = false;
        let controller = self.controller;
        let mut inner = controller.lock_state();
        inner.loading = false;
        match result {
            Ok(creature) => {
                info!(creature_id = creature.id.0, "round: started");
                inner.round = Some(ActiveRound {
                    creature: creature.clone(),
                    state: RoundState::Playing,
                });
                let _ = controller.events.send(RoundEvent::RoundStarted(creature));
            }
            Err(err) => {
                let message = load_failure_message(&err);
                warn!(error = %err, "round: failed to load creature");
                inner.error = Some(message.clone());
                let _ = controller.events.send(RoundEvent::LoadFailed(message));
            }
        }
    }
}

impl Drop for PendingLoad<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        warn!("round: load cancelled before completion");
        let mut inner = self.controller.lock_state();
        inner.loading = false;
        inner.round = None;
        inner.error = Some(CANCELLED_LOAD_ERROR.to_string());
        let _ = self
            .controller
            .events
            .send(RoundEvent::LoadFailed(CANCELLED_LOAD_ERROR.to_string()));
    }
}

fn load_failure_message(err: &CatalogError) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        GENERIC_LOAD_ERROR.to_string()
    } else {
        message
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
