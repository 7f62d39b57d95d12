use super::*;

use std::{
    collections::VecDeque,
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use shared::domain::CreatureId;
use tokio::sync::Notify;

struct ScriptedCatalog {
    results: Mutex<VecDeque<Result<Creature, CatalogError>>>,
    calls: AtomicUsize,
    gate: Option<Arc<Notify>>,
}

impl ScriptedCatalog {
    fn new(results: Vec<Result<Creature, CatalogError>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    fn gated(results: Vec<Result<Creature, CatalogError>>, gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new(results)
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogSource for ScriptedCatalog {
    async fn fetch_random_creature(&self) -> Result<Creature, CatalogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.results
            .lock()
            .expect("scripted results")
            .pop_front()
            .unwrap_or(Err(CatalogError::ExhaustedRetries { attempts: 5 }))
    }
}

fn creature(id: u32, name: &str) -> Creature {
    Creature {
        id: CreatureId(id),
        name: name.to_string(),
        image_url: None,
        types: vec!["normal".to_string()],
        height: 10,
        weight: 100,
    }
}

fn controller_with(results: Vec<Result<Creature, CatalogError>>) -> RoundController {
    RoundController::new(Arc::new(ScriptedCatalog::new(results)))
}

#[tokio::test]
async fn fresh_controller_has_no_round() {
    let controller = controller_with(Vec::new());
    let snapshot = controller.snapshot();

    assert_eq!(snapshot, RoundSnapshot::default());
    assert!(!snapshot.is_playable());
}

#[tokio::test]
async fn start_new_round_installs_creature_and_plays() {
    let controller = controller_with(vec![Ok(creature(25, "pikachu"))]);

    controller.start_new_round().await;

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.creature, Some(creature(25, "pikachu")));
    assert_eq!(snapshot.state, Some(RoundState::Playing));
    assert!(!snapshot.loading);
    assert_eq!(snapshot.error, None);
}

#[tokio::test]
async fn correct_guess_resolves_round_and_scores() {
    let controller = controller_with(vec![Ok(creature(29, "nidoran-f"))]);
    controller.start_new_round().await;

    controller.submit_guess("  Nidoran F ");

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.state, Some(RoundState::Correct));
    assert_eq!(
        snapshot.creature.as_ref().map(|c| c.name.as_str()),
        Some("nidoran-f")
    );
    assert_eq!(
        snapshot.stats,
        GameStats {
            total: 1,
            correct: 1,
            wrong: 0,
            streak: 1,
            best_streak: 1,
        }
    );
}

#[tokio::test]
async fn wrong_guess_resolves_round_as_wrong() {
    let controller = controller_with(vec![Ok(creature(25, "pikachu"))]);
    controller.start_new_round().await;

    controller.submit_guess("raichu");

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.state, Some(RoundState::Wrong));
    assert_eq!(snapshot.stats.wrong, 1);
    assert_eq!(snapshot.stats.total, 1);
    assert_eq!(snapshot.stats.streak, 0);
}

#[tokio::test]
async fn blank_guess_counts_as_wrong() {
    let controller = controller_with(vec![Ok(creature(25, "pikachu"))]);
    controller.start_new_round().await;

    controller.submit_guess("   ");

    assert_eq!(controller.snapshot().state, Some(RoundState::Wrong));
}

#[tokio::test]
async fn three_correct_then_wrong_scenario() {
    let controller = controller_with(vec![
        Ok(creature(1, "bulbasaur")),
        Ok(creature(4, "charmander")),
        Ok(creature(7, "squirtle")),
        Ok(creature(25, "pikachu")),
    ]);

    for name in ["bulbasaur", "charmander", "squirtle"] {
        controller.start_new_round().await;
        controller.submit_guess(name);
    }
    controller.start_new_round().await;
    controller.submit_guess("meowth");

    assert_eq!(
        controller.snapshot().stats,
        GameStats {
            total: 4,
            correct: 3,
            wrong: 1,
            streak: 0,
            best_streak: 3,
        }
    );
}

#[tokio::test]
async fn reveal_answer_scores_as_wrong_and_resets_streak() {
    let controller = controller_with(vec![
        Ok(creature(1, "bulbasaur")),
        Ok(creature(4, "charmander")),
    ]);
    controller.start_new_round().await;
    controller.submit_guess("bulbasaur");
    controller.start_new_round().await;

    controller.reveal_answer();

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.state, Some(RoundState::Wrong));
    assert_eq!(
        snapshot.creature.as_ref().map(|c| c.id),
        Some(CreatureId(4))
    );
    assert_eq!(
        snapshot.stats,
        GameStats {
            total: 2,
            correct: 1,
            wrong: 1,
            streak: 0,
            best_streak: 1,
        }
    );
}

#[tokio::test]
async fn intents_after_resolution_are_ignored() {
    let controller = controller_with(vec![Ok(creature(25, "pikachu"))]);
    controller.start_new_round().await;
    controller.submit_guess("pikachu");
    let resolved = controller.snapshot();

    controller.submit_guess("raichu");
    controller.submit_guess("pikachu");
    controller.reveal_answer();

    assert_eq!(controller.snapshot(), resolved);
    assert_eq!(resolved.state, Some(RoundState::Correct));
    assert_eq!(resolved.stats.total, 1);
}

#[tokio::test]
async fn intents_without_creature_are_ignored() {
    let controller = controller_with(Vec::new());

    controller.submit_guess("pikachu");
    controller.reveal_answer();

    assert_eq!(controller.snapshot().stats, GameStats::default());
}

#[tokio::test]
async fn exhausted_retries_leaves_error_and_no_creature() {
    let controller = controller_with(vec![Err(CatalogError::ExhaustedRetries { attempts: 5 })]);

    controller.start_new_round().await;

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.creature, None);
    assert_eq!(snapshot.state, None);
    assert!(!snapshot.loading);
    assert_eq!(
        snapshot.error.as_deref(),
        Some("failed to fetch a valid creature after 5 attempts")
    );
}

#[tokio::test]
async fn failed_load_drops_previous_creature_and_retry_recovers() {
    let controller = controller_with(vec![
        Ok(creature(25, "pikachu")),
        Err(CatalogError::fetch_failure("malformed catalog payload for id 9")),
        Ok(creature(7, "squirtle")),
    ]);
    controller.start_new_round().await;
    controller.submit_guess("pikachu");

    controller.start_new_round().await;
    let failed = controller.snapshot();
    assert_eq!(failed.creature, None);
    assert!(failed
        .error
        .as_deref()
        .is_some_and(|e| e.contains("malformed")));
    assert_eq!(failed.stats.correct, 1);

    controller.start_new_round().await;
    let recovered = controller.snapshot();
    assert_eq!(recovered.error, None);
    assert_eq!(recovered.creature, Some(creature(7, "squirtle")));
    assert_eq!(recovered.state, Some(RoundState::Playing));
}

#[tokio::test]
async fn overlapping_start_requests_are_serialized() {
    let gate = Arc::new(Notify::new());
    let catalog = Arc::new(ScriptedCatalog::gated(
        vec![Ok(creature(25, "pikachu")), Ok(creature(26, "raichu"))],
        Arc::clone(&gate),
    ));
    let controller = Arc::new(RoundController::new(catalog.clone()));

    let pending = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move { controller.start_new_round().await })
    };
    while !controller.snapshot().loading {
        tokio::task::yield_now().await;
    }

    controller.submit_guess("pikachu");
    controller.start_new_round().await;
    assert_eq!(catalog.calls(), 1);

    gate.notify_one();
    pending.await.expect("first load");

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.creature, Some(creature(25, "pikachu")));
    assert_eq!(snapshot.state, Some(RoundState::Playing));
    assert_eq!(snapshot.stats.total, 0);
    assert!(!snapshot.loading);
}

#[tokio::test]
async fn cancelled_load_does_not_block_later_rounds() {
    let gate = Arc::new(Notify::new());
    let catalog = Arc::new(ScriptedCatalog::gated(
        vec![Ok(creature(25, "pikachu"))],
        Arc::clone(&gate),
    ));
    let controller = RoundController::new(catalog.clone());
    let mut events = controller.subscribe();

    let timed_out = tokio::time::timeout(Duration::from_millis(50), controller.start_new_round())
        .await
        .is_err();
    assert!(timed_out);

    let cancelled = controller.snapshot();
    assert!(!cancelled.loading);
    assert_eq!(cancelled.creature, None);
    assert_eq!(cancelled.state, None);
    assert_eq!(cancelled.error.as_deref(), Some(CANCELLED_LOAD_ERROR));
    assert_eq!(events.recv().await.expect("event"), RoundEvent::LoadingStarted);
    assert_eq!(
        events.recv().await.expect("event"),
        RoundEvent::LoadFailed(CANCELLED_LOAD_ERROR.to_string())
    );

    gate.notify_one();
    controller.start_new_round().await;

    let recovered = controller.snapshot();
    assert_eq!(catalog.calls(), 2);
    assert!(!recovered.loading);
    assert_eq!(recovered.error, None);
    assert_eq!(recovered.creature, Some(creature(25, "pikachu")));
    assert_eq!(recovered.state, Some(RoundState::Playing));
}

#[tokio::test]
async fn subscribers_observe_round_lifecycle() {
    let controller = controller_with(vec![
        Ok(creature(25, "pikachu")),
        Err(CatalogError::ExhaustedRetries { attempts: 5 }),
    ]);
    let mut events = controller.subscribe();

    controller.start_new_round().await;
    controller.reveal_answer();
    controller.start_new_round().await;

    assert_eq!(events.recv().await.expect("event"), RoundEvent::LoadingStarted);
    assert_eq!(
        events.recv().await.expect("event"),
        RoundEvent::RoundStarted(creature(25, "pikachu"))
    );
    assert_eq!(
        events.recv().await.expect("event"),
        RoundEvent::RoundResolved {
            creature: creature(25, "pikachu"),
            outcome: RoundState::Wrong,
            stats: GameStats {
                total: 1,
                correct: 0,
                wrong: 1,
                streak: 0,
                best_streak: 0,
            },
        }
    );
    assert_eq!(events.recv().await.expect("event"), RoundEvent::LoadingStarted);
    assert_eq!(
        events.recv().await.expect("event"),
        RoundEvent::LoadFailed("failed to fetch a valid creature after 5 attempts".into())
    );
}

#[test]
fn load_failure_message_uses_error_text() {
    assert_eq!(
        load_failure_message(&CatalogError::fetch_failure("boom")),
        "catalog fetch failed: boom"
    );
}
