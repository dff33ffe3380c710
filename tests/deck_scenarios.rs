use chrono::{Duration as ChronoDuration, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use swipedeck::{
    Cart, DeckConfig, GestureSample, Item, ManualScheduler, Outcome, Position, Resolution,
    Surface, SwipeController, TokioScheduler,
};
use tokio::sync::mpsc;

const EXIT: Duration = Duration::from_millis(250);

fn items(ids: &[&str]) -> Vec<Item> {
    ids.iter()
        .map(|id| Item::new(id, &format!("Will {} happen?", id), "Misc", 50, Utc::now() + ChronoDuration::days(7)))
        .collect()
}

fn drag(controller: &SwipeController, item_id: &str, dx: f64, dy: f64) -> Resolution {
    assert!(controller.begin_drag(item_id));
    controller.drag_to(GestureSample::new(dx / 2.0, dy / 2.0));
    controller.drag_to(GestureSample::new(dx, dy));
    controller.release().unwrap()
}

#[test]
fn test_three_card_scenario() {
    let scheduler = ManualScheduler::new();
    let cart = Cart::new();
    let controller = SwipeController::new(
        items(&["A", "B", "C"]),
        DeckConfig::default(),
        Surface::new(400.0, 800.0),
        Arc::new(scheduler.clone()),
        cart.clone(),
        || {},
    )
    .unwrap();

    // Threshold is a quarter of 400
    drag(&controller, "A", 120.0, 5.0);
    scheduler.advance(EXIT);
    assert_eq!(controller.current_index(), 1);

    drag(&controller, "B", -120.0, -5.0);
    scheduler.advance(EXIT);
    assert_eq!(controller.current_index(), 2);

    drag(&controller, "C", 3.0, -60.0);
    scheduler.advance(EXIT);

    let entries = cart.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!((entries[0].item_id.as_str(), entries[0].position), ("A", Position::Yes));
    assert_eq!((entries[1].item_id.as_str(), entries[1].position), ("B", Position::No));
    assert_eq!(controller.current_index(), 0);
    assert_eq!(controller.counter(), 3);
}

#[test]
fn test_previous_card_then_commit() {
    let scheduler = ManualScheduler::new();
    let cart = Cart::new();
    let controller = SwipeController::new(
        items(&["A", "B", "C"]),
        DeckConfig::default(),
        Surface::new(400.0, 800.0),
        Arc::new(scheduler.clone()),
        cart.clone(),
        || {},
    )
    .unwrap();

    assert_eq!(drag(&controller, "A", 0.0, 70.0), Resolution::RetreatImmediate);
    assert_eq!(controller.current().unwrap().id, "C");

    drag(&controller, "C", 150.0, 0.0);
    scheduler.advance(EXIT);
    assert_eq!(cart.entries()[0].item_id, "C");
    assert_eq!(controller.current().unwrap().id, "A");
    assert_eq!(controller.counter(), 1);
}

#[test]
fn test_checkout_interval_from_config() {
    let scheduler = ManualScheduler::new();
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fired);
    let config = DeckConfig {
        cards_before_checkout: 3,
        default_stake: 10,
        ..DeckConfig::default()
    };
    let cart = Cart::new();
    let controller = SwipeController::new(
        items(&["A", "B"]),
        config,
        Surface::new(400.0, 800.0),
        Arc::new(scheduler.clone()),
        cart.clone(),
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
        },
    )
    .unwrap();

    for outcome in [Outcome::Right, Outcome::Up, Outcome::Down, Outcome::Left] {
        controller.swipe(outcome).unwrap();
        scheduler.advance(EXIT);
    }
    // Down does not count, so the third commit is the final Left
    assert_eq!(controller.counter(), 3);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert_eq!(cart.total_stake(), 20);
}

#[test]
fn test_invalid_config_rejected() {
    let config = DeckConfig {
        threshold_ratio: f64::NAN,
        ..DeckConfig::default()
    };
    let result = SwipeController::new(
        items(&["A"]),
        config,
        Surface::new(400.0, 800.0),
        Arc::new(ManualScheduler::new()),
        Cart::new(),
        || {},
    );
    assert!(result.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_tokio_scheduler_commits_after_exit() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let controller = SwipeController::new(
        items(&["A", "B"]),
        DeckConfig::default(),
        Surface::new(400.0, 800.0),
        Arc::new(TokioScheduler::current()),
        tx,
        || {},
    )
    .unwrap();

    controller.swipe(Outcome::Right).unwrap();
    assert!(rx.try_recv().is_err());

    tokio::time::sleep(Duration::from_millis(300)).await;
    let decision = rx.try_recv().unwrap();
    assert_eq!(decision.item_id, "A");
    assert_eq!(controller.current_index(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_tokio_teardown_suppresses_commit() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let controller = SwipeController::new(
        items(&["A", "B"]),
        DeckConfig::default(),
        Surface::new(400.0, 800.0),
        Arc::new(TokioScheduler::current()),
        tx,
        || {},
    )
    .unwrap();

    controller.swipe(Outcome::Left).unwrap();
    drop(controller);

    tokio::time::sleep(Duration::from_secs(1)).await;
    // Sender was dropped with the controller and nothing was sent
    assert!(matches!(
        rx.try_recv(),
        Err(mpsc::error::TryRecvError::Disconnected)
    ));
}
