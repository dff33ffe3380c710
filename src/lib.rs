//! Swipedeck - a headless swipe-card engine for prediction markets
//!
//! Drag gestures on the top card are classified into YES, NO, skip or
//! back. Committed swipes feed a wrapping deck cursor, a pending-decisions
//! cart and a counter that prompts for checkout at a fixed interval. The
//! engine is front-end agnostic; the bundled binary drives it from a terminal.

pub mod cli;
pub mod config;
pub mod controller;
pub mod domain;
pub mod error;
pub mod logging;
pub mod scheduler;
pub mod tui;

// Re-export primary types for convenience
pub use config::DeckConfig;
pub use controller::{DeckView, StackCard, SwipeController};
pub use domain::{
    classify, Cart, CheckoutTrigger, Decision, DecisionSink, Deck, GestureSample, Item, Outcome,
    Position, Resolution, SessionStats, Surface, Thresholds,
};
pub use error::{Result, SwipeError};
pub use scheduler::{CancellationToken, ManualScheduler, Scheduler, TokioScheduler};
