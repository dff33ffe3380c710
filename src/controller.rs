//! Swipe controller: gestures in, decisions out
//!
//! All deck, counter and cart mutation happens behind one mutex so the
//! animation completions may arrive from a timer thread. Sinks and the
//! checkout trigger run while that lock is held and must not call back
//! into the controller.

use crate::config::DeckConfig;
use crate::domain::{
    CardMachine, CardState, CardTransform, CheckoutTrigger, Deck, DecisionSink, Dispatcher,
    GestureSample, Item, Outcome, Placeholder, Resolution, SessionStats, Surface, Thresholds,
};
use crate::error::Result;
use crate::scheduler::{CancellationToken, Scheduler};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tracing::{debug, warn};

/// An inert card rendered behind the active one
#[derive(Debug, Clone, PartialEq)]
pub struct StackCard {
    pub item: Item,
    pub placeholder: Placeholder,
}

/// Everything a presentation layer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct DeckView {
    pub current: Option<Item>,
    pub current_index: usize,
    pub total: usize,
    /// Transform of the active card, `None` for an empty deck
    pub active: Option<CardTransform>,
    pub stack: Vec<StackCard>,
    pub state: CardState,
    pub swipes: u64,
}

struct Session {
    deck: Deck,
    card: CardMachine,
    dispatcher: Dispatcher,
    config: DeckConfig,
    pending: Option<CancellationToken>,
    generation: u64,
    torn_down: bool,
}

impl Session {
    fn complete_animation(&mut self, generation: u64) {
        if self.torn_down || generation != self.generation {
            debug!(generation, "Stale animation completion ignored");
            return;
        }
        self.pending = None;

        if let Some(outcome) = self.card.finish() {
            let event = self.deck.on_outcome(outcome, self.config.default_stake);
            debug!(?outcome, index = self.deck.current_index(), "Outcome committed");
            self.dispatcher.dispatch(event);
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
        self.generation += 1;
    }
}

pub struct SwipeController {
    session: Arc<Mutex<Session>>,
    scheduler: Arc<dyn Scheduler>,
}

impl std::fmt::Debug for SwipeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let session = self.session.lock();
        f.debug_struct("SwipeController")
            .field("current_index", &session.deck.current_index())
            .field("card", &session.card.state())
            .field("dispatcher", &session.dispatcher)
            .finish()
    }
}

impl SwipeController {
    pub fn new(
        items: Vec<Item>,
        config: DeckConfig,
        surface: Surface,
        scheduler: Arc<dyn Scheduler>,
        sink: impl DecisionSink + 'static,
        checkout: impl CheckoutTrigger + 'static,
    ) -> Result<Self> {
        config.validate()?;
        let thresholds = Thresholds::from_surface(surface, config.threshold_ratio)?;

        let card = CardMachine::new(
            surface,
            thresholds,
            config.exit_duration(),
            config.snap_back_duration(),
            config.max_rotation_deg,
        );
        let dispatcher = Dispatcher::new(
            Box::new(sink),
            Box::new(checkout),
            config.cards_before_checkout,
            items.len(),
        );
        let deck = Deck::new(items, config.lookahead);

        Ok(Self {
            session: Arc::new(Mutex::new(Session {
                deck,
                card,
                dispatcher,
                config,
                pending: None,
                generation: 0,
                torn_down: false,
            })),
            scheduler,
        })
    }

    /// Starts a drag on `item_id`. Ignored unless that item is the top card
    /// and the card is at rest.
    pub fn begin_drag(&self, item_id: &str) -> bool {
        let mut session = self.session.lock();
        let is_top = session.deck.current().is_some_and(|item| item.id == item_id);
        if !is_top {
            debug!(item = item_id, "Gesture on inactive card ignored");
            return false;
        }
        session.card.begin_drag()
    }

    pub fn drag_to(&self, sample: GestureSample) -> bool {
        self.session.lock().card.drag_to(sample)
    }

    /// Abandons a drag in progress without classifying it
    pub fn cancel_drag(&self) {
        let mut session = self.session.lock();
        if matches!(session.card.state(), CardState::Dragging) {
            session.card.reset();
        }
    }

    /// Ends the drag and starts whatever the classified outcome calls for.
    ///
    /// Commits reach the deck only once the exit animation completes.
    pub fn release(&self) -> Result<Resolution> {
        let mut session = self.session.lock();
        let now = self.scheduler.now();

        let resolution = match session.card.release(now) {
            Ok(resolution) => resolution,
            Err(e) => {
                warn!(error = %e, "Rejected gesture");
                return Err(e);
            }
        };

        match resolution {
            Resolution::CommitAfterExit(outcome) => {
                debug!(?outcome, "Card exiting");
                let after = session.card.exit_duration();
                self.arm(&mut session, after);
            }
            Resolution::SnapBack => {
                if session.card.is_animating() {
                    let after = session.card.snap_back_duration();
                    self.arm(&mut session, after);
                }
            }
            Resolution::RetreatImmediate => {
                session.deck.retreat();
                debug!(index = session.deck.current_index(), "Retreated to previous card");
            }
            Resolution::Ignored => {}
        }

        Ok(resolution)
    }

    /// Drives a complete swipe on the top card, as a keyboard host would.
    pub fn swipe(&self, outcome: Outcome) -> Result<Resolution> {
        let (item_id, target) = {
            let session = self.session.lock();
            let item_id = match session.deck.current() {
                Some(item) => item.id.clone(),
                None => return Ok(Resolution::Ignored),
            };
            (item_id, synthetic_offset(outcome, session.card.thresholds()))
        };

        if !self.begin_drag(&item_id) {
            return Ok(Resolution::Ignored);
        }
        self.drag_to(target);
        self.release()
    }

    /// Recomputes thresholds for a new surface size
    pub fn resize(&self, surface: Surface) -> Result<()> {
        let mut session = self.session.lock();
        let thresholds = Thresholds::from_surface(surface, session.config.threshold_ratio)?;
        session.card.resize(surface, thresholds);
        Ok(())
    }

    pub fn view(&self) -> DeckView {
        let session = self.session.lock();
        let now = self.scheduler.now();

        let placeholders = session.deck.placeholders(
            session.config.placeholder_scale_step,
            session.config.placeholder_offset_step,
        );
        let stack = session
            .deck
            .upcoming()
            .into_iter()
            .zip(placeholders)
            .map(|(item, placeholder)| StackCard {
                item: item.clone(),
                placeholder,
            })
            .collect();

        let current = session.deck.current().cloned();
        DeckView {
            active: current.as_ref().map(|_| session.card.transform(now)),
            current,
            current_index: session.deck.current_index(),
            total: session.deck.len(),
            stack,
            state: session.card.state(),
            swipes: session.dispatcher.counter(),
        }
    }

    pub fn current(&self) -> Option<Item> {
        self.session.lock().deck.current().cloned()
    }

    pub fn current_index(&self) -> usize {
        self.session.lock().deck.current_index()
    }

    pub fn counter(&self) -> u64 {
        self.session.lock().dispatcher.counter()
    }

    pub fn stats(&self) -> SessionStats {
        self.session.lock().dispatcher.stats().clone()
    }

    pub fn is_animating(&self) -> bool {
        self.session.lock().card.is_animating()
    }

    /// Schedules the completion for the running animation. The callback
    /// holds only a weak handle and a generation stamp, so it is a no-op
    /// once the controller is gone or a newer animation replaced it.
    fn arm(&self, session: &mut Session, after: Duration) {
        session.cancel_pending();
        let generation = session.generation;
        let weak: Weak<Mutex<Session>> = Arc::downgrade(&self.session);

        let token = self.scheduler.schedule(
            after,
            Box::new(move || match weak.upgrade() {
                Some(session) => session.lock().complete_animation(generation),
                None => debug!("Animation finished after teardown, ignored"),
            }),
        );
        session.pending = Some(token);
    }
}

impl Drop for SwipeController {
    fn drop(&mut self) {
        let mut session = self.session.lock();
        session.torn_down = true;
        session.cancel_pending();
    }
}

/// Offset just past the threshold of `outcome`
fn synthetic_offset(outcome: Outcome, thresholds: &Thresholds) -> GestureSample {
    let h = thresholds.horizontal() * 1.5;
    let v = thresholds.vertical() * 1.5;
    match outcome {
        Outcome::Right => GestureSample::new(h, 0.0),
        Outcome::Left => GestureSample::new(-h, 0.0),
        Outcome::Up => GestureSample::new(0.0, -v),
        Outcome::Down => GestureSample::new(0.0, v),
        Outcome::None => GestureSample::default(),
    }
}
