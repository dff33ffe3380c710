//! Side effects of committed swipes: counter, cart and checkout prompts

use super::deck::DeckEvent;
use super::{Decision, Position, SessionStats};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Commits between two checkout prompts
pub const CARDS_BEFORE_CHECKOUT: u64 = 20;

/// Stake attached to a swipe before the user adjusts it at checkout
pub const DEFAULT_STAKE: u64 = 100;

/// Receives decisions as they are committed
pub trait DecisionSink: Send {
    fn push(&mut self, decision: Decision);
}

/// Fired each time the counter reaches a multiple of the checkout interval
pub trait CheckoutTrigger: Send {
    fn checkout_due(&mut self);
}

impl<F> CheckoutTrigger for F
where
    F: FnMut() + Send,
{
    fn checkout_due(&mut self) {
        self()
    }
}

impl DecisionSink for mpsc::UnboundedSender<Decision> {
    fn push(&mut self, decision: Decision) {
        if self.send(decision).is_err() {
            warn!("Decision receiver dropped, decision lost");
        }
    }
}

/// Pending decisions awaiting checkout.
///
/// Cloning yields another handle to the same list, so the host keeps one
/// handle while the dispatcher owns the other.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    entries: Arc<Mutex<Vec<Decision>>>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Decision> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Adjusts the stake of every pending decision on `item_id`.
    /// Returns false when the item is not in the cart.
    pub fn set_stake(&self, item_id: &str, amount: u64) -> bool {
        let mut entries = self.entries.lock();
        let mut found = false;
        for entry in entries.iter_mut().filter(|e| e.item_id == item_id) {
            entry.amount = amount;
            found = true;
        }
        found
    }

    pub fn total_stake(&self) -> u64 {
        self.entries.lock().iter().map(|e| e.amount).sum()
    }

    /// Empties the cart, handing its contents to checkout
    pub fn take(&self) -> Vec<Decision> {
        std::mem::take(&mut *self.entries.lock())
    }
}

impl DecisionSink for Cart {
    fn push(&mut self, decision: Decision) {
        self.entries.lock().push(decision);
    }
}

pub struct Dispatcher {
    sink: Box<dyn DecisionSink>,
    checkout: Box<dyn CheckoutTrigger>,
    interval: u64,
    counter: u64,
    last_checkout_at: Option<u64>,
    stats: SessionStats,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("interval", &self.interval)
            .field("counter", &self.counter)
            .field("last_checkout_at", &self.last_checkout_at)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// `interval` of zero is treated as one so the predicate stays defined.
    pub fn new(
        sink: Box<dyn DecisionSink>,
        checkout: Box<dyn CheckoutTrigger>,
        interval: u64,
        total_items: usize,
    ) -> Self {
        Self {
            sink,
            checkout,
            interval: interval.max(1),
            counter: 0,
            last_checkout_at: None,
            stats: SessionStats {
                total_items,
                ..SessionStats::default()
            },
        }
    }

    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Routes one deck event. Returns true when a checkout prompt fired.
    pub fn dispatch(&mut self, event: DeckEvent) -> bool {
        match event {
            DeckEvent::Decision(decision) => {
                self.counter += 1;
                match decision.position {
                    Position::Yes => self.stats.yes += 1,
                    Position::No => self.stats.no += 1,
                }
                debug!(
                    item = %decision.item_id,
                    position = ?decision.position,
                    amount = decision.amount,
                    counter = self.counter,
                    "Decision committed"
                );
                self.sink.push(decision);
            }
            DeckEvent::Skip { item_id } => {
                self.counter += 1;
                self.stats.skipped += 1;
                debug!(item = %item_id, counter = self.counter, "Item skipped");
            }
            DeckEvent::Nothing => return false,
        }
        self.stats.swipes = self.counter;

        self.check_checkout()
    }

    fn check_checkout(&mut self) -> bool {
        let due = self.counter >= self.interval && self.counter % self.interval == 0;
        if !due || self.last_checkout_at == Some(self.counter) {
            return false;
        }
        self.last_checkout_at = Some(self.counter);
        info!(counter = self.counter, "Checkout due");
        self.checkout.checkout_due();
        true
    }
}
