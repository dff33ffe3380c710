//! Timed animation callbacks
//!
//! The swipe engine never sleeps. It asks a [`Scheduler`] to run a
//! completion once a duration has passed, and keeps the returned
//! [`CancellationToken`] so teardown can stop the callback from firing.

use parking_lot::Mutex;
use std::cmp::Ordering as CmpOrdering;
use std::collections::BinaryHeap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::Notify;
use tokio::time::Instant;

/// Callback run when an animation finishes
pub type Completion = Box<dyn FnOnce() + Send + 'static>;

#[derive(Debug, Default)]
struct TokenInner {
    cancelled: AtomicBool,
    notify: Notify,
}

/// Handle to a scheduled completion. Cancelling is idempotent.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    inner: Arc<TokenInner>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    async fn cancelled(&self) {
        let notified = self.inner.notify.notified();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }
}

pub trait Scheduler: Send + Sync {
    /// Runs `on_complete` once after `after`, unless the token is cancelled first
    fn schedule(&self, after: Duration, on_complete: Completion) -> CancellationToken;

    /// Monotonic time since the scheduler was created
    fn now(&self) -> Duration;
}

/// Scheduler backed by tokio timers.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
    origin: Instant,
}

impl TokioScheduler {
    /// Must be called from within a tokio runtime.
    pub fn current() -> Self {
        Self::with_handle(Handle::current())
    }

    pub fn with_handle(handle: Handle) -> Self {
        let origin = {
            let _guard = handle.enter();
            Instant::now()
        };
        Self { handle, origin }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, after: Duration, on_complete: Completion) -> CancellationToken {
        let token = CancellationToken::new();
        let task_token = token.clone();

        self.handle.spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(after) => {
                    if !task_token.is_cancelled() {
                        on_complete();
                    }
                }
                _ = task_token.cancelled() => {}
            }
        });

        token
    }

    fn now(&self) -> Duration {
        let _guard = self.handle.enter();
        Instant::now().saturating_duration_since(self.origin)
    }
}

struct Pending {
    deadline: Duration,
    seq: u64,
    token: CancellationToken,
    on_complete: Completion,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    // Reversed so the max-heap pops the earliest deadline first
    fn cmp(&self, other: &Self) -> CmpOrdering {
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    seq: u64,
    queue: BinaryHeap<Pending>,
}

/// Virtual-time scheduler driven by explicit [`ManualScheduler::advance`]
/// calls. Used by tests and by hosts that tick animations per frame.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    state: Arc<Mutex<ManualState>>,
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ManualScheduler")
            .field("now", &state.now)
            .field("pending", &state.queue.len())
            .finish()
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of completions still waiting, cancelled ones included
    pub fn pending(&self) -> usize {
        self.state.lock().queue.len()
    }

    /// Moves the clock forward and runs every completion that fell due,
    /// in deadline order. Returns how many ran.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.state.lock().now + by;
        let mut fired = 0;

        loop {
            let next = {
                let mut state = self.state.lock();
                match state.queue.peek() {
                    Some(p) if p.deadline <= target => {
                        let pending = state.queue.pop();
                        if let Some(p) = &pending {
                            state.now = state.now.max(p.deadline);
                        }
                        pending
                    }
                    _ => None,
                }
            };

            // Run outside the lock, a completion may schedule again
            match next {
                Some(pending) => {
                    if !pending.token.is_cancelled() {
                        (pending.on_complete)();
                        fired += 1;
                    }
                }
                None => break,
            }
        }

        self.state.lock().now = target;
        fired
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, after: Duration, on_complete: Completion) -> CancellationToken {
        let token = CancellationToken::new();
        let mut state = self.state.lock();
        let deadline = state.now + after;
        let seq = state.seq;
        state.seq += 1;
        state.queue.push(Pending {
            deadline,
            seq,
            token: token.clone(),
            on_complete,
        });
        token
    }

    fn now(&self) -> Duration {
        self.state.lock().now
    }
}
