//! Animation states of the active card

use super::classifier::{classify, Surface, Thresholds};
use super::gesture::{CardTransform, GestureSample, GestureTracker};
use super::Outcome;
use crate::error::Result;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CardState {
    /// Card at rest in the center
    Idle,
    /// Card follows the pointer
    Dragging,
    /// Animated return to the center
    SnappingBack { from: GestureSample, started: Duration },
    /// Animated fly-off, the outcome commits once this finishes
    Exiting {
        outcome: Outcome,
        from: GestureSample,
        to: GestureSample,
        started: Duration,
    },
}

/// What a release asks the caller to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Wait for the exit animation, then hand the outcome to the deck
    CommitAfterExit(Outcome),
    /// Go to the previous card right away, no exit animation
    RetreatImmediate,
    /// Below every threshold, the card springs back
    SnapBack,
    /// Nothing was being dragged
    Ignored,
}

#[derive(Debug, Clone)]
pub struct CardMachine {
    state: CardState,
    tracker: GestureTracker,
    surface: Surface,
    thresholds: Thresholds,
    exit_duration: Duration,
    snap_back_duration: Duration,
    max_rotation_deg: f64,
}

impl CardMachine {
    pub fn new(
        surface: Surface,
        thresholds: Thresholds,
        exit_duration: Duration,
        snap_back_duration: Duration,
        max_rotation_deg: f64,
    ) -> Self {
        Self {
            state: CardState::Idle,
            tracker: GestureTracker::new(),
            surface,
            thresholds,
            exit_duration,
            snap_back_duration,
            max_rotation_deg,
        }
    }

    pub fn state(&self) -> CardState {
        self.state
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn exit_duration(&self) -> Duration {
        self.exit_duration
    }

    pub fn snap_back_duration(&self) -> Duration {
        self.snap_back_duration
    }

    /// Resizing only affects later gestures; a running animation keeps its path.
    pub fn resize(&mut self, surface: Surface, thresholds: Thresholds) {
        self.surface = surface;
        self.thresholds = thresholds;
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, CardState::Idle)
    }

    pub fn is_animating(&self) -> bool {
        matches!(
            self.state,
            CardState::SnappingBack { .. } | CardState::Exiting { .. }
        )
    }

    /// Starts a drag. Refused unless the card is at rest.
    pub fn begin_drag(&mut self) -> bool {
        if !self.is_idle() || self.tracker.is_dragging() {
            return false;
        }
        self.tracker.begin();
        self.state = CardState::Dragging;
        true
    }

    /// Moves the card with the pointer. Samples outside a drag are dropped.
    pub fn drag_to(&mut self, sample: GestureSample) -> bool {
        self.tracker.update(sample)
    }

    /// Running offset of the current drag
    pub fn drag_offset(&self) -> Option<GestureSample> {
        self.tracker.offset()
    }

    /// Classifies the drag and moves into the matching animation.
    ///
    /// A classifier error drops the card back to `Idle` so the next gesture
    /// starts clean.
    pub fn release(&mut self, now: Duration) -> Result<Resolution> {
        let offset = match self.tracker.end() {
            Some(offset) => offset,
            None => return Ok(Resolution::Ignored),
        };

        let outcome = match classify(offset.dx, offset.dy, &self.thresholds) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.state = CardState::Idle;
                return Err(e);
            }
        };

        let resolution = match outcome {
            Outcome::Right | Outcome::Left | Outcome::Up => {
                self.state = CardState::Exiting {
                    outcome,
                    from: offset,
                    to: self.exit_target(outcome, offset),
                    started: now,
                };
                Resolution::CommitAfterExit(outcome)
            }
            Outcome::Down => {
                self.state = CardState::Idle;
                Resolution::RetreatImmediate
            }
            Outcome::None => {
                self.state = if offset == GestureSample::default() {
                    CardState::Idle
                } else {
                    CardState::SnappingBack {
                        from: offset,
                        started: now,
                    }
                };
                Resolution::SnapBack
            }
        };

        Ok(resolution)
    }

    /// Ends the running animation. Returns the outcome to commit when the
    /// card was exiting.
    pub fn finish(&mut self) -> Option<Outcome> {
        match self.state {
            CardState::Exiting { outcome, .. } => {
                self.state = CardState::Idle;
                Some(outcome)
            }
            CardState::SnappingBack { .. } => {
                self.state = CardState::Idle;
                None
            }
            CardState::Idle | CardState::Dragging => None,
        }
    }

    /// Forces the card back to rest, dropping any drag or animation
    pub fn reset(&mut self) {
        self.tracker.cancel();
        self.state = CardState::Idle;
    }

    /// Transform of the card at clock instant `now`
    pub fn transform(&self, now: Duration) -> CardTransform {
        let offset = match self.state {
            CardState::Idle => return CardTransform::at_rest(),
            CardState::Dragging => self.tracker.offset().unwrap_or_default(),
            CardState::SnappingBack { from, started } => {
                let t = ease_out(progress(now, started, self.snap_back_duration));
                from.lerp(GestureSample::default(), t)
            }
            CardState::Exiting {
                from, to, started, ..
            } => from.lerp(to, progress(now, started, self.exit_duration)),
        };
        CardTransform::for_offset(offset, self.surface, &self.thresholds, self.max_rotation_deg)
    }

    /// Point past the surface bounds the card flies to
    fn exit_target(&self, outcome: Outcome, from: GestureSample) -> GestureSample {
        let far_x = self.surface.width * 1.5;
        let far_y = self.surface.height * 1.5;
        match outcome {
            Outcome::Right => GestureSample::new(far_x, from.dy),
            Outcome::Left => GestureSample::new(-far_x, from.dy),
            Outcome::Up => GestureSample::new(from.dx, -far_y),
            Outcome::Down | Outcome::None => from,
        }
    }
}

fn progress(now: Duration, started: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_sub(started);
    (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
}

fn ease_out(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}
