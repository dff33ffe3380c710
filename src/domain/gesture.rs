//! Pointer drag tracking for the top card

use super::classifier::{Surface, Thresholds};

/// Offset accumulated since the drag started
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GestureSample {
    pub dx: f64,
    pub dy: f64,
}

impl GestureSample {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Linear interpolation towards `to`, `t` clamped to [0, 1]
    pub fn lerp(self, to: GestureSample, t: f64) -> GestureSample {
        let t = t.clamp(0.0, 1.0);
        GestureSample {
            dx: self.dx + (to.dx - self.dx) * t,
            dy: self.dy + (to.dy - self.dy) * t,
        }
    }
}

/// Visual state of the active card for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardTransform {
    pub offset: GestureSample,
    pub rotation_deg: f64,
    /// Strength of the YES stamp (right drag)
    pub yes_opacity: f64,
    /// Strength of the NO stamp (left drag)
    pub no_opacity: f64,
    /// Strength of the SKIP stamp (up drag)
    pub skip_opacity: f64,
}

impl CardTransform {
    pub fn at_rest() -> Self {
        Self {
            offset: GestureSample::default(),
            rotation_deg: 0.0,
            yes_opacity: 0.0,
            no_opacity: 0.0,
            skip_opacity: 0.0,
        }
    }

    /// Rotation follows `dx` across half the surface width on either side,
    /// stamps fade in as the offset approaches the matching threshold.
    pub fn for_offset(
        offset: GestureSample,
        surface: Surface,
        thresholds: &Thresholds,
        max_rotation_deg: f64,
    ) -> Self {
        let half_width = surface.width / 2.0;
        let rotation_deg = if half_width > 0.0 {
            (offset.dx / half_width).clamp(-1.0, 1.0) * max_rotation_deg
        } else {
            0.0
        };

        let ramp = |distance: f64, threshold: f64| {
            if threshold > 0.0 {
                (distance / threshold).clamp(0.0, 1.0)
            } else {
                0.0
            }
        };

        Self {
            offset,
            rotation_deg,
            yes_opacity: ramp(offset.dx, thresholds.horizontal()),
            no_opacity: ramp(-offset.dx, thresholds.horizontal()),
            skip_opacity: ramp(-offset.dy, thresholds.vertical()),
        }
    }
}

/// Tracks the running offset of an active drag.
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    offset: Option<GestureSample>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) {
        self.offset = Some(GestureSample::default());
    }

    pub fn is_dragging(&self) -> bool {
        self.offset.is_some()
    }

    /// Replaces the running offset. Ignored when no drag is active.
    pub fn update(&mut self, sample: GestureSample) -> bool {
        match self.offset.as_mut() {
            Some(offset) => {
                *offset = sample;
                true
            }
            None => false,
        }
    }

    pub fn offset(&self) -> Option<GestureSample> {
        self.offset
    }

    /// Ends the drag and hands back the final offset
    pub fn end(&mut self) -> Option<GestureSample> {
        self.offset.take()
    }

    /// Drops an in-progress drag without producing an offset
    pub fn cancel(&mut self) {
        self.offset = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod tracker_tests {
        use super::*;

        #[test]
        fn test_tracker_ignores_samples_without_drag() {
            let mut tracker = GestureTracker::new();
            assert!(!tracker.update(GestureSample::new(10.0, 5.0)));
            assert_eq!(tracker.offset(), None);
            assert_eq!(tracker.end(), None);
        }

        #[test]
        fn test_tracker_follows_latest_sample() {
            let mut tracker = GestureTracker::new();
            tracker.begin();
            assert_eq!(tracker.offset(), Some(GestureSample::default()));

            tracker.update(GestureSample::new(10.0, 5.0));
            tracker.update(GestureSample::new(42.0, -3.0));

            assert!(tracker.is_dragging());
            assert_eq!(tracker.end(), Some(GestureSample::new(42.0, -3.0)));
            assert!(!tracker.is_dragging());
        }

        #[test]
        fn test_tracker_cancel() {
            let mut tracker = GestureTracker::new();
            tracker.begin();
            tracker.update(GestureSample::new(1.0, 1.0));
            tracker.cancel();
            assert_eq!(tracker.end(), None);
        }
    }

    mod transform_tests {
        use super::*;

        fn surface() -> Surface {
            Surface::new(400.0, 800.0)
        }

        #[test]
        fn test_transform_at_rest() {
            let transform = CardTransform::at_rest();
            assert_eq!(transform.rotation_deg, 0.0);
            assert_eq!(transform.yes_opacity, 0.0);
            assert_eq!(transform.no_opacity, 0.0);
            assert_eq!(transform.skip_opacity, 0.0);
        }

        #[test]
        fn test_rotation_is_interpolated_and_clamped() {
            let t = Thresholds::fixed(100.0).unwrap();
            let half = CardTransform::for_offset(GestureSample::new(100.0, 0.0), surface(), &t, 10.0);
            assert!((half.rotation_deg - 5.0).abs() < 1e-9);

            let far = CardTransform::for_offset(GestureSample::new(-1000.0, 0.0), surface(), &t, 10.0);
            assert_eq!(far.rotation_deg, -10.0);
        }

        #[test]
        fn test_opacity_by_direction() {
            let t = Thresholds::fixed(100.0).unwrap();

            let right = CardTransform::for_offset(GestureSample::new(50.0, 0.0), surface(), &t, 10.0);
            assert_eq!(right.yes_opacity, 0.5);
            assert_eq!(right.no_opacity, 0.0);

            let left = CardTransform::for_offset(GestureSample::new(-150.0, 0.0), surface(), &t, 10.0);
            assert_eq!(left.no_opacity, 1.0);
            assert_eq!(left.yes_opacity, 0.0);

            let up = CardTransform::for_offset(GestureSample::new(0.0, -25.0), surface(), &t, 10.0);
            assert_eq!(up.skip_opacity, 0.5);
        }

        #[test]
        fn test_lerp_clamps() {
            let a = GestureSample::new(0.0, 0.0);
            let b = GestureSample::new(100.0, -50.0);
            assert_eq!(a.lerp(b, 0.5), GestureSample::new(50.0, -25.0));
            assert_eq!(a.lerp(b, 2.0), b);
            assert_eq!(a.lerp(b, -1.0), a);
        }
    }
}
