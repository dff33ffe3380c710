//! Maps a released drag offset onto a swipe outcome

use super::Outcome;
use crate::error::{Result, SwipeError};

/// Extent of the swipeable area, in whatever units the host reports pointer
/// positions in (pixels, terminal cells, ...).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
}

impl Surface {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Commit distances derived from the surface width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    horizontal: f64,
}

impl Thresholds {
    /// `ratio` is the share of the surface width a horizontal drag must
    /// cross to commit (0.25 means a quarter of the width).
    pub fn from_surface(surface: Surface, ratio: f64) -> Result<Self> {
        if !surface.width.is_finite() || surface.width <= 0.0 {
            return Err(SwipeError::ConfigError(format!(
                "surface width must be positive, got {}",
                surface.width
            )));
        }
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(SwipeError::ConfigError(format!(
                "threshold ratio must be positive, got {}",
                ratio
            )));
        }
        Self::fixed(surface.width * ratio)
    }

    /// Thresholds with an absolute horizontal distance
    pub fn fixed(horizontal: f64) -> Result<Self> {
        if !horizontal.is_finite() || horizontal <= 0.0 {
            return Err(SwipeError::ConfigError(format!(
                "threshold must be positive, got {}",
                horizontal
            )));
        }
        Ok(Self { horizontal })
    }

    pub fn horizontal(&self) -> f64 {
        self.horizontal
    }

    /// Vertical swipes commit at half the horizontal distance
    pub fn vertical(&self) -> f64 {
        self.horizontal / 2.0
    }
}

/// Classifies a released drag.
///
/// Horizontal movement wins whenever `|dx| > |dy|`, and exact ties also go
/// to the horizontal branch. Every comparison is strict, so an offset sitting
/// exactly on a threshold snaps back.
pub fn classify(dx: f64, dy: f64, thresholds: &Thresholds) -> Result<Outcome> {
    if !dx.is_finite() || !dy.is_finite() {
        return Err(SwipeError::NonFiniteOffset { dx, dy });
    }

    let t = thresholds.horizontal();

    if dx.abs() >= dy.abs() {
        if dx > t {
            return Ok(Outcome::Right);
        }
        if dx < -t {
            return Ok(Outcome::Left);
        }
        return Ok(Outcome::None);
    }

    let v = thresholds.vertical();
    if dy < -v {
        Ok(Outcome::Up)
    } else if dy > v {
        Ok(Outcome::Down)
    } else {
        Ok(Outcome::None)
    }
}
