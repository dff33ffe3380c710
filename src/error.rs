//! Error types for the swipe deck engine

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SwipeError {
    /// A gesture produced an offset that cannot be classified.
    /// This always points at a bug upstream in gesture tracking.
    #[error("non-finite gesture offset ({dx}, {dy})")]
    NonFiniteOffset { dx: f64, dy: f64 },

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("could not load items: {0}")]
    ItemSource(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SwipeError>;
