//! Logging configuration and initialization.

use crate::error::Result;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{fmt, EnvFilter};

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// Destination file. Logging stays off without one, because the
    /// terminal belongs to the UI.
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    pub fn init(&self) -> Result<()> {
        let path = match &self.file {
            Some(path) => path,
            None => return Ok(()),
        };

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_without_file_is_noop() {
        assert!(LoggingConfig::default().init().is_ok());
    }

    #[test]
    fn test_unwritable_file_is_an_error() {
        let config = LoggingConfig {
            level: "debug".into(),
            file: Some(PathBuf::from("/nonexistent/dir/swipedeck.log")),
        };
        assert!(config.init().is_err());
    }
}
