// CLI module for argument parsing and configuration

use crate::config::DeckConfig;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Swipedeck - swipe through prediction markets in your terminal
///
/// Drag a card right for YES, left for NO, up to skip and down to go back.
#[derive(Parser, Debug, Clone)]
#[command(name = "swipedeck")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON file with the items to swipe through
    ///
    /// If not specified, a built-in sample deck is used.
    #[arg(short = 'i', long = "items")]
    pub items: Option<PathBuf>,

    /// Stake attached to every YES/NO swipe
    #[arg(short = 's', long = "stake")]
    pub stake: Option<u64>,

    /// Number of swipes between checkout prompts
    #[arg(short = 'c', long = "checkout-every")]
    pub checkout_every: Option<u64>,

    /// Exit animation length in milliseconds
    #[arg(long = "exit-ms")]
    pub exit_ms: Option<u64>,

    /// Share of the card area width a drag must cross to commit (e.g. 0.25)
    #[arg(short = 't', long = "threshold")]
    pub threshold: Option<f64>,

    /// Write logs to this file (the terminal is reserved for the UI)
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,

    /// Log filter, e.g. "info" or "swipedeck=debug"
    #[arg(long = "log-level", default_value = "info")]
    pub log_level: String,

    /// Show the welcome screen even if it was already seen
    #[arg(long = "welcome", action = ArgAction::SetTrue)]
    pub show_welcome: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Validate the arguments and return any errors
    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref path) = self.items {
            if !path.is_file() {
                return Err(format!("Items file does not exist: {}", path.display()));
            }
        }

        if self.checkout_every == Some(0) {
            return Err("checkout-every must be at least 1".to_string());
        }

        if let Some(threshold) = self.threshold {
            if !threshold.is_finite() || threshold <= 0.0 || threshold >= 1.0 {
                return Err(format!(
                    "threshold must be between 0 and 1 (exclusive), got {}",
                    threshold
                ));
            }
        }

        Ok(())
    }
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub items: Option<PathBuf>,
    pub stake: Option<u64>,
    pub checkout_every: Option<u64>,
    pub exit_ms: Option<u64>,
    pub threshold: Option<f64>,
    pub log_file: Option<PathBuf>,
    pub log_level: String,
    pub show_welcome: bool,
}

impl AppConfig {
    /// Layers the command line overrides on top of the stored config
    pub fn apply(&self, mut deck: DeckConfig) -> DeckConfig {
        if let Some(stake) = self.stake {
            deck.default_stake = stake;
        }
        if let Some(every) = self.checkout_every {
            deck.cards_before_checkout = every;
        }
        if let Some(exit_ms) = self.exit_ms {
            deck.exit_duration_ms = exit_ms;
        }
        if let Some(threshold) = self.threshold {
            deck.threshold_ratio = threshold;
        }
        deck
    }
}

impl From<Args> for AppConfig {
    fn from(args: Args) -> Self {
        AppConfig {
            items: args.items,
            stake: args.stake,
            checkout_every: args.checkout_every,
            exit_ms: args.exit_ms,
            threshold: args.threshold,
            log_file: args.log_file,
            log_level: args.log_level,
            show_welcome: args.show_welcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["swipedeck"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    mod args_tests {
        use super::*;

        #[test]
        fn test_args_default_values() {
            let args = args(&[]);
            assert!(args.items.is_none());
            assert!(args.stake.is_none());
            assert_eq!(args.log_level, "info");
            assert!(!args.show_welcome);
            assert!(args.validate().is_ok());
        }

        #[test]
        fn test_args_overrides() {
            let args = args(&["--stake", "25", "-c", "5", "--exit-ms", "400", "-t", "0.3", "--welcome"]);
            assert_eq!(args.stake, Some(25));
            assert_eq!(args.checkout_every, Some(5));
            assert_eq!(args.exit_ms, Some(400));
            assert_eq!(args.threshold, Some(0.3));
            assert!(args.show_welcome);
        }

        #[test]
        fn test_validate_rejects_zero_checkout() {
            assert!(args(&["-c", "0"]).validate().is_err());
        }

        #[test]
        fn test_validate_rejects_bad_threshold() {
            assert!(args(&["-t", "1.5"]).validate().is_err());
            assert!(args(&["-t", "0"]).validate().is_err());
        }

        #[test]
        fn test_validate_rejects_missing_items_file() {
            let err = args(&["--items", "/nonexistent/items.json"]).validate().unwrap_err();
            assert!(err.contains("does not exist"));
        }

        #[test]
        fn test_invalid_stake_fails_to_parse() {
            assert!(Args::try_parse_from(["swipedeck", "--stake", "lots"]).is_err());
        }
    }

    mod app_config_tests {
        use super::*;

        #[test]
        fn test_apply_overrides_deck_config() {
            let config: AppConfig = args(&["--stake", "25", "-c", "5"]).into();
            let deck = config.apply(DeckConfig::default());
            assert_eq!(deck.default_stake, 25);
            assert_eq!(deck.cards_before_checkout, 5);
            assert_eq!(deck.exit_duration_ms, 250);
        }

        #[test]
        fn test_apply_without_overrides_keeps_file_values() {
            let config: AppConfig = args(&[]).into();
            let stored = DeckConfig {
                default_stake: 42,
                ..DeckConfig::default()
            };
            assert_eq!(config.apply(stored.clone()), stored);
        }
    }
}
