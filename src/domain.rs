pub mod card;
pub mod classifier;
pub mod deck;
pub mod dispatcher;
pub mod gesture;

pub use card::{CardMachine, CardState, Resolution};
pub use classifier::{classify, Surface, Thresholds};
pub use deck::{Deck, DeckEvent, Placeholder};
pub use dispatcher::{Cart, CheckoutTrigger, DecisionSink, Dispatcher};
pub use gesture::{CardTransform, GestureSample, GestureTracker};

use crate::error::{Result, SwipeError};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A single prediction-market question shown on a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub title: String,
    pub category: String,
    /// Implied probability of YES, in percent
    pub yes_price: i64,
    /// Implied probability of NO, in percent
    pub no_price: i64,
    pub ends_at: DateTime<Utc>,
}

impl Item {
    pub fn new(id: &str, title: &str, category: &str, yes_price: i64, ends_at: DateTime<Utc>) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            category: category.to_string(),
            yes_price,
            no_price: 100 - yes_price,
            ends_at,
        }
    }

    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        self.ends_at > now
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Yes,
    No,
}

/// A committed YES/NO pick waiting in the cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub item_id: String,
    pub position: Position,
    pub amount: u64,
}

/// Result of classifying a finished drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Commit YES
    Right,
    /// Commit NO
    Left,
    /// Skip without a decision
    Up,
    /// Go back to the previous card
    Down,
    /// Snap back, nothing happens
    None,
}

impl Outcome {
    /// The position a committed outcome records, if any
    pub fn position(self) -> Option<Position> {
        match self {
            Outcome::Right => Some(Position::Yes),
            Outcome::Left => Some(Position::No),
            Outcome::Up | Outcome::Down | Outcome::None => None,
        }
    }

    /// Whether this outcome flies the card off and counts as a commit
    pub fn commits(self) -> bool {
        matches!(self, Outcome::Right | Outcome::Left | Outcome::Up)
    }
}

/// Statistics about the swipes made during the session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub total_items: usize,
    pub yes: usize,
    pub no: usize,
    pub skipped: usize,
    pub swipes: u64,
}

/// Loads a deck from a JSON array of items.
///
/// Duplicate ids are rejected because decisions refer to items by id.
pub fn load_items(path: &Path) -> Result<Vec<Item>> {
    let contents = fs::read_to_string(path)
        .map_err(|e| SwipeError::ItemSource(format!("Failed to read {}: {}", path.display(), e)))?;
    parse_items(&contents)
}

pub fn parse_items(contents: &str) -> Result<Vec<Item>> {
    let items: Vec<Item> = serde_json::from_str(contents)
        .map_err(|e| SwipeError::ItemSource(format!("Failed to parse items: {}", e)))?;

    let mut seen = std::collections::HashSet::new();
    for item in &items {
        if !seen.insert(item.id.as_str()) {
            return Err(SwipeError::ItemSource(format!("Duplicate item id: {}", item.id)));
        }
    }

    Ok(items)
}

/// Built-in deck used when no item file is given
pub fn sample_items() -> Vec<Item> {
    let now = Utc::now();
    vec![
        Item::new("btc-100k", "Will Bitcoin close above $100k this month?", "Crypto", 62, now + Duration::days(21)),
        Item::new("fed-cut", "Will the Fed cut rates at the next meeting?", "Economy", 41, now + Duration::days(35)),
        Item::new("finals-g7", "Will the finals go to game 7?", "Sports", 28, now + Duration::days(12)),
        Item::new("heatwave", "Will July set a new global temperature record?", "Climate", 55, now + Duration::days(60)),
        Item::new("box-office", "Will the summer blockbuster gross $1B worldwide?", "Culture", 37, now + Duration::days(90)),
        Item::new("launch", "Will the next crewed launch lift off on schedule?", "Science", 71, now + Duration::days(8)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    mod outcome_tests {
        use super::*;

        #[test]
        fn test_outcome_position() {
            assert_eq!(Outcome::Right.position(), Some(Position::Yes));
            assert_eq!(Outcome::Left.position(), Some(Position::No));
            assert_eq!(Outcome::Up.position(), None);
            assert_eq!(Outcome::Down.position(), None);
            assert_eq!(Outcome::None.position(), None);
        }

        #[test]
        fn test_outcome_commits() {
            assert!(Outcome::Right.commits());
            assert!(Outcome::Left.commits());
            assert!(Outcome::Up.commits());
            assert!(!Outcome::Down.commits());
            assert!(!Outcome::None.commits());
        }
    }

    mod item_tests {
        use super::*;
        use std::io::Write;
        use tempfile::NamedTempFile;

        const ITEMS_JSON: &str = r#"[
            {"id": "a", "title": "A?", "category": "Misc", "yes_price": 60, "no_price": 40, "ends_at": "2030-01-01T00:00:00Z"},
            {"id": "b", "title": "B?", "category": "Misc", "yes_price": 10, "no_price": 95, "ends_at": "2030-06-01T12:00:00Z"}
        ]"#;

        #[test]
        fn test_item_new_complements_price() {
            let item = Item::new("x", "X?", "Misc", 62, Utc::now());
            assert_eq!(item.no_price, 38);
        }

        #[test]
        fn test_parse_items() {
            let items = parse_items(ITEMS_JSON).unwrap();
            assert_eq!(items.len(), 2);
            assert_eq!(items[0].id, "a");
            // Prices are not forced to sum to 100
            assert_eq!(items[1].yes_price + items[1].no_price, 105);
        }

        #[test]
        fn test_parse_items_rejects_duplicates() {
            let json = r#"[
                {"id": "a", "title": "A?", "category": "Misc", "yes_price": 60, "no_price": 40, "ends_at": "2030-01-01T00:00:00Z"},
                {"id": "a", "title": "A again?", "category": "Misc", "yes_price": 50, "no_price": 50, "ends_at": "2030-01-01T00:00:00Z"}
            ]"#;
            let err = parse_items(json).unwrap_err();
            assert!(err.to_string().contains("Duplicate item id"));
        }

        #[test]
        fn test_parse_items_invalid_json() {
            assert!(matches!(parse_items("not json"), Err(SwipeError::ItemSource(_))));
        }

        #[test]
        fn test_load_items_from_file() {
            let mut file = NamedTempFile::new().unwrap();
            file.write_all(ITEMS_JSON.as_bytes()).unwrap();

            let items = load_items(file.path()).unwrap();
            assert_eq!(items.len(), 2);
        }

        #[test]
        fn test_load_items_missing_file() {
            let result = load_items(Path::new("/nonexistent/items.json"));
            assert!(matches!(result, Err(SwipeError::ItemSource(_))));
        }

        #[test]
        fn test_is_open_at() {
            let now = Utc::now();
            let item = Item::new("x", "X?", "Misc", 50, now + Duration::hours(1));
            assert!(item.is_open_at(now));
            assert!(!item.is_open_at(now + Duration::hours(2)));
        }

        #[test]
        fn test_sample_items_unique_ids() {
            let items = sample_items();
            let json = serde_json::to_string(&items).unwrap();
            assert_eq!(parse_items(&json).unwrap().len(), items.len());
        }
    }
}
