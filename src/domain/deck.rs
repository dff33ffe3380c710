use super::{Decision, Item, Outcome, Position};

/// What the deck emits when an exit animation commits
#[derive(Debug, Clone, PartialEq)]
pub enum DeckEvent {
    Decision(Decision),
    Skip { item_id: String },
    Nothing,
}

/// Depth cue for an inert card drawn under the active one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placeholder {
    pub scale: f64,
    pub translate_y: f64,
}

/// Ordered items with a wrapping cursor.
///
/// Both directions cycle through the deck indefinitely.
#[derive(Debug, Clone)]
pub struct Deck {
    items: Vec<Item>,
    current_index: usize,
    lookahead: usize,
}

impl Deck {
    pub fn new(items: Vec<Item>, lookahead: usize) -> Self {
        Self {
            items,
            current_index: 0,
            lookahead,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current(&self) -> Option<&Item> {
        self.items.get(self.current_index)
    }

    pub fn advance(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.current_index = (self.current_index + 1) % self.items.len();
    }

    pub fn retreat(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let len = self.items.len();
        self.current_index = (self.current_index + len - 1) % len;
    }

    /// Applies a committed outcome. `stake` is attached to YES/NO decisions.
    ///
    /// `Down` is not a commit and never reaches here through the exit path;
    /// it is accepted as a plain retreat so callers cannot desync the cursor.
    pub fn on_outcome(&mut self, outcome: Outcome, stake: u64) -> DeckEvent {
        let item_id = match self.current() {
            Some(item) => item.id.clone(),
            None => return DeckEvent::Nothing,
        };

        let event = match outcome {
            Outcome::Right => DeckEvent::Decision(Decision {
                item_id,
                position: Position::Yes,
                amount: stake,
            }),
            Outcome::Left => DeckEvent::Decision(Decision {
                item_id,
                position: Position::No,
                amount: stake,
            }),
            Outcome::Up => DeckEvent::Skip { item_id },
            Outcome::Down => {
                self.retreat();
                return DeckEvent::Nothing;
            }
            Outcome::None => return DeckEvent::Nothing,
        };

        self.advance();
        event
    }

    /// Items queued behind the current card, never repeating it
    pub fn upcoming(&self) -> Vec<&Item> {
        let len = self.items.len();
        let count = self.lookahead.min(len.saturating_sub(1));
        (1..=count)
            .map(|step| &self.items[(self.current_index + step) % len])
            .collect()
    }

    pub fn placeholders(&self, scale_step: f64, offset_step: f64) -> Vec<Placeholder> {
        (1..=self.upcoming().len())
            .map(|depth| Placeholder {
                scale: 1.0 - scale_step * depth as f64,
                translate_y: offset_step * depth as f64,
            })
            .collect()
    }
}
