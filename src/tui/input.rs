use crate::domain::Outcome;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Represents the result of handling a key event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Quit the application
    Quit,
    /// Swipe the top card in a direction
    Swipe(Outcome),
    /// Toggle help overlay
    Help,
    /// Check out the cart
    ConfirmCheckout,
    /// Close the checkout prompt and keep swiping
    DismissCheckout,
    /// No action
    None,
}

/// Pointer input translated into terminal cell coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Press { column: u16, row: u16 },
    Drag { column: u16, row: u16 },
    Release,
    None,
}

/// Maps keyboard events to actions
pub fn handle_key_event(key: KeyEvent) -> KeyAction {
    match (key.code, key.modifiers) {
        // Quit: q or Ctrl+C
        (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::Quit,
        (KeyCode::Esc, KeyModifiers::NONE) => KeyAction::Quit,

        // YES: Right arrow or y
        (KeyCode::Right, KeyModifiers::NONE) => KeyAction::Swipe(Outcome::Right),
        (KeyCode::Char('y'), KeyModifiers::NONE) => KeyAction::Swipe(Outcome::Right),

        // NO: Left arrow or n
        (KeyCode::Left, KeyModifiers::NONE) => KeyAction::Swipe(Outcome::Left),
        (KeyCode::Char('n'), KeyModifiers::NONE) => KeyAction::Swipe(Outcome::Left),

        // Skip and previous
        (KeyCode::Up, KeyModifiers::NONE) => KeyAction::Swipe(Outcome::Up),
        (KeyCode::Char('s'), KeyModifiers::NONE) => KeyAction::Swipe(Outcome::Up),
        (KeyCode::Down, KeyModifiers::NONE) => KeyAction::Swipe(Outcome::Down),
        (KeyCode::Char('b'), KeyModifiers::NONE) => KeyAction::Swipe(Outcome::Down),

        // Help: ?
        (KeyCode::Char('?'), KeyModifiers::NONE) => KeyAction::Help,
        (KeyCode::Char('?'), KeyModifiers::SHIFT) => KeyAction::Help,

        _ => KeyAction::None,
    }
}

/// Maps keyboard events while the checkout prompt is open
pub fn handle_checkout_input(key: KeyEvent) -> KeyAction {
    match (key.code, key.modifiers) {
        (KeyCode::Enter, KeyModifiers::NONE) => KeyAction::ConfirmCheckout,
        (KeyCode::Char('y'), KeyModifiers::NONE) => KeyAction::ConfirmCheckout,

        (KeyCode::Esc, KeyModifiers::NONE) => KeyAction::DismissCheckout,
        (KeyCode::Char('n'), KeyModifiers::NONE) => KeyAction::DismissCheckout,

        _ => KeyAction::None,
    }
}

/// Maps mouse events; only the left button drives gestures
pub fn handle_mouse_event(mouse: MouseEvent) -> PointerAction {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => PointerAction::Press {
            column: mouse.column,
            row: mouse.row,
        },
        MouseEventKind::Drag(MouseButton::Left) => PointerAction::Drag {
            column: mouse.column,
            row: mouse.row,
        },
        MouseEventKind::Up(MouseButton::Left) => PointerAction::Release,
        _ => PointerAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_key_quit() {
        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key), KeyAction::Quit);

        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(key), KeyAction::Quit);
    }

    #[test]
    fn test_key_swipes() {
        let cases = [
            (KeyCode::Right, Outcome::Right),
            (KeyCode::Char('y'), Outcome::Right),
            (KeyCode::Left, Outcome::Left),
            (KeyCode::Char('n'), Outcome::Left),
            (KeyCode::Up, Outcome::Up),
            (KeyCode::Down, Outcome::Down),
        ];
        for (code, outcome) in cases {
            let key = KeyEvent::new(code, KeyModifiers::NONE);
            assert_eq!(handle_key_event(key), KeyAction::Swipe(outcome));
        }
    }

    #[test]
    fn test_key_unknown() {
        let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(key), KeyAction::None);
    }

    #[test]
    fn test_checkout_input() {
        let key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(handle_checkout_input(key), KeyAction::ConfirmCheckout);

        let key = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(handle_checkout_input(key), KeyAction::DismissCheckout);

        let key = KeyEvent::new(KeyCode::Right, KeyModifiers::NONE);
        assert_eq!(handle_checkout_input(key), KeyAction::None);
    }

    #[test]
    fn test_mouse_gestures() {
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 3, 4)),
            PointerAction::Press { column: 3, row: 4 }
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), 9, 4)),
            PointerAction::Drag { column: 9, row: 4 }
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 9, 4)),
            PointerAction::Release
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Right), 1, 1)),
            PointerAction::None
        );
    }
}
