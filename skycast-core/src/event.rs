//! Terminal events as seen by components

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};

/// The event payload handed to components
#[derive(Debug, Clone)]
pub enum EventKind {
    /// Keyboard event
    Key(KeyEvent),
    /// Mouse event
    Mouse(MouseEvent),
    /// Terminal resize
    Resize(u16, u16),
}

impl EventKind {
    /// Ctrl+C, handled the same way on every screen
    pub fn is_interrupt(&self) -> bool {
        matches!(
            self,
            EventKind::Key(key)
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && matches!(key.code, KeyCode::Char('c'))
        )
    }

    pub fn as_key(&self) -> Option<&KeyEvent> {
        match self {
            EventKind::Key(key) => Some(key),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::key;

    #[test]
    fn test_interrupt_detection() {
        assert!(EventKind::Key(key("ctrl+c")).is_interrupt());
        assert!(!EventKind::Key(key("c")).is_interrupt());
        assert!(!EventKind::Resize(80, 24).is_interrupt());
    }
}
