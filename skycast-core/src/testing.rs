//! Test utilities
//!
//! - [`key`]: build a `KeyEvent` from a string such as `"ctrl+t"`
//! - [`RenderHarness`]: render into a `TestBackend` and read the buffer back
//! - [`ActionAssertions`], [`assert_emitted!`] and [`assert_not_emitted!`]:
//!   assertions on actions returned by components
//!
//! ```ignore
//! let actions = search_bar.handle_event(&EventKind::Key(key("enter")), props);
//! actions.assert_first(Action::WeatherSubmit);
//! assert_emitted!(actions, Action::WeatherSubmit);
//!
//! let mut render = RenderHarness::new(60, 24);
//! let output = render.render_to_string_plain(|frame| screen.render(frame, frame.area(), props));
//! assert!(output.contains("Humidity: 80%"));
//! ```

use std::fmt::Debug;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;

#[cfg(feature = "testing-time")]
pub use tokio::time::{advance as advance_time, pause as pause_time, resume as resume_time};

/// Parse a key description like `"q"`, `"enter"` or `"ctrl+t"`.
pub fn parse_key(key_str: &str) -> Option<KeyEvent> {
    let key_str = key_str.trim();
    if key_str.is_empty() {
        return None;
    }

    let mut parts: Vec<&str> = key_str.split('+').collect();
    // A literal "+" key
    if key_str.ends_with("++") || key_str == "+" {
        parts.retain(|p| !p.is_empty());
        parts.push("+");
    }
    let key_part = parts.pop()?;

    let mut modifiers = KeyModifiers::empty();
    for part in parts {
        match part.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => return None,
        }
    }

    let code = match key_part.to_ascii_lowercase().as_str() {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "space" => KeyCode::Char(' '),
        _ => {
            let mut chars = key_part.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(c)
        }
    };

    Some(KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    })
}

/// Like [`parse_key`], but panics on an invalid description.
pub fn key(s: &str) -> KeyEvent {
    parse_key(s).unwrap_or_else(|| panic!("Invalid key string: {:?}", s))
}

/// A `KeyEvent` for a character with no modifiers.
pub fn char_key(c: char) -> KeyEvent {
    KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::empty(),
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Key events for every character of `text`, for simulating typing.
pub fn typed(text: &str) -> Vec<KeyEvent> {
    text.chars().map(char_key).collect()
}

/// Renders into an in-memory terminal.
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    pub fn new(width: u16, height: u16) -> Self {
        let terminal = Terminal::new(TestBackend::new(width, height))
            .unwrap_or_else(|e| panic!("test terminal: {e}"));
        Self { terminal }
    }

    /// Render and return a copy of the resulting buffer.
    pub fn render(&mut self, draw: impl FnOnce(&mut Frame)) -> Buffer {
        self.terminal
            .draw(draw)
            .unwrap_or_else(|e| panic!("draw failed: {e}"));
        self.terminal.backend().buffer().clone()
    }

    /// Render and return the buffer as plain text, one line per row.
    pub fn render_to_string_plain(&mut self, draw: impl FnOnce(&mut Frame)) -> String {
        buffer_to_string_plain(&self.render(draw))
    }
}

/// Buffer contents as plain text, trailing spaces trimmed per row.
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.y..area.y + area.height {
        let mut line = String::new();
        for x in area.x..area.x + area.width {
            line.push_str(buffer[(x, y)].symbol());
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Assertions on a list of emitted actions.
pub trait ActionAssertions<A> {
    fn assert_empty(&self);
    fn assert_count(&self, count: usize);
    fn assert_first(&self, expected: A);
}

impl<A, I> ActionAssertions<A> for I
where
    A: Debug + PartialEq,
    I: IntoIterator<Item = A> + Clone,
{
    fn assert_empty(&self) {
        let actions: Vec<A> = self.clone().into_iter().collect();
        assert!(actions.is_empty(), "expected no actions, got {:?}", actions);
    }

    fn assert_count(&self, count: usize) {
        let actions: Vec<A> = self.clone().into_iter().collect();
        assert_eq!(
            actions.len(),
            count,
            "expected {} actions, got {:?}",
            count,
            actions
        );
    }

    fn assert_first(&self, expected: A) {
        let actions: Vec<A> = self.clone().into_iter().collect();
        assert_eq!(
            actions.first(),
            Some(&expected),
            "unexpected first action in {:?}",
            actions
        );
    }
}

/// Assert that an action matching a pattern was emitted.
#[macro_export]
macro_rules! assert_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` to be emitted, but got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Assert that no action matching a pattern was emitted.
#[macro_export]
macro_rules! assert_not_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` NOT to be emitted, but it was: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}
