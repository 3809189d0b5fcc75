//! City search input with cursor

use std::collections::VecDeque;

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use skycast_core::EventKind;

use super::Component;
use crate::action::Action;
use crate::theme::Palette;

pub const PLACEHOLDER: &str = "Enter city name...";
const SEARCH_LABEL: &str = " Search ";

pub struct SearchBarProps<'a> {
    pub value: &'a str,
    pub is_focused: bool,
    pub palette: Palette,
}

/// Single-line input bound to `city_input`.
///
/// Emits `CityInputChange` for every edit and `WeatherSubmit` on Enter.
///
/// Edits are applied on top of values already emitted but not yet seen in
/// props, so keys mapped before the previous edit is dispatched still
/// compose.
#[derive(Default)]
pub struct SearchBar {
    /// Byte index into the working value, always on a char boundary
    cursor: usize,
    /// Last value seen in props
    confirmed: String,
    /// Emitted values props have not caught up with, oldest first
    unconfirmed: VecDeque<String>,
}

impl SearchBar {
    pub const HEIGHT: u16 = 3;

    pub fn new() -> Self {
        Self::default()
    }

    /// Forget in-progress edits and put the cursor at the start.
    pub fn clear(&mut self) {
        self.cursor = 0;
        self.confirmed.clear();
        self.unconfirmed.clear();
    }

    /// Value the next edit applies to.
    fn working_value(&self) -> &str {
        self.unconfirmed
            .back()
            .map_or(self.confirmed.as_str(), String::as_str)
    }

    /// Reconcile with props. A value we emitted confirms it and everything
    /// before it; any other new value was replaced from outside (reset,
    /// start city) and moves the cursor to the end.
    fn sync(&mut self, value: &str) {
        if let Some(pos) = self.unconfirmed.iter().position(|v| v == value) {
            self.unconfirmed.drain(..=pos);
            self.confirmed = value.to_string();
        } else if value != self.confirmed {
            self.unconfirmed.clear();
            self.confirmed = value.to_string();
            self.cursor = value.len();
        }

        let working = self.working_value();
        let mut cursor = self.cursor.min(working.len());
        while !working.is_char_boundary(cursor) {
            cursor -= 1;
        }
        self.cursor = cursor;
    }

    fn emit(&mut self, value: String) -> Option<Action> {
        self.unconfirmed.push_back(value.clone());
        Some(Action::CityInputChange(value))
    }

    fn move_left(&mut self, value: &str) {
        if let Some((i, _)) = value[..self.cursor].char_indices().next_back() {
            self.cursor = i;
        }
    }

    fn move_right(&mut self, value: &str) {
        if let Some(c) = value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    fn insert_char(&mut self, value: &str, c: char) -> String {
        let mut new_value = String::with_capacity(value.len() + c.len_utf8());
        new_value.push_str(&value[..self.cursor]);
        new_value.push(c);
        new_value.push_str(&value[self.cursor..]);
        self.cursor += c.len_utf8();
        new_value
    }

    fn delete_before(&mut self, value: &str) -> Option<String> {
        let (start, _) = value[..self.cursor].char_indices().next_back()?;
        let new_value = format!("{}{}", &value[..start], &value[self.cursor..]);
        self.cursor = start;
        Some(new_value)
    }

    fn delete_at(&self, value: &str) -> Option<String> {
        let c = value[self.cursor..].chars().next()?;
        Some(format!(
            "{}{}",
            &value[..self.cursor],
            &value[self.cursor + c.len_utf8()..]
        ))
    }
}

impl Component<Action> for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

    fn handle_event(&mut self, event: &EventKind, props: Self::Props<'_>) -> Option<Action> {
        if !props.is_focused {
            return None;
        }
        let EventKind::Key(key) = event else {
            return None;
        };
        self.sync(props.value);
        let working = self.working_value().to_string();
        let value = working.as_str();

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('a') => {
                    self.cursor = 0;
                    None
                }
                KeyCode::Char('e') => {
                    self.cursor = value.len();
                    None
                }
                KeyCode::Char('u') => {
                    self.cursor = 0;
                    self.emit(String::new())
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(c) => {
                let new_value = self.insert_char(value, c);
                self.emit(new_value)
            }
            KeyCode::Backspace => {
                let new_value = self.delete_before(value)?;
                self.emit(new_value)
            }
            KeyCode::Delete => {
                let new_value = self.delete_at(value)?;
                self.emit(new_value)
            }
            KeyCode::Left => {
                self.move_left(value);
                None
            }
            KeyCode::Right => {
                self.move_right(value);
                None
            }
            KeyCode::Home => {
                self.cursor = 0;
                None
            }
            KeyCode::End => {
                self.cursor = value.len();
                None
            }
            KeyCode::Enter => Some(Action::WeatherSubmit),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.sync(props.value);
        let palette = props.palette;

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if props.is_focused {
                palette.accent
            } else {
                palette.border
            }))
            .style(Style::default().bg(palette.surface));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [text_area, button_area] = Layout::horizontal([
            Constraint::Min(1),
            Constraint::Length(SEARCH_LABEL.len() as u16),
        ])
        .areas(inner);

        let text = if props.value.is_empty() {
            Span::styled(PLACEHOLDER, Style::default().fg(palette.text_muted))
        } else {
            Span::styled(props.value, Style::default().fg(palette.text))
        };
        frame.render_widget(Paragraph::new(Line::from(text)), text_area);

        let button = Span::styled(
            SEARCH_LABEL,
            Style::default().fg(palette.surface).bg(palette.accent).bold(),
        );
        frame.render_widget(Paragraph::new(Line::from(button)), button_area);

        if props.is_focused {
            let typed = self.working_value()[..self.cursor].chars().count();
            let column = typed.min(props.value.chars().count()) as u16;
            if column < text_area.width {
                frame.set_cursor_position((text_area.x + column, text_area.y));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skycast_core::testing::*;
    use skycast_core::{assert_emitted, assert_not_emitted};

    fn props(value: &str) -> SearchBarProps<'_> {
        SearchBarProps {
            value,
            is_focused: true,
            palette: Palette::LIGHT,
        }
    }

    fn press(bar: &mut SearchBar, value: &str, k: &str) -> Option<Action> {
        bar.handle_event(&EventKind::Key(key(k)), props(value))
    }

    #[test]
    fn test_typing_appends_at_end() {
        let mut bar = SearchBar::new();

        assert_eq!(
            press(&mut bar, "", "L"),
            Some(Action::CityInputChange("L".into()))
        );
        assert_eq!(
            press(&mut bar, "L", "o"),
            Some(Action::CityInputChange("Lo".into()))
        );
    }

    #[test]
    fn test_external_value_moves_cursor_to_end() {
        let mut bar = SearchBar::new();

        let actions = press(&mut bar, "Lisbo", "n");
        actions.assert_first(Action::CityInputChange("Lisbon".into()));
    }

    #[test]
    fn test_keys_ahead_of_props_compose() {
        let mut bar = SearchBar::new();

        press(&mut bar, "", "a").assert_first(Action::CityInputChange("a".into()));
        // First edit not dispatched yet
        press(&mut bar, "", "b").assert_first(Action::CityInputChange("ab".into()));
        press(&mut bar, "a", "c").assert_first(Action::CityInputChange("abc".into()));
        press(&mut bar, "abc", "backspace").assert_first(Action::CityInputChange("ab".into()));
    }

    #[test]
    fn test_outside_value_replaces_pending_edits() {
        let mut bar = SearchBar::new();

        press(&mut bar, "", "a");
        let actions = press(&mut bar, "Paris", "!");
        assert_emitted!(actions, Action::CityInputChange(text) if text == "Paris!");
        assert_not_emitted!(actions, Action::CityInputChange(text) if text.starts_with('a'));
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut bar = SearchBar::new();

        assert_eq!(
            press(&mut bar, "Köln", "backspace"),
            Some(Action::CityInputChange("Köl".into()))
        );

        press(&mut bar, "Köl", "home");
        press(&mut bar, "Köl", "right");
        assert_eq!(
            press(&mut bar, "Köl", "delete"),
            Some(Action::CityInputChange("Kl".into()))
        );
    }

    #[test]
    fn test_backspace_on_empty_is_ignored() {
        let mut bar = SearchBar::new();
        press(&mut bar, "", "backspace").assert_empty();
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut bar = SearchBar::new();
        assert_eq!(
            press(&mut bar, "Paris", "ctrl+u"),
            Some(Action::CityInputChange(String::new()))
        );
    }

    #[test]
    fn test_enter_submits() {
        let mut bar = SearchBar::new();
        press(&mut bar, "Paris", "enter").assert_first(Action::WeatherSubmit);
    }

    #[test]
    fn test_unfocused_ignores() {
        let mut bar = SearchBar::new();
        let actions = bar.handle_event(
            &EventKind::Key(key("a")),
            SearchBarProps {
                value: "",
                is_focused: false,
                palette: Palette::LIGHT,
            },
        );
        actions.assert_empty();
    }

    #[test]
    fn test_render_placeholder_and_value() {
        let mut render = RenderHarness::new(40, 3);
        let mut bar = SearchBar::new();

        let output = render.render_to_string_plain(|frame| {
            bar.render(frame, frame.area(), props(""));
        });
        assert!(output.contains(PLACEHOLDER));
        assert!(output.contains("Search"));

        let output = render.render_to_string_plain(|frame| {
            bar.render(frame, frame.area(), props("Tokyo"));
        });
        assert!(output.contains("Tokyo"));
        assert!(!output.contains(PLACEHOLDER));
    }
}
