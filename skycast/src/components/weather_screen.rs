//! Weather screen: search, status, current conditions and forecast

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use skycast_core::EventKind;

use super::{
    Component, Conditions, ConditionsProps, ForecastGrid, ForecastGridProps, HelpBar,
    HelpBarProps, SearchBar, SearchBarProps,
};
use crate::action::Action;
use crate::state::QueryState;
use crate::theme::Palette;

pub const TITLE: &str = "Sunny, Cloudy?";
const MAX_WIDTH: u16 = 72;

pub struct WeatherScreenProps<'a> {
    pub query: &'a QueryState,
    pub theme_dark: bool,
    pub tick_count: u32,
}

#[derive(Default)]
pub struct WeatherScreen {
    search: SearchBar,
}

impl WeatherScreen {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for WeatherScreen {
    type Props<'a> = WeatherScreenProps<'a>;

    fn handle_event(&mut self, event: &EventKind, props: Self::Props<'_>) -> Option<Action> {
        if let EventKind::Key(key) = event {
            if key.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(key.code, KeyCode::Char('t') | KeyCode::Char('T'))
            {
                return Some(Action::UiToggleTheme);
            }
            if key.code == KeyCode::Esc {
                self.search.clear();
                return Some(Action::NavigateBack);
            }
        }

        self.search.handle_event(
            event,
            SearchBarProps {
                value: &props.query.city_input,
                is_focused: true,
                palette: Palette::for_mode(props.theme_dark),
            },
        )
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let palette = Palette::for_mode(props.theme_dark);
        frame.render_widget(
            Block::default().style(Style::default().bg(palette.background)),
            area,
        );

        let [column] = Layout::horizontal([Constraint::Max(MAX_WIDTH)])
            .flex(Flex::Center)
            .areas(area);
        let [body, help] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(column);

        let conditions = ConditionsProps {
            status: &props.query.status,
            result: props.query.result.as_ref(),
            tick_count: props.tick_count,
            palette,
        };
        let days = props
            .query
            .result
            .as_ref()
            .map(|r| r.forecast_days.as_slice())
            .unwrap_or_default();

        let [header, title, _, search, _, status, _, grid] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(SearchBar::HEIGHT),
            Constraint::Length(1),
            Constraint::Length(Conditions::height(&conditions)),
            Constraint::Length(1),
            Constraint::Length(ForecastGrid::height(days.len())),
        ])
        .areas(body);

        let back = Line::from(vec![
            Span::styled(" ← ", Style::default().fg(palette.surface).bg(palette.text)),
            Span::styled(" Back (esc)", Style::default().fg(palette.text_muted)),
        ]);
        frame.render_widget(Paragraph::new(back), header);
        let toggle = Line::from(vec![
            Span::styled("ctrl+t ", Style::default().fg(palette.text_muted)),
            Span::styled(
                format!(" {} ", Palette::toggle_icon(props.theme_dark)),
                Style::default().fg(palette.surface).bg(palette.text),
            ),
        ])
        .right_aligned();
        frame.render_widget(Paragraph::new(toggle), header);

        frame.render_widget(
            Paragraph::new(Line::from(TITLE).style(Style::default().fg(palette.text).bold()))
                .centered(),
            title,
        );

        self.search.render(
            frame,
            search,
            SearchBarProps {
                value: &props.query.city_input,
                is_focused: true,
                palette,
            },
        );

        Conditions.render(frame, status, conditions);
        ForecastGrid.render(frame, grid, ForecastGridProps { days, palette });
        HelpBar.render(frame, help, HelpBarProps { palette });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Status, WeatherResult};
    use skycast_core::testing::*;
    use skycast_core::{assert_emitted, assert_not_emitted};

    fn props(query: &QueryState) -> WeatherScreenProps<'_> {
        WeatherScreenProps {
            query,
            theme_dark: false,
            tick_count: 0,
        }
    }

    #[test]
    fn test_shortcuts() {
        let mut screen = WeatherScreen::new();
        let query = QueryState::default();

        screen
            .handle_event(&EventKind::Key(key("ctrl+t")), props(&query))
            .assert_first(Action::UiToggleTheme);
        screen
            .handle_event(&EventKind::Key(key("esc")), props(&query))
            .assert_first(Action::NavigateBack);
    }

    #[test]
    fn test_typing_goes_to_search() {
        let mut screen = WeatherScreen::new();
        let query = QueryState {
            city_input: "Rom".into(),
            ..Default::default()
        };

        let actions = screen.handle_event(&EventKind::Key(key("e")), props(&query));
        actions.assert_first(Action::CityInputChange("Rome".into()));
        assert_not_emitted!(actions, Action::WeatherSubmit);

        let actions = screen.handle_event(&EventKind::Key(key("enter")), props(&query));
        actions.assert_count(1);
        assert_emitted!(actions, Action::WeatherSubmit);
    }

    #[test]
    fn test_escape_drops_undispatched_edits() {
        let mut screen = WeatherScreen::new();
        let query = QueryState::default();

        screen.handle_event(&EventKind::Key(key("a")), props(&query));
        let actions = screen.handle_event(&EventKind::Key(key("esc")), props(&query));
        assert_emitted!(actions, Action::NavigateBack);

        let actions = screen.handle_event(&EventKind::Key(key("x")), props(&query));
        assert_emitted!(actions, Action::CityInputChange(text) if text == "x");
    }

    #[test]
    fn test_render_empty() {
        let mut render = RenderHarness::new(72, 30);
        let mut screen = WeatherScreen::new();
        let query = QueryState::default();

        let output = render.render_to_string_plain(|frame| {
            screen.render(frame, frame.area(), props(&query));
        });

        assert!(output.contains(TITLE));
        assert!(output.contains("Enter city name..."));
        assert!(output.contains("Back (esc)"));
        assert!(!output.contains("Temperature"));
    }

    #[test]
    fn test_render_error_without_result() {
        let mut render = RenderHarness::new(72, 30);
        let mut screen = WeatherScreen::new();
        let query = QueryState {
            city_input: "Nowhere".into(),
            status: Status::Error("Weather data not found".into()),
            result: None,
        };

        let output = render.render_to_string_plain(|frame| {
            screen.render(frame, frame.area(), props(&query));
        });

        assert!(output.contains("Error: Weather data not found"));
        assert!(!output.contains("City:"));
    }

    #[test]
    fn test_render_result() {
        let mut render = RenderHarness::new(72, 30);
        let mut screen = WeatherScreen::new();
        let query = QueryState {
            city_input: "London".into(),
            status: Status::Idle,
            result: Some(WeatherResult {
                city_name: "London".into(),
                temperature_c: 15.2,
                humidity_pct: 80,
                forecast_days: vec![],
            }),
        };

        let output = render.render_to_string_plain(|frame| {
            screen.render(frame, frame.area(), props(&query));
        });

        assert!(output.contains("Temperature: 15.2°C"));
        assert!(output.contains("Humidity: 80%"));
        assert!(output.contains("City: London"));
    }
}
