use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
};
use skycast_core::EventKind;

use super::Component;
use crate::action::Action;
use crate::theme::Palette;

pub const HEADLINE: &str = "Know the weather of today, tomorrow, and beyond";
pub const BLURB: &str = "Enter the city name to get the current weather information \
including temperature, humidity, and weather conditions.";

pub struct LandingProps {
    pub theme_dark: bool,
}

/// Hero screen shown before the weather app
#[derive(Default)]
pub struct Landing;

impl Component<Action> for Landing {
    type Props<'a> = LandingProps;

    fn handle_event(&mut self, event: &EventKind, _props: Self::Props<'_>) -> Option<Action> {
        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Enter => Some(Action::NavigateStart),
                KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let palette = Palette::for_mode(props.theme_dark);
        frame.render_widget(
            Block::default().style(Style::default().bg(palette.surface)),
            area,
        );

        let [content] = Layout::horizontal([Constraint::Max(72)])
            .flex(Flex::Center)
            .areas(area);
        let [headline, _, blurb, _, prompt] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(content);

        frame.render_widget(
            Paragraph::new(Line::from(HEADLINE).style(Style::default().fg(palette.text).bold()))
                .centered()
                .wrap(Wrap { trim: true }),
            headline,
        );
        frame.render_widget(
            Paragraph::new(BLURB)
                .style(Style::default().fg(palette.text_muted))
                .centered()
                .wrap(Wrap { trim: true }),
            blurb,
        );

        let prompt_line = Line::from(vec![
            Span::styled("Press ", Style::default().fg(palette.text_muted)),
            Span::styled(
                " Enter ",
                Style::default().fg(palette.surface).bg(palette.accent).bold(),
            ),
            Span::styled(" to open the weather app", Style::default().fg(palette.text_muted)),
        ])
        .centered();
        frame.render_widget(Paragraph::new(prompt_line), prompt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skycast_core::testing::*;

    #[test]
    fn test_enter_starts() {
        let mut landing = Landing;
        let actions = landing.handle_event(
            &EventKind::Key(key("enter")),
            LandingProps { theme_dark: false },
        );
        actions.assert_first(Action::NavigateStart);
    }

    #[test]
    fn test_q_and_esc_quit() {
        let mut landing = Landing;
        for k in ["q", "esc"] {
            landing
                .handle_event(&EventKind::Key(key(k)), LandingProps { theme_dark: false })
                .assert_first(Action::Quit);
        }
        landing
            .handle_event(&EventKind::Key(key("x")), LandingProps { theme_dark: false })
            .assert_empty();
    }

    #[test]
    fn test_render() {
        let mut render = RenderHarness::new(80, 20);
        let output = render.render_to_string_plain(|frame| {
            Landing.render(frame, frame.area(), LandingProps { theme_dark: true });
        });

        assert!(output.contains(HEADLINE));
        assert!(output.contains("Enter  to open the weather app"));
    }
}
