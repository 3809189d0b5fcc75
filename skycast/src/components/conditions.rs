//! Status line and current conditions

use ratatui::{
    Frame,
    layout::Rect,
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;
use crate::state::{Status, WeatherResult};
use crate::theme::Palette;

pub const SPINNERS: [&str; 4] = ["◐", "◓", "◑", "◒"];

pub struct ConditionsProps<'a> {
    pub status: &'a Status,
    pub result: Option<&'a WeatherResult>,
    pub tick_count: u32,
    pub palette: Palette,
}

pub struct Conditions;

impl Conditions {
    pub fn height(props: &ConditionsProps<'_>) -> u16 {
        let status = u16::from(*props.status != Status::Idle);
        let current = if props.result.is_some() { 3 } else { 0 };
        status + current
    }
}

impl Component<Action> for Conditions {
    type Props<'a> = ConditionsProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let palette = props.palette;
        let muted = Style::default().fg(palette.text_muted);
        let mut lines = Vec::with_capacity(4);

        match props.status {
            Status::Idle => {}
            Status::Fetching => {
                let spinner = SPINNERS[(props.tick_count as usize / 2) % SPINNERS.len()];
                lines.push(Line::from(vec![
                    Span::styled(format!("{spinner} "), Style::default().fg(palette.accent)),
                    Span::styled("Fetching weather data...", muted),
                ]));
            }
            Status::Error(message) => {
                lines.push(Line::from(Span::styled(
                    format!("Error: {message}"),
                    Style::default().fg(palette.error).bold(),
                )));
            }
        }

        if let Some(result) = props.result {
            lines.push(Line::from(Span::styled(
                format!("Temperature: {}°C", result.temperature_c),
                muted,
            )));
            lines.push(Line::from(Span::styled(
                format!("Humidity: {}%", result.humidity_pct),
                muted,
            )));
            lines.push(Line::from(vec![
                Span::styled("City: ", muted),
                Span::styled(result.city_name.as_str(), Style::default().fg(palette.text).bold()),
            ]));
        }

        frame.render_widget(Paragraph::new(lines), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skycast_core::testing::RenderHarness;

    fn render(status: &Status, result: Option<&WeatherResult>) -> String {
        let mut harness = RenderHarness::new(40, 4);
        harness.render_to_string_plain(|frame| {
            Conditions.render(
                frame,
                frame.area(),
                ConditionsProps {
                    status,
                    result,
                    tick_count: 0,
                    palette: Palette::LIGHT,
                },
            );
        })
    }

    #[test]
    fn test_fetching_shows_spinner() {
        let output = render(&Status::Fetching, None);
        assert!(output.contains("◐ Fetching weather data..."));
    }

    #[test]
    fn test_error_line() {
        let output = render(&Status::Error("HTTP error! status: 404".into()), None);
        assert!(output.contains("Error: HTTP error! status: 404"));
        assert!(!output.contains("Temperature"));
    }

    #[test]
    fn test_current_conditions() {
        let result = WeatherResult {
            city_name: "London".into(),
            temperature_c: 15.2,
            humidity_pct: 80,
            forecast_days: vec![],
        };
        let output = render(&Status::Idle, Some(&result));

        assert!(output.contains("Temperature: 15.2°C"));
        assert!(output.contains("Humidity: 80%"));
        assert!(output.contains("City: London"));
    }

    #[test]
    fn test_height() {
        let idle = ConditionsProps {
            status: &Status::Idle,
            result: None,
            tick_count: 0,
            palette: Palette::LIGHT,
        };
        assert_eq!(Conditions::height(&idle), 0);

        let fetching = ConditionsProps {
            status: &Status::Fetching,
            ..idle
        };
        assert_eq!(Conditions::height(&fetching), 1);
    }
}
