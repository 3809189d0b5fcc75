//! Forecast cards, two per row

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::Component;
use crate::action::Action;
use crate::state::ForecastDay;
use crate::theme::Palette;

const COLUMNS: usize = 2;

pub struct ForecastGridProps<'a> {
    pub days: &'a [ForecastDay],
    pub palette: Palette,
}

pub struct ForecastGrid;

impl ForecastGrid {
    pub const CARD_HEIGHT: u16 = 5;

    pub fn height(days: usize) -> u16 {
        days.div_ceil(COLUMNS) as u16 * Self::CARD_HEIGHT
    }
}

fn day_label(index: usize) -> String {
    match index {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        n => format!("In {n} days"),
    }
}

/// Rough glyph for a weatherapi condition text.
fn condition_glyph(text: &str) -> &'static str {
    let text = text.to_ascii_lowercase();
    if text.contains("thunder") {
        "⚡"
    } else if text.contains("snow") || text.contains("sleet") || text.contains("ice") {
        "❄"
    } else if text.contains("rain") || text.contains("drizzle") || text.contains("shower") {
        "☂"
    } else if text.contains("fog") || text.contains("mist") {
        "≋"
    } else if text.contains("cloud") || text.contains("overcast") {
        "☁"
    } else {
        "☀"
    }
}

impl Component<Action> for ForecastGrid {
    type Props<'a> = ForecastGridProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let palette = props.palette;
        let rows = props.days.len().div_ceil(COLUMNS);
        let row_areas = Layout::vertical(vec![Constraint::Length(Self::CARD_HEIGHT); rows])
            .split(area);

        for (row, row_area) in row_areas.iter().enumerate() {
            let cells = Layout::horizontal([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
                .spacing(1)
                .split(*row_area);

            for (col, cell) in cells.iter().enumerate() {
                let index = row * COLUMNS + col;
                let Some(day) = props.days.get(index) else {
                    continue;
                };

                let block = Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(palette.border))
                    .title(Line::from(day_label(index)).centered())
                    .style(Style::default().bg(palette.card));

                let lines = vec![
                    Line::from(format!(
                        "{} {}",
                        condition_glyph(&day.condition_text),
                        day.condition_text
                    ))
                    .style(Style::default().fg(palette.text_muted)),
                    Line::from(format!("{}°C", day.avg_temp_c))
                        .style(Style::default().fg(palette.text).bold()),
                    Line::from(format!(
                        "Min: {}°C | Max: {}°C",
                        day.min_temp_c, day.max_temp_c
                    ))
                    .style(Style::default().fg(palette.text_muted)),
                ];

                frame.render_widget(Paragraph::new(lines).centered().block(block), *cell);
            }
        }
    }
}
