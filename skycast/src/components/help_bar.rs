use ratatui::{
    Frame,
    layout::Rect,
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;
use crate::theme::Palette;

pub struct HelpBar;

pub struct HelpBarProps {
    pub palette: Palette,
}

impl Component<Action> for HelpBar {
    type Props<'a> = HelpBarProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let key = Style::default().fg(props.palette.accent).bold();
        let label = Style::default().fg(props.palette.text_muted);

        let help = Line::from(vec![
            Span::styled(" enter", key),
            Span::styled(" search  ", label),
            Span::styled("ctrl+t", key),
            Span::styled(" theme  ", label),
            Span::styled("esc", key),
            Span::styled(" back  ", label),
            Span::styled("ctrl+c", key),
            Span::styled(" quit ", label),
        ])
        .centered();
        frame.render_widget(Paragraph::new(help), area);
    }
}
