//! Light and dark palettes
//!
//! Components get `theme_dark` as a plain bool prop and pick colors here.

use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub surface: Color,
    pub card: Color,
    pub text: Color,
    pub text_muted: Color,
    pub border: Color,
    pub accent: Color,
    pub error: Color,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        background: Color::Rgb(229, 231, 235),
        surface: Color::Rgb(255, 255, 255),
        card: Color::Rgb(243, 244, 246),
        text: Color::Rgb(17, 24, 39),
        text_muted: Color::Rgb(107, 114, 128),
        border: Color::Rgb(209, 213, 219),
        accent: Color::Rgb(29, 78, 216),
        error: Color::Rgb(185, 28, 28),
    };

    pub const DARK: Palette = Palette {
        background: Color::Rgb(17, 24, 39),
        surface: Color::Rgb(31, 41, 55),
        card: Color::Rgb(55, 65, 81),
        text: Color::Rgb(255, 255, 255),
        text_muted: Color::Rgb(156, 163, 175),
        border: Color::Rgb(75, 85, 99),
        accent: Color::Rgb(37, 99, 235),
        error: Color::Rgb(248, 113, 113),
    };

    pub fn for_mode(dark: bool) -> Self {
        if dark { Self::DARK } else { Self::LIGHT }
    }

    /// Icon on the theme toggle: what pressing it switches to
    pub fn toggle_icon(dark: bool) -> &'static str {
        if dark { "☀" } else { "☾" }
    }
}
