//! Actions
//!
//! Naming convention:
//! - Prefix groups related actions: `Weather*`, `Ui*`, `Navigate*`
//! - `Did` marks the result of async work

use skycast_core::{ActionSummary, truncate_summary};

use crate::state::WeatherResult;

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    // ===== Query =====
    /// Search text changed (every keystroke)
    CityInputChange(String),

    /// User submitted the current search text (triggers debounced fetch)
    WeatherSubmit,

    /// Result: forecast loaded
    WeatherDidLoad(WeatherResult),

    /// Result: fetch failed, carries the human-readable message
    WeatherDidError(String),

    // ===== UI =====
    /// Flip between light and dark palette
    UiToggleTheme,

    // ===== Navigation =====
    /// Landing screen -> weather screen
    NavigateStart,

    /// Weather screen -> landing screen, discarding the query
    NavigateBack,

    // ===== Global =====
    /// Periodic tick for the loading spinner
    Tick,

    Quit,
}

impl skycast_core::Action for Action {
    fn name(&self) -> &'static str {
        match self {
            Action::CityInputChange(_) => "CityInputChange",
            Action::WeatherSubmit => "WeatherSubmit",
            Action::WeatherDidLoad(_) => "WeatherDidLoad",
            Action::WeatherDidError(_) => "WeatherDidError",
            Action::UiToggleTheme => "UiToggleTheme",
            Action::NavigateStart => "NavigateStart",
            Action::NavigateBack => "NavigateBack",
            Action::Tick => "Tick",
            Action::Quit => "Quit",
        }
    }
}

impl ActionSummary for Action {
    fn summary(&self) -> String {
        match self {
            Action::WeatherDidLoad(result) => format!(
                "WeatherDidLoad {{ city: {}, temp: {:.1}°C, days: {} }}",
                result.city_name,
                result.temperature_c,
                result.forecast_days.len()
            ),
            Action::WeatherDidError(e) => {
                format!("WeatherDidError({:?})", truncate_summary(e, 40))
            }
            _ => format!("{:?}", self),
        }
    }
}
