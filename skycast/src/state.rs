//! Application state - single source of truth
//!
//! Components receive `&AppState` (or pieces of it) as props; only the
//! reducer mutates it.

/// Spinner frame period while a fetch is outstanding
pub const LOADING_ANIM_TICK_MS: u64 = 100;

/// One day of the multi-day forecast
#[derive(Clone, Debug, PartialEq)]
pub struct ForecastDay {
    pub condition_text: String,
    /// Absolute `https:` URL of the condition icon
    pub condition_icon_url: String,
    pub avg_temp_c: f64,
    pub min_temp_c: f64,
    pub max_temp_c: f64,
}

/// Result of one successful fetch; replaced wholesale by the next one
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherResult {
    pub city_name: String,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    /// Source order, day 0 = today
    pub forecast_days: Vec<ForecastDay>,
}

/// Presentation status of the query
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Status {
    #[default]
    Idle,
    Fetching,
    Error(String),
}

impl Status {
    pub fn is_fetching(&self) -> bool {
        matches!(self, Status::Fetching)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Status::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Which screen the shell is showing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Landing,
    Weather,
}

/// Query state for one visit to the weather screen
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryState {
    /// Raw search text, updated on every keystroke
    pub city_input: String,
    pub status: Status,
    /// Present only after a successful fetch
    pub result: Option<WeatherResult>,
}

/// Everything the UI needs to render
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub screen: Screen,
    pub query: QueryState,
    /// Dark palette; survives navigation, changed only by the user
    pub theme_dark: bool,
    /// Animation frame counter (loading spinner)
    pub tick_count: u32,
}

impl AppState {
    pub fn new(theme_dark: bool) -> Self {
        Self {
            theme_dark,
            ..Default::default()
        }
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            city_input: self.query.city_input.clone(),
            status: self.query.status.clone(),
            result: self.query.result.clone(),
            theme_dark: self.theme_dark,
        }
    }
}

/// What observers of the controller receive after every state change
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderSnapshot {
    pub city_input: String,
    pub status: Status,
    pub result: Option<WeatherResult>,
    pub theme_dark: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_helpers() {
        assert!(Status::Fetching.is_fetching());
        assert_eq!(Status::Error("boom".into()).error(), Some("boom"));
        assert_eq!(Status::Idle.error(), None);
    }

    #[test]
    fn test_snapshot_copies_query_and_theme() {
        let mut state = AppState::new(true);
        state.query.city_input = "Oslo".into();
        state.query.status = Status::Fetching;

        let snapshot = state.snapshot();
        assert_eq!(snapshot.city_input, "Oslo");
        assert_eq!(snapshot.status, Status::Fetching);
        assert!(snapshot.result.is_none());
        assert!(snapshot.theme_dark);
    }
}
