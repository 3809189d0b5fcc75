pub mod conditions;
pub mod forecast_grid;
pub mod help_bar;
pub mod landing;
pub mod search_bar;
pub mod weather_screen;

pub use skycast_core::Component;

pub use conditions::{Conditions, ConditionsProps, SPINNERS};
pub use forecast_grid::{ForecastGrid, ForecastGridProps};
pub use help_bar::{HelpBar, HelpBarProps};
pub use landing::{Landing, LandingProps};
pub use search_bar::{SearchBar, SearchBarProps};
pub use weather_screen::{WeatherScreen, WeatherScreenProps};

use ratatui::{Frame, layout::Rect};
use skycast_core::{EventKind, EventOutcome};

use crate::action::Action;
use crate::state::{AppState, Screen};

/// Root of the component tree: routes rendering and input by screen.
#[derive(Default)]
pub struct SkycastUi {
    landing: Landing,
    weather: WeatherScreen,
}

impl SkycastUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        match state.screen {
            Screen::Landing => self.landing.render(
                frame,
                area,
                LandingProps {
                    theme_dark: state.theme_dark,
                },
            ),
            Screen::Weather => self.weather.render(frame, area, weather_props(state)),
        }
    }

    pub fn map_event(&mut self, event: &EventKind, state: &AppState) -> EventOutcome<Action> {
        if event.is_interrupt() {
            return EventOutcome::action(Action::Quit);
        }
        if let EventKind::Resize(..) = event {
            return EventOutcome::ignored().with_render();
        }

        let action = match state.screen {
            Screen::Landing => self.landing.handle_event(
                event,
                LandingProps {
                    theme_dark: state.theme_dark,
                },
            ),
            Screen::Weather => self.weather.handle_event(event, weather_props(state)),
        };
        action.into()
    }
}

fn weather_props(state: &AppState) -> WeatherScreenProps<'_> {
    WeatherScreenProps {
        query: &state.query,
        theme_dark: state.theme_dark,
        tick_count: state.tick_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skycast_core::testing::*;

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let mut ui = SkycastUi::new();
        let mut state = AppState::default();

        let outcome = ui.map_event(&EventKind::Key(key("ctrl+c")), &state);
        assert_eq!(outcome.actions, vec![Action::Quit]);

        state.screen = Screen::Weather;
        let outcome = ui.map_event(&EventKind::Key(key("ctrl+c")), &state);
        assert_eq!(outcome.actions, vec![Action::Quit]);
    }

    #[test]
    fn test_routes_by_screen() {
        let mut ui = SkycastUi::new();
        let mut state = AppState::default();

        let outcome = ui.map_event(&EventKind::Key(key("enter")), &state);
        assert_eq!(outcome.actions, vec![Action::NavigateStart]);

        state.screen = Screen::Weather;
        let outcome = ui.map_event(&EventKind::Key(key("enter")), &state);
        assert_eq!(outcome.actions, vec![Action::WeatherSubmit]);

        // "q" is text on the weather screen
        let outcome = ui.map_event(&EventKind::Key(key("q")), &state);
        assert_eq!(outcome.actions, vec![Action::CityInputChange("q".into())]);
    }

    #[test]
    fn test_resize_only_rerenders() {
        let mut ui = SkycastUi::new();
        let outcome = ui.map_event(&EventKind::Resize(100, 40), &AppState::default());
        assert!(outcome.actions.is_empty());
        assert!(outcome.needs_render);
    }
}
