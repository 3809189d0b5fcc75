//! Reducer - (state, action) -> (changed, effects)
//!
//! All state mutations happen here. Network work is only declared, as an
//! [`Effect`], and performed by the controller's effect handler.

use skycast_core::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, QueryState, Screen, Status};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Query =====
        Action::CityInputChange(text) => {
            if state.query.city_input == text {
                return DispatchResult::unchanged();
            }
            state.query.city_input = text;
            DispatchResult::changed()
        }

        Action::WeatherSubmit => {
            if state.screen != Screen::Weather {
                return DispatchResult::unchanged();
            }
            // No validation: an empty city goes to the API like any other
            state.query.status = Status::Fetching;
            state.query.result = None;
            DispatchResult::changed_with(Effect::FetchWeather {
                city: state.query.city_input.clone(),
            })
        }

        // Results from a query the user already left are dropped. Otherwise
        // whichever fetch settles last wins.
        Action::WeatherDidLoad(result) => {
            if state.screen != Screen::Weather {
                return DispatchResult::unchanged();
            }
            state.query.result = Some(result);
            state.query.status = Status::Idle;
            DispatchResult::changed()
        }

        Action::WeatherDidError(message) => {
            if state.screen != Screen::Weather {
                return DispatchResult::unchanged();
            }
            state.query.result = None;
            state.query.status = Status::Error(message);
            DispatchResult::changed()
        }

        // ===== UI =====
        Action::UiToggleTheme => {
            state.theme_dark = !state.theme_dark;
            DispatchResult::changed()
        }

        // ===== Navigation =====
        Action::NavigateStart => {
            if state.screen == Screen::Weather {
                return DispatchResult::unchanged();
            }
            state.screen = Screen::Weather;
            DispatchResult::changed()
        }

        Action::NavigateBack => {
            if state.screen != Screen::Weather {
                return DispatchResult::unchanged();
            }
            state.screen = Screen::Landing;
            state.query = QueryState::default();
            DispatchResult::changed_with(Effect::CancelPendingFetch)
        }

        // ===== Global =====
        Action::Tick => {
            state.tick_count = state.tick_count.wrapping_add(1);
            // Only the spinner needs the extra frames
            state.query.status.is_fetching().into()
        }

        // Handled by the runtime loop
        Action::Quit => DispatchResult::unchanged(),
    }
}
