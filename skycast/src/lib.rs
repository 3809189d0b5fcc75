//! skycast - terminal weather client
//!
//! Type a city, get current conditions and a 4-day forecast from
//! weatherapi.com. The interesting part is [`controller::WeatherQueryController`]:
//! a debounced fetch-and-render state machine built on `skycast-core`.
//!
//! Event (keyboard) -> component -> [`action::Action`] -> [`reducer::reducer`]
//! -> [`effect::Effect`] -> debounced task -> result action -> reducer.

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod controller;
pub mod effect;
pub mod reducer;
pub mod state;
pub mod theme;

pub use action::Action;
pub use api::{FetchError, WeatherApiClient, WeatherApiConfig, WeatherSource};
pub use config::{AppConfig, Args, ConfigError, StartOptions};
pub use controller::WeatherQueryController;
pub use state::{AppState, ForecastDay, QueryState, RenderSnapshot, Screen, Status, WeatherResult};
