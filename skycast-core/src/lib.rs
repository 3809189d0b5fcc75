//! Action/reducer/effect runtime for the skycast terminal UI
//!
//! An Elm/Redux-style core:
//!
//! - **Action**: events that describe state changes (user intents and
//!   async results)
//! - **EffectStore**: state container whose reducer returns a
//!   [`DispatchResult`] with declarative effects
//! - **TaskManager**: keyed debounced tasks that send their result back as
//!   an action
//! - **Component**: pure UI elements that render from props
//! - **EffectRuntime**: event loop tying the above together, with state
//!   observers for push-style snapshots
//!
//! # Async Handler Pattern
//!
//! 1. **Intent actions** trigger async work (`WeatherSubmit`)
//! 2. The reducer returns an effect (`Effect::FetchWeather { city }`)
//! 3. The effect handler schedules a task on the [`TaskManager`]
//! 4. **Result actions** carry the outcome back (`WeatherDidLoad`,
//!    `WeatherDidError`)

pub mod action;
pub mod component;
pub mod effect;
pub mod event;
pub mod middleware;
pub mod poller;
pub mod runtime;
pub mod subscriptions;
pub mod tasks;
pub mod testing;

pub use action::{Action, ActionSummary, truncate_summary};
pub use component::Component;
pub use effect::{DispatchResult, EffectReducer, EffectStore, EffectStoreWithMiddleware};
pub use event::EventKind;
pub use middleware::{LoggingMiddleware, Middleware};
pub use poller::{RawEvent, process_raw_event, spawn_event_poller};
pub use runtime::{EffectContext, EffectRuntime, EffectStoreLike, EventOutcome, PollerConfig};
pub use subscriptions::{SubKey, Subscriptions};
pub use tasks::{TaskKey, TaskManager};

pub use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
};
