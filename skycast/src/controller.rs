//! WeatherQueryController - owns the query state machine
//!
//! Intent methods (`on_*`) dispatch actions synchronously; the reducer's
//! effects are turned into a debounced fetch on the runtime's
//! `TaskManager`. Fetch outcomes come back as actions on the runtime channel
//! and are applied by [`WeatherQueryController::settle`] (headless) or by
//! the terminal loop in [`WeatherQueryController::run`].
//!
//! Every state change is pushed to subscribers as a [`RenderSnapshot`].

use std::cell::RefCell;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use ratatui::Terminal;
use ratatui::backend::Backend;
use skycast_core::{
    EffectContext, EffectRuntime, EffectStoreWithMiddleware, LoggingMiddleware, TaskKey,
    TaskManager,
};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::action::Action;
use crate::api::WeatherSource;
use crate::components::SkycastUi;
use crate::config::StartOptions;
use crate::effect::Effect;
use crate::reducer::reducer;
use crate::state::{AppState, LOADING_ANIM_TICK_MS, RenderSnapshot, Screen};

/// Task slot shared by every weather fetch
pub const WEATHER_TASK: &str = "weather";

type AppStore = EffectStoreWithMiddleware<AppState, Action, Effect, LoggingMiddleware>;

/// Turns effects into tasks.
struct EffectHandler<W> {
    source: Arc<W>,
    debounce: Duration,
}

impl<W: WeatherSource> EffectHandler<W> {
    fn handle(&self, effect: Effect, ctx: &mut EffectContext<'_, Action>) {
        match effect {
            Effect::FetchWeather { city } => {
                let source = Arc::clone(&self.source);
                ctx.tasks()
                    .debounce(WEATHER_TASK, self.debounce, async move {
                        info!(%city, "fetching weather");
                        match source.fetch_forecast(&city).await {
                            Ok(result) => Action::WeatherDidLoad(result),
                            Err(e) => {
                                warn!(%city, error = %e, "weather fetch failed");
                                Action::WeatherDidError(e.to_string())
                            }
                        }
                    });
            }
            Effect::CancelPendingFetch => {
                ctx.tasks().cancel(&TaskKey::new(WEATHER_TASK));
            }
        }
    }
}

pub struct WeatherQueryController<W: WeatherSource> {
    runtime: EffectRuntime<AppState, Action, Effect, AppStore>,
    effects: EffectHandler<W>,
    snapshots: watch::Receiver<RenderSnapshot>,
}

impl<W: WeatherSource> WeatherQueryController<W> {
    /// Controller on the landing screen, light theme.
    pub fn new(source: W, debounce: Duration) -> Self {
        Self::with_state(source, debounce, AppState::default())
    }

    pub fn with_state(source: W, debounce: Duration, state: AppState) -> Self {
        let store = EffectStoreWithMiddleware::new(state, reducer, LoggingMiddleware::new());
        let mut runtime = EffectRuntime::from_store(store);

        let (tx, snapshots) = watch::channel(RenderSnapshot::default());
        runtime.observe(move |state: &AppState| {
            let next = state.snapshot();
            tx.send_if_modified(|current| {
                if *current == next {
                    return false;
                }
                *current = next;
                true
            });
        });

        Self {
            runtime,
            effects: EffectHandler {
                source: Arc::new(source),
                debounce,
            },
            snapshots,
        }
    }

    // ===== Intents =====

    /// Record new search text. Never touches the network.
    pub fn on_city_input_changed(&mut self, text: impl Into<String>) {
        self.dispatch(Action::CityInputChange(text.into()));
    }

    /// Mark the query as fetching, clear the previous result and schedule a
    /// debounced fetch for the current input.
    ///
    /// Submitting from the landing screen enters the weather screen first.
    pub fn on_submit(&mut self) {
        if self.state().screen != Screen::Weather {
            self.on_navigate_start();
        }
        self.dispatch(Action::WeatherSubmit);
    }

    pub fn on_toggle_theme(&mut self) {
        self.dispatch(Action::UiToggleTheme);
    }

    /// Leave the weather screen, discarding the query.
    pub fn on_navigate_back(&mut self) {
        self.dispatch(Action::NavigateBack);
    }

    pub fn on_navigate_start(&mut self) {
        self.dispatch(Action::NavigateStart);
    }

    /// Apply command line start options.
    pub fn apply_start(&mut self, start: &StartOptions) {
        if start.skip_landing {
            self.on_navigate_start();
        }
        if let Some(city) = &start.city {
            self.on_city_input_changed(city.clone());
            self.on_submit();
        }
    }

    // ===== Driving =====

    /// Reduce one action and run its effects. Returns whether state changed.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let effects = &self.effects;
        self.runtime
            .dispatch(action, &mut |effect, ctx: &mut EffectContext<'_, Action>| {
                effects.handle(effect, ctx)
            })
    }

    /// Wait for the next fetch outcome (or queued action) and apply it.
    ///
    /// Returns the action that was applied, or `None` if the channel closed.
    pub async fn settle(&mut self) -> Option<Action> {
        let action = self.runtime.next_action().await?;
        self.dispatch(action.clone());
        Some(action)
    }

    // ===== Observation =====

    pub fn state(&self) -> &AppState {
        self.runtime.state()
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver that is notified after every later state change.
    pub fn subscribe(&self) -> watch::Receiver<RenderSnapshot> {
        let mut rx = self.snapshots.clone();
        rx.mark_unchanged();
        rx
    }

    pub fn tasks(&self) -> &TaskManager<Action> {
        self.runtime.tasks_ref()
    }

    // ===== Terminal =====

    /// Drive the terminal UI until the user quits.
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        self.runtime.subscriptions().interval(
            "tick",
            Duration::from_millis(LOADING_ANIM_TICK_MS),
            || Action::Tick,
        );

        let ui = RefCell::new(SkycastUi::new());
        let effects = &self.effects;

        self.runtime
            .run(
                terminal,
                |frame, area, state| ui.borrow_mut().render(frame, area, state),
                |event, state| ui.borrow_mut().map_event(event, state),
                |action| matches!(action, Action::Quit),
                |effect, ctx: &mut EffectContext<'_, Action>| effects.handle(effect, ctx),
            )
            .await
    }
}
