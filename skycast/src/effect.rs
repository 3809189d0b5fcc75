//! Effects - side effects declared by the reducer
//!
//! The reducer stays pure; the controller's effect handler turns these into
//! scheduled tasks on the runtime's `TaskManager`.

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Debounced fetch of the forecast for `city`
    FetchWeather { city: String },
    /// Drop a fetch that is still waiting for its debounce delay
    CancelPendingFetch,
}
