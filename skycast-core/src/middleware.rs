//! Middleware hooks around reducer dispatch

use crate::action::{Action, ActionSummary};

/// Middleware trait for intercepting actions
///
/// Implement this trait to add logging or other cross-cutting
/// concerns to an effect store.
pub trait Middleware<A: Action> {
    /// Called before the action is dispatched to the reducer
    fn before(&mut self, action: &A);

    /// Called after the action is processed by the reducer
    fn after(&mut self, action: &A, state_changed: bool);
}

/// Middleware that logs actions through `tracing`
///
/// Uses [`ActionSummary`] so data-heavy actions stay on one line.
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    dispatched: u64,
}

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of actions seen so far
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }
}

impl<A: ActionSummary> Middleware<A> for LoggingMiddleware {
    fn before(&mut self, action: &A) {
        self.dispatched += 1;
        tracing::trace!(action = %action.name(), "dispatching action");
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        tracing::debug!(
            action = %action.name(),
            summary = %action.summary(),
            state_changed,
            "action processed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    enum TestAction {
        Ping,
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            "Ping"
        }
    }

    impl ActionSummary for TestAction {}

    #[test]
    fn test_logging_middleware_counts() {
        let mut middleware = LoggingMiddleware::new();
        middleware.before(&TestAction::Ping);
        middleware.after(&TestAction::Ping, true);
        middleware.before(&TestAction::Ping);
        middleware.after(&TestAction::Ping, false);

        assert_eq!(middleware.dispatched(), 2);
    }
}
