//! Component trait for pure UI elements

use ratatui::{Frame, layout::Rect};

use crate::event::EventKind;

/// A pure UI component that renders from props and emits actions
///
/// 1. Props contain all read-only data needed for rendering, including
///    presentation flags such as the dark-mode palette.
/// 2. `handle_event` returns actions and never mutates external state.
/// 3. `render` is a function of props plus internal UI state (cursor
///    position and the like).
pub trait Component<A> {
    /// Data required to render the component (read-only)
    type Props<'a>;

    /// Handle an event and return the action to dispatch, if any
    ///
    /// Default implementation ignores every event (render-only components).
    #[allow(unused_variables)]
    fn handle_event(&mut self, event: &EventKind, props: Self::Props<'_>) -> Option<A> {
        None
    }

    /// Render the component to the frame
    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
