//! Screen trait and associated types.
//!
//! Each screen owns its state, renders itself, and handles events by
//! returning an action instead of mutating application state. Network
//! operations are requested through `ScreenAction` variants; the `App`
//! performs the call and hands the result back to the screen's completion
//! method, so busy states are drawn before the request is issued.

use crate::config::Config;
use crate::ui::{Language, ScreenId};
use anyhow::Result;
use crossterm::event::Event;
use ratatui::layout::Rect;
use ratatui::Frame;
use std::time::Instant;

/// Context provided for handling events.
pub struct ScreenContext<'a> {
    /// Application configuration.
    pub config: &'a Config,
}

impl<'a> ScreenContext<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }
}

/// Actions that a screen can return after handling an event or a tick.
///
/// Navigation and network requests flow through here so screens never reach
/// into each other's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenAction {
    /// No action needed, stay on current screen.
    None,
    /// Navigate to a different screen.
    Navigate(ScreenId),
    /// Request to quit the application.
    Quit,
    /// Fetch the OAuth authorization URL from the backend.
    BeginLogin,
    /// Exchange the OAuth code and state for a backend session.
    ExchangeCallback { code: String, state: String },
    /// Generate a post draft from a repository's latest commit.
    GenerateDraft {
        repository: String,
        language: Language,
    },
    /// Publish the edited post text.
    PublishPost { text: String },
}

impl Default for ScreenAction {
    fn default() -> Self {
        Self::None
    }
}

/// Trait for screen controllers.
pub trait Screen {
    /// Render the screen.
    fn render(&mut self, frame: &mut Frame, area: Rect);

    /// Handle an input event, returning what should happen next.
    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction>;

    /// Advance time-based state (deferred redirects).
    ///
    /// Called on every loop iteration, including timeouts with no input.
    fn tick(&mut self, _now: Instant) -> ScreenAction {
        ScreenAction::None
    }

    /// Check if a text input is currently focused.
    ///
    /// When true, single-letter shortcuts are disabled so users can type.
    fn is_input_focused(&self) -> bool {
        false
    }

    /// Called when the screen is entered (navigated to).
    fn on_enter(&mut self, _ctx: &ScreenContext) {}

    /// Called when the screen is exited (navigated away from).
    ///
    /// Screens release scoped resources here, such as a pending redirect
    /// deadline.
    fn on_exit(&mut self, _ctx: &ScreenContext) {}
}
