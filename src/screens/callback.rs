//! OAuth callback screen.
//!
//! The browser original was the redirect target and read `code`/`state`
//! straight from its query string; here the user pastes the redirect URL
//! into an input field. Submission is protected by a one-shot guard owned by
//! this screen instance: set before the exchange is issued, cleared only on
//! failure, never cleared on success. A successful exchange schedules a
//! redirect to the dashboard after a fixed delay; the deadline is released
//! on screen exit so navigating away cancels the pending redirect.

use crate::screens::screen_trait::{Screen, ScreenAction, ScreenContext};
use crate::styles::theme;
use crate::ui::{CallbackPhase, ScreenId};
use crate::utils::{create_standard_layout, parse_callback_params, TextInput};
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use std::time::{Duration, Instant};
use tracing::info;

/// Fixed error for a submission missing `code` or `state`.
pub const MISSING_PARAMS_MSG: &str = "Missing authorization parameters (code and state)";

/// Delay before the post-success redirect to the dashboard.
pub const REDIRECT_DELAY: Duration = Duration::from_secs(3);

/// Callback screen controller.
pub struct CallbackScreen {
    input: TextInput,
    phase: CallbackPhase,
    message: String,
    /// One-shot guard: an exchange attempt has started or permanently
    /// succeeded.
    has_processed: bool,
    /// Pending redirect to the dashboard, if a deadline is armed.
    redirect_deadline: Option<Instant>,
}

impl CallbackScreen {
    pub fn new() -> Self {
        Self {
            input: TextInput::new(),
            phase: CallbackPhase::AwaitingInput,
            message: String::new(),
            has_processed: false,
            redirect_deadline: None,
        }
    }

    pub fn phase(&self) -> CallbackPhase {
        self.phase
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn has_processed(&self) -> bool {
        self.has_processed
    }

    pub fn redirect_deadline(&self) -> Option<Instant> {
        self.redirect_deadline
    }

    /// Submit the pasted redirect URL.
    ///
    /// Missing parameters surface an error without touching the guard; a
    /// set guard makes the submission inert.
    pub fn submit(&mut self) -> ScreenAction {
        let Some(params) = parse_callback_params(self.input.text()) else {
            self.phase = CallbackPhase::Error;
            self.message = MISSING_PARAMS_MSG.to_string();
            return ScreenAction::None;
        };

        if self.has_processed {
            return ScreenAction::None;
        }

        self.has_processed = true;
        self.phase = CallbackPhase::Loading;
        self.message.clear();
        ScreenAction::ExchangeCallback {
            code: params.code,
            state: params.state,
        }
    }

    /// Completion handler for the callback exchange.
    pub fn on_exchange_result(&mut self, result: Result<serde_json::Value>) -> ScreenAction {
        match result {
            Ok(_) => {
                info!("OAuth callback exchange succeeded");
                self.phase = CallbackPhase::Success;
                self.message =
                    "Authentication complete! Redirecting to the dashboard...".to_string();
                self.redirect_deadline = Some(Instant::now() + REDIRECT_DELAY);
            }
            Err(err) => {
                self.phase = CallbackPhase::Error;
                self.message = err.to_string();
                // Re-arm the guard: each failure permits one retry cycle.
                self.has_processed = false;
            }
        }
        ScreenAction::None
    }
}

impl Default for CallbackScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for CallbackScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let theme = theme();
        let (header, content, footer) = create_standard_layout(area, 4, 2);

        let title = Paragraph::new("Finish authentication")
            .style(theme.title_style())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border_style()),
            );
        frame.render_widget(title, header);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(content);

        let input_focused = self.is_input_focused();
        let input_border = if input_focused {
            theme.border_focused_style()
        } else {
            theme.border_style()
        };
        let input = Paragraph::new(self.input.text())
            .style(theme.text_style())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Paste the redirect URL from your browser")
                    .border_style(input_border),
            );
        frame.render_widget(input, chunks[0]);
        if input_focused {
            frame.set_cursor_position((
                chunks[0].x + 1 + self.input.cursor() as u16,
                chunks[0].y + 1,
            ));
        }

        let status_lines: Vec<Line> = match self.phase {
            CallbackPhase::AwaitingInput => vec![
                Line::styled(
                    "After approving access on X, the browser lands on a",
                    theme.muted_style(),
                ),
                Line::styled(
                    "callback URL containing code and state. Paste it above.",
                    theme.muted_style(),
                ),
            ],
            CallbackPhase::Loading => vec![Line::styled(
                "Processing authentication...",
                theme.text_style(),
            )],
            CallbackPhase::Success => vec![
                Line::styled("Authentication successful!", theme.success_style()),
                Line::styled(self.message.clone(), theme.text_style()),
                Line::raw(""),
                Line::styled("Enter go to dashboard now", theme.muted_style()),
            ],
            CallbackPhase::Error => vec![
                Line::styled("Authentication error", theme.error_style()),
                Line::styled(self.message.clone(), theme.error_style()),
                Line::raw(""),
                Line::styled(
                    "Fix the pasted URL and press Enter to retry, or Esc to log in again.",
                    theme.muted_style(),
                ),
            ],
        };
        let status = Paragraph::new(status_lines)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Status")
                    .border_style(theme.border_style()),
            );
        frame.render_widget(status, chunks[1]);

        let hint = Paragraph::new("Enter submit · Esc back to login")
            .style(theme.muted_style())
            .alignment(Alignment::Center);
        frame.render_widget(hint, footer);
    }

    fn handle_event(&mut self, event: Event, _ctx: &ScreenContext) -> Result<ScreenAction> {
        if let Event::Key(key) = event {
            if key.kind != KeyEventKind::Press {
                return Ok(ScreenAction::None);
            }
            match key.code {
                KeyCode::Enter => {
                    if self.phase == CallbackPhase::Success {
                        // Skip the remaining delay.
                        return Ok(ScreenAction::Navigate(ScreenId::Dashboard));
                    }
                    return Ok(self.submit());
                }
                KeyCode::Esc => return Ok(ScreenAction::Navigate(ScreenId::Login)),
                code if self.is_input_focused() => {
                    self.input.handle_key(code);
                }
                _ => {}
            }
        }
        Ok(ScreenAction::None)
    }

    fn tick(&mut self, now: Instant) -> ScreenAction {
        if let Some(deadline) = self.redirect_deadline {
            if now >= deadline {
                self.redirect_deadline = None;
                return ScreenAction::Navigate(ScreenId::Dashboard);
            }
        }
        ScreenAction::None
    }

    fn is_input_focused(&self) -> bool {
        matches!(
            self.phase,
            CallbackPhase::AwaitingInput | CallbackPhase::Error
        )
    }

    fn on_exit(&mut self, _ctx: &ScreenContext) {
        // Scoped timer release: leaving the screen cancels the pending
        // redirect. The guard itself is intentionally left as-is so a
        // revisit after success stays inert.
        self.redirect_deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use anyhow::anyhow;

    fn type_text(screen: &mut CallbackScreen, text: &str) {
        for c in text.chars() {
            screen.input.insert_char(c);
        }
    }

    #[test]
    fn test_missing_params_never_touches_guard() {
        let mut screen = CallbackScreen::new();
        type_text(&mut screen, "http://localhost/callback?code=only");

        for _ in 0..3 {
            assert_eq!(screen.submit(), ScreenAction::None);
            assert_eq!(screen.phase(), CallbackPhase::Error);
            assert_eq!(screen.message(), MISSING_PARAMS_MSG);
            assert!(!screen.has_processed());
        }
    }

    #[test]
    fn test_submit_sets_guard_and_requests_exchange() {
        let mut screen = CallbackScreen::new();
        type_text(&mut screen, "http://localhost/callback?code=abc&state=xyz");

        let action = screen.submit();
        assert_eq!(
            action,
            ScreenAction::ExchangeCallback {
                code: "abc".to_string(),
                state: "xyz".to_string(),
            }
        );
        assert!(screen.has_processed());
        assert_eq!(screen.phase(), CallbackPhase::Loading);

        // Guard blocks a second submission while the first is pending.
        assert_eq!(screen.submit(), ScreenAction::None);
    }

    #[test]
    fn test_failure_rearms_guard_once_per_failure() {
        let mut screen = CallbackScreen::new();
        type_text(&mut screen, "code=abc&state=xyz");

        // Repeated failure cycles: one exchange per failure, no cap.
        for _ in 0..3 {
            assert!(matches!(
                screen.submit(),
                ScreenAction::ExchangeCallback { .. }
            ));
            screen.on_exchange_result(Err(anyhow!("Invalid state")));
            assert_eq!(screen.phase(), CallbackPhase::Error);
            assert_eq!(screen.message(), "Invalid state");
            assert!(!screen.has_processed());
        }
    }

    #[test]
    fn test_success_permanently_blocks_further_exchanges() {
        let mut screen = CallbackScreen::new();
        type_text(&mut screen, "code=abc&state=xyz");

        assert!(matches!(
            screen.submit(),
            ScreenAction::ExchangeCallback { .. }
        ));
        screen.on_exchange_result(Ok(serde_json::json!({"ok": true})));
        assert_eq!(screen.phase(), CallbackPhase::Success);
        assert!(screen.has_processed());
        assert!(screen.redirect_deadline().is_some());

        // Stale success state: further submissions never call the backend.
        assert_eq!(screen.submit(), ScreenAction::None);
        assert!(screen.has_processed());
    }

    #[test]
    fn test_redirect_fires_after_delay() {
        let mut screen = CallbackScreen::new();
        type_text(&mut screen, "code=abc&state=xyz");
        screen.submit();
        screen.on_exchange_result(Ok(serde_json::json!({})));

        let deadline = screen.redirect_deadline().unwrap();
        assert_eq!(screen.tick(deadline - Duration::from_millis(1)), ScreenAction::None);
        assert_eq!(
            screen.tick(deadline),
            ScreenAction::Navigate(ScreenId::Dashboard)
        );
        // Deadline is consumed: the redirect fires once.
        assert_eq!(screen.tick(deadline + REDIRECT_DELAY), ScreenAction::None);
    }

    #[test]
    fn test_exit_releases_pending_redirect() {
        let mut screen = CallbackScreen::new();
        type_text(&mut screen, "code=abc&state=xyz");
        screen.submit();
        screen.on_exchange_result(Ok(serde_json::json!({})));
        assert!(screen.redirect_deadline().is_some());

        let config = Config::default();
        screen.on_exit(&ScreenContext::new(&config));
        assert!(screen.redirect_deadline().is_none());
        // The guard survives: a revisit with stale success state stays inert.
        assert!(screen.has_processed());
    }
}
