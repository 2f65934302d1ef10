//! Login screen: fetches the OAuth authorization URL and opens it in the
//! system browser.
//!
//! Success is observed as navigation: once the browser has been pointed at
//! the provider's consent page, the app moves to the callback screen where
//! the user pastes the redirect URL. Any failure leaves the screen
//! interactive and Enter retries (the operation has no side effect until the
//! request succeeds).

use crate::api::LoginStart;
use crate::screens::screen_trait::{Screen, ScreenAction, ScreenContext};
use crate::styles::theme;
use crate::ui::{AuthStatus, ScreenId};
use crate::utils::create_standard_layout;
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::layout::{Alignment, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use tracing::{info, warn};

/// Fixed error shown when the backend answers 200 without an authorization
/// URL.
pub const MISSING_AUTH_URL_MSG: &str =
    "The server response did not include an authorization URL";

/// Login screen controller.
pub struct LoginScreen {
    status: AuthStatus,
    error_message: Option<String>,
    /// Authorization URL from the last successful request, kept on screen so
    /// the user can copy it when the browser launch fails.
    authorization_url: Option<String>,
    /// Disabled in tests to keep them from spawning a browser.
    pub open_links: bool,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self {
            status: AuthStatus::Idle,
            error_message: None,
            authorization_url: None,
            open_links: true,
        }
    }

    pub fn status(&self) -> AuthStatus {
        self.status
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn authorization_url(&self) -> Option<&str> {
        self.authorization_url.as_deref()
    }

    /// Start the login operation: no-op while a request is in flight.
    fn begin_login(&mut self) -> ScreenAction {
        if self.status == AuthStatus::Loading {
            return ScreenAction::None;
        }
        self.status = AuthStatus::Loading;
        self.error_message = None;
        self.authorization_url = None;
        ScreenAction::BeginLogin
    }

    /// Completion handler for the login request.
    pub fn on_login_result(&mut self, result: Result<LoginStart>) -> ScreenAction {
        match result {
            Ok(LoginStart {
                authorization_url: Some(url),
            }) => {
                info!("Received authorization URL, opening browser");
                if self.open_links {
                    if let Err(err) = open::that(&url) {
                        warn!("Failed to open browser: {err}");
                    }
                }
                self.authorization_url = Some(url);
                self.status = AuthStatus::Success;
                ScreenAction::Navigate(ScreenId::Callback)
            }
            Ok(LoginStart {
                authorization_url: None,
            }) => {
                self.status = AuthStatus::Error;
                self.error_message = Some(MISSING_AUTH_URL_MSG.to_string());
                ScreenAction::None
            }
            Err(err) => {
                self.status = AuthStatus::Error;
                self.error_message = Some(err.to_string());
                ScreenAction::None
            }
        }
    }
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for LoginScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let theme = theme();
        let (header, content, footer) = create_standard_layout(area, 4, 2);

        let title = Paragraph::new("Log in with X")
            .style(theme.title_style())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border_style()),
            );
        frame.render_widget(title, header);

        let mut lines: Vec<Line> = vec![
            Line::styled(
                "Press Enter to request an authorization URL from the backend.",
                theme.text_style(),
            ),
            Line::raw(""),
            Line::styled(
                "Your browser will open the X consent page; after approving,",
                theme.muted_style(),
            ),
            Line::styled(
                "paste the redirect URL on the next screen.",
                theme.muted_style(),
            ),
            Line::raw(""),
        ];

        match self.status {
            AuthStatus::Idle => {}
            AuthStatus::Loading => {
                lines.push(Line::styled("Requesting authorization URL...", theme.text_style()));
            }
            AuthStatus::Success => {
                lines.push(Line::styled("Redirecting to X...", theme.success_style()));
                if let Some(url) = &self.authorization_url {
                    lines.push(Line::styled(url.clone(), theme.muted_style()));
                }
            }
            AuthStatus::Error => {
                if let Some(message) = &self.error_message {
                    lines.push(Line::styled(
                        format!("Authentication error: {message}"),
                        theme.error_style(),
                    ));
                    lines.push(Line::styled("Press Enter to retry.", theme.muted_style()));
                }
            }
        }

        let body = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Authentication")
                    .border_style(theme.border_focused_style()),
            );
        frame.render_widget(body, content);

        let hint = Paragraph::new("Enter log in · Esc back · q quit")
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
                KeyCode::Enter => return Ok(self.begin_login()),
                KeyCode::Esc => return Ok(ScreenAction::Navigate(ScreenId::Home)),
                KeyCode::Char('q') => return Ok(ScreenAction::Quit),
                _ => {}
            }
        }
        Ok(ScreenAction::None)
    }

    fn on_enter(&mut self, _ctx: &ScreenContext) {
        // Per-mount state: navigating back starts a fresh lifecycle.
        self.status = AuthStatus::Idle;
        self.error_message = None;
        self.authorization_url = None;
    }
}
