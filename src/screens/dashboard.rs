//! Dashboard screen: generate a post draft from a repository's latest
//! commit, edit it inline, and publish it.
//!
//! Two operations share one error slot and carry their own busy flag. The
//! 280-character publish gate is a client-side UX check only; the backend
//! remains the authority on acceptable length and content.

use crate::api::{PublishResult, TweetDraft};
use crate::screens::screen_trait::{Screen, ScreenAction, ScreenContext};
use crate::styles::theme;
use crate::ui::{Language, ScreenId};
use crate::utils::{create_standard_layout, TextInput};
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use tracing::info;

/// Fixed error for a generate attempt without a repository.
pub const EMPTY_REPOSITORY_MSG: &str = "Enter a repository (owner/name) first";

/// Maximum post length enforced by the publish gate.
pub const MAX_POST_CHARS: usize = 280;

/// Input focus within the dashboard form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Repository,
    Language,
    PostText,
}

/// Dashboard screen controller.
pub struct DashboardScreen {
    repository: TextInput,
    language: Language,
    post_text: TextInput,
    focused_field: Field,
    is_generating: bool,
    is_posting: bool,
    draft: Option<TweetDraft>,
    post_result: Option<PublishResult>,
    error: Option<String>,
}

impl DashboardScreen {
    pub fn new(language: Language) -> Self {
        Self {
            repository: TextInput::new(),
            language,
            post_text: TextInput::new(),
            focused_field: Field::Repository,
            is_generating: false,
            is_posting: false,
            draft: None,
            post_result: None,
            error: None,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn draft(&self) -> Option<&TweetDraft> {
        self.draft.as_ref()
    }

    pub fn post_result(&self) -> Option<&PublishResult> {
        self.post_result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn post_text(&self) -> &str {
        self.post_text.text()
    }

    pub fn is_generating(&self) -> bool {
        self.is_generating
    }

    pub fn is_posting(&self) -> bool {
        self.is_posting
    }

    /// Replace the editable text (testing and programmatic edits).
    pub fn set_post_text(&mut self, text: impl Into<String>) {
        self.post_text.set_text(text);
    }

    /// Set the repository input (testing and programmatic use).
    pub fn set_repository(&mut self, repository: impl Into<String>) {
        self.repository.set_text(repository);
    }

    /// The publish gate: trimmed text length must be in `1..=280` chars.
    pub fn is_publishable(&self) -> bool {
        let len = self.post_text.trimmed_len();
        (1..=MAX_POST_CHARS).contains(&len)
    }

    /// Start the generate operation.
    ///
    /// An empty (post-trim) repository fails locally without any network
    /// call. A successful start clears the prior draft, result and error.
    pub fn generate(&mut self) -> ScreenAction {
        if self.is_generating {
            return ScreenAction::None;
        }
        let repository = self.repository.text_trimmed().to_string();
        if repository.is_empty() {
            self.error = Some(EMPTY_REPOSITORY_MSG.to_string());
            return ScreenAction::None;
        }

        self.error = None;
        self.draft = None;
        self.post_result = None;
        self.post_text.clear();
        self.is_generating = true;
        info!("Generating draft for {repository}");
        ScreenAction::GenerateDraft {
            repository,
            language: self.language,
        }
    }

    /// Completion handler for the generate request.
    pub fn on_generate_result(&mut self, result: Result<TweetDraft>) -> ScreenAction {
        self.is_generating = false;
        match result {
            Ok(draft) => {
                // The editable field is seeded with the generated text
                // verbatim; edits never touch the stored draft.
                self.post_text.set_text(draft.tweet_text.clone());
                self.draft = Some(draft);
                self.focused_field = Field::PostText;
            }
            Err(err) => self.error = Some(err.to_string()),
        }
        ScreenAction::None
    }

    /// Start the publish operation with the edited text.
    ///
    /// A no-op without a draft, with empty text, outside the length gate, or
    /// while a publish is already in flight.
    pub fn publish(&mut self) -> ScreenAction {
        if self.is_posting || self.draft.is_none() || !self.is_publishable() {
            return ScreenAction::None;
        }

        self.error = None;
        self.post_result = None;
        self.is_posting = true;
        // The edited text is sent, not the stored draft.
        ScreenAction::PublishPost {
            text: self.post_text.text().to_string(),
        }
    }

    /// Completion handler for the publish request.
    pub fn on_publish_result(&mut self, result: Result<PublishResult>) -> ScreenAction {
        self.is_posting = false;
        match result {
            Ok(outcome) => {
                info!(
                    "Publish finished: success={} id={:?}",
                    outcome.success, outcome.tweet_id
                );
                self.post_result = Some(outcome);
            }
            Err(err) => self.error = Some(err.to_string()),
        }
        ScreenAction::None
    }

    fn cycle_focus(&mut self, forward: bool) {
        self.focused_field = match (self.focused_field, forward) {
            (Field::Repository, true) => Field::Language,
            (Field::Language, true) => Field::PostText,
            (Field::PostText, true) => Field::Repository,
            (Field::Repository, false) => Field::PostText,
            (Field::Language, false) => Field::Repository,
            (Field::PostText, false) => Field::Language,
        };
    }

    fn border_for(&self, field: Field) -> ratatui::style::Style {
        let theme = theme();
        if self.focused_field == field {
            theme.border_focused_style()
        } else {
            theme.border_style()
        }
    }
}

impl Screen for DashboardScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let theme = theme();
        let (header, content, footer) = create_standard_layout(area, 4, 2);

        let title = Paragraph::new("Dashboard - generate and publish")
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
            .constraints([
                Constraint::Length(3), // repository
                Constraint::Length(3), // language
                Constraint::Min(6),    // draft editor
                Constraint::Length(5), // result / error
            ])
            .split(content);

        let repository = Paragraph::new(self.repository.text())
            .style(theme.text_style())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Repository (owner/name)")
                    .border_style(self.border_for(Field::Repository)),
            );
        frame.render_widget(repository, chunks[0]);
        if self.focused_field == Field::Repository {
            frame.set_cursor_position((
                chunks[0].x + 1 + self.repository.cursor() as u16,
                chunks[0].y + 1,
            ));
        }

        let language = Paragraph::new(format!("{} (←/→ to change)", self.language))
            .style(theme.text_style())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Language")
                    .border_style(self.border_for(Field::Language)),
            );
        frame.render_widget(language, chunks[1]);

        let char_count = self.post_text.text().chars().count();
        let counter_style = if char_count > MAX_POST_CHARS {
            theme.error_style()
        } else {
            theme.muted_style()
        };
        let editor_title = format!("Post text ({char_count}/{MAX_POST_CHARS})");
        let mut editor_lines = vec![Line::styled(self.post_text.text().to_string(), theme.text_style())];
        if let Some(draft) = &self.draft {
            editor_lines.push(Line::raw(""));
            editor_lines.push(Line::styled(
                format!("From commit: {}", draft.commit_message),
                theme.muted_style(),
            ));
            editor_lines.push(Line::styled(
                format!("Repository:  {}", draft.repository),
                theme.muted_style(),
            ));
        } else if self.is_generating {
            editor_lines.push(Line::styled(
                "Generating draft from the latest commit...",
                theme.muted_style(),
            ));
        } else {
            editor_lines.push(Line::styled(
                "No draft yet. Enter a repository and press Enter or Ctrl+G.",
                theme.muted_style(),
            ));
        }
        let editor = Paragraph::new(editor_lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .title(Line::styled(editor_title, counter_style))
                .border_style(self.border_for(Field::PostText)),
        );
        frame.render_widget(editor, chunks[2]);

        let mut status_lines: Vec<Line> = Vec::new();
        if self.is_posting {
            status_lines.push(Line::styled("Publishing...", theme.text_style()));
        }
        if let Some(result) = &self.post_result {
            let style = if result.success {
                theme.success_style()
            } else {
                theme.error_style()
            };
            status_lines.push(Line::styled(result.message.clone(), style));
            if let Some(id) = &result.tweet_id {
                status_lines.push(Line::styled(
                    format!("Post ID: {id}"),
                    theme.muted_style(),
                ));
            }
        }
        if let Some(error) = &self.error {
            status_lines.push(Line::styled(error.clone(), theme.error_style()));
        }
        if status_lines.is_empty() {
            let publish_hint = if self.is_publishable() {
                Line::styled("Ctrl+P publish the edited text", theme.text_style())
            } else {
                Line::styled(
                    "Publish disabled: text must be 1-280 characters",
                    theme.disabled_style(),
                )
            };
            status_lines.push(publish_hint);
        }
        let status = Paragraph::new(status_lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Result")
                .border_style(theme.border_style()),
        );
        frame.render_widget(status, chunks[3]);

        let hint =
            Paragraph::new("Tab focus · Enter/Ctrl+G generate · Ctrl+P publish · Esc log out")
                .style(theme.muted_style())
                .alignment(Alignment::Center);
        frame.render_widget(hint, footer);
    }

    fn handle_event(&mut self, event: Event, _ctx: &ScreenContext) -> Result<ScreenAction> {
        if let Event::Key(key) = event {
            if key.kind != KeyEventKind::Press {
                return Ok(ScreenAction::None);
            }

            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match key.code {
                    KeyCode::Char('g') => return Ok(self.generate()),
                    KeyCode::Char('p') => return Ok(self.publish()),
                    _ => return Ok(ScreenAction::None),
                }
            }

            match key.code {
                KeyCode::Tab => self.cycle_focus(true),
                KeyCode::BackTab => self.cycle_focus(false),
                KeyCode::Esc => return Ok(ScreenAction::Navigate(ScreenId::Login)),
                KeyCode::Enter => match self.focused_field {
                    Field::Repository | Field::Language => return Ok(self.generate()),
                    Field::PostText => return Ok(self.publish()),
                },
                code => match self.focused_field {
                    Field::Repository => {
                        self.repository.handle_key(code);
                    }
                    Field::Language => {
                        if matches!(
                            code,
                            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')
                        ) {
                            self.language = self.language.toggled();
                        }
                    }
                    Field::PostText => {
                        self.post_text.handle_key(code);
                    }
                },
            }
        }
        Ok(ScreenAction::None)
    }

    fn is_input_focused(&self) -> bool {
        matches!(self.focused_field, Field::Repository | Field::PostText)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    fn draft() -> TweetDraft {
        TweetDraft {
            tweet_text: "Fixed the bug".to_string(),
            commit_message: "fix: bug".to_string(),
            repository: "octocat/Hello-World".to_string(),
        }
    }

    #[test]
    fn test_generate_requires_repository() {
        let mut screen = DashboardScreen::new(Language::En);
        assert_eq!(screen.generate(), ScreenAction::None);
        assert_eq!(screen.error(), Some(EMPTY_REPOSITORY_MSG));

        screen.set_repository("   ");
        assert_eq!(screen.generate(), ScreenAction::None);
        assert_eq!(screen.error(), Some(EMPTY_REPOSITORY_MSG));
    }

    #[test]
    fn test_generate_trims_repository_and_clears_prior_state() {
        let mut screen = DashboardScreen::new(Language::En);
        screen.set_repository("  octocat/Hello-World  ");
        screen.on_generate_result(Ok(draft()));
        screen.on_publish_result(Ok(PublishResult {
            success: true,
            tweet_id: Some("1".to_string()),
            message: "ok".to_string(),
        }));

        let action = screen.generate();
        assert_eq!(
            action,
            ScreenAction::GenerateDraft {
                repository: "octocat/Hello-World".to_string(),
                language: Language::En,
            }
        );
        assert!(screen.is_generating());
        assert!(screen.draft().is_none());
        assert!(screen.post_result().is_none());
        assert_eq!(screen.error(), None);
        assert_eq!(screen.post_text(), "");
    }

    #[test]
    fn test_generate_result_seeds_editable_text_verbatim() {
        let mut screen = DashboardScreen::new(Language::En);
        screen.set_repository("octocat/Hello-World");
        screen.generate();
        screen.on_generate_result(Ok(draft()));

        assert!(!screen.is_generating());
        assert_eq!(screen.post_text(), "Fixed the bug");
        assert_eq!(screen.draft().unwrap().commit_message, "fix: bug");
    }

    #[test]
    fn test_generate_failure_clears_busy_flag() {
        let mut screen = DashboardScreen::new(Language::Ja);
        screen.set_repository("octocat/Hello-World");
        screen.generate();
        screen.on_generate_result(Err(anyhow!("Rate limit exceeded")));

        assert!(!screen.is_generating());
        assert_eq!(screen.error(), Some("Rate limit exceeded"));
    }

    #[test]
    fn test_is_publishable_bounds() {
        let mut screen = DashboardScreen::new(Language::En);
        assert!(!screen.is_publishable());

        screen.set_post_text("   ");
        assert!(!screen.is_publishable());

        screen.set_post_text("a");
        assert!(screen.is_publishable());

        screen.set_post_text("x".repeat(280));
        assert!(screen.is_publishable());

        screen.set_post_text("x".repeat(281));
        assert!(!screen.is_publishable());

        // Trimming applies before the length check.
        screen.set_post_text(format!("  {}  ", "x".repeat(280)));
        assert!(screen.is_publishable());
    }

    #[test]
    fn test_publish_requires_draft_and_gate() {
        let mut screen = DashboardScreen::new(Language::En);
        screen.set_post_text("hello");
        // No draft yet: publish is a no-op.
        assert_eq!(screen.publish(), ScreenAction::None);

        screen.set_repository("octocat/Hello-World");
        screen.generate();
        screen.on_generate_result(Ok(draft()));

        screen.set_post_text("x".repeat(281));
        assert_eq!(screen.publish(), ScreenAction::None);
        assert!(!screen.is_posting());
    }

    #[test]
    fn test_publish_sends_edited_text() {
        let mut screen = DashboardScreen::new(Language::En);
        screen.set_repository("octocat/Hello-World");
        screen.generate();
        screen.on_generate_result(Ok(draft()));

        screen.set_post_text("Fixed the bug, shipped in v1.2");
        let action = screen.publish();
        assert_eq!(
            action,
            ScreenAction::PublishPost {
                text: "Fixed the bug, shipped in v1.2".to_string(),
            }
        );
        assert!(screen.is_posting());

        // In-flight publish refuses to double-fire.
        assert_eq!(screen.publish(), ScreenAction::None);

        screen.on_publish_result(Ok(PublishResult {
            success: true,
            tweet_id: Some("1790".to_string()),
            message: "Posted".to_string(),
        }));
        assert!(!screen.is_posting());
        assert_eq!(screen.post_result().unwrap().tweet_id.as_deref(), Some("1790"));
    }

    #[test]
    fn test_publish_failure_surfaces_message() {
        let mut screen = DashboardScreen::new(Language::En);
        screen.set_repository("octocat/Hello-World");
        screen.generate();
        screen.on_generate_result(Ok(draft()));

        screen.publish();
        screen.on_publish_result(Err(anyhow!("Duplicate post")));
        assert!(!screen.is_posting());
        assert_eq!(screen.error(), Some("Duplicate post"));
        assert!(screen.post_result().is_none());
    }
}
