//! Home screen: static navigation to login or the dashboard.

use crate::screens::screen_trait::{Screen, ScreenAction, ScreenContext};
use crate::styles::theme;
use crate::ui::ScreenId;
use crate::utils::create_standard_layout;
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::layout::{Alignment, Rect};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap};
use ratatui::Frame;

const MENU_ITEMS: [(&str, &str); 3] = [
    ("Log in with X", "Start the backend-brokered OAuth flow"),
    ("Dashboard", "Generate and publish posts (requires a session)"),
    ("Quit", "Exit commitcast"),
];

/// Home screen controller.
pub struct HomeScreen {
    list_state: ListState,
}

impl HomeScreen {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self { list_state }
    }

    fn selected(&self) -> usize {
        self.list_state.selected().unwrap_or(0)
    }

    fn confirm(&self) -> ScreenAction {
        match self.selected() {
            0 => ScreenAction::Navigate(ScreenId::Login),
            1 => ScreenAction::Navigate(ScreenId::Dashboard),
            _ => ScreenAction::Quit,
        }
    }
}

impl Default for HomeScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for HomeScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let theme = theme();
        let (header, content, footer) = create_standard_layout(area, 4, 2);

        let title = Paragraph::new("commitcast")
            .style(theme.title_style())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border_style())
                    .padding(Padding::new(1, 1, 0, 0)),
            );
        frame.render_widget(title, header);

        let items: Vec<ListItem> = MENU_ITEMS
            .iter()
            .map(|(name, description)| {
                ListItem::new(format!("{name}  -  {description}")).style(theme.text_style())
            })
            .collect();

        let menu = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Turn GitHub commits into posts on X")
                    .border_style(theme.border_focused_style()),
            )
            .highlight_style(theme.highlight_style())
            .highlight_symbol("» ");
        frame.render_stateful_widget(menu, content, &mut self.list_state);

        let hint = Paragraph::new("↑/↓ select · Enter confirm · q quit")
            .style(theme.muted_style())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(hint, footer);
    }

    fn handle_event(&mut self, event: Event, _ctx: &ScreenContext) -> Result<ScreenAction> {
        if let Event::Key(key) = event {
            if key.kind != KeyEventKind::Press {
                return Ok(ScreenAction::None);
            }
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    let selected = self.selected();
                    if selected > 0 {
                        self.list_state.select(Some(selected - 1));
                    }
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    let selected = self.selected();
                    if selected + 1 < MENU_ITEMS.len() {
                        self.list_state.select(Some(selected + 1));
                    }
                }
                KeyCode::Enter => return Ok(self.confirm()),
                KeyCode::Char('q') | KeyCode::Esc => return Ok(ScreenAction::Quit),
                _ => {}
            }
        }
        Ok(ScreenAction::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_targets() {
        let mut screen = HomeScreen::new();
        assert_eq!(screen.confirm(), ScreenAction::Navigate(ScreenId::Login));

        screen.list_state.select(Some(1));
        assert_eq!(
            screen.confirm(),
            ScreenAction::Navigate(ScreenId::Dashboard)
        );

        screen.list_state.select(Some(2));
        assert_eq!(screen.confirm(), ScreenAction::Quit);
    }
}
