use std::sync::Arc;
use std::time::Duration;

use crate::api::TextGenerator;
use crate::content::{self, Category};
use crate::conversation::ConversationManager;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Academic,
    Dining,
    Transport,
    Admin,
    Assistant,
}

impl Tab {
    pub const ALL: [Self; 5] = [
        Self::Academic,
        Self::Dining,
        Self::Transport,
        Self::Admin,
        Self::Assistant,
    ];

    pub const fn path(self) -> &'static str {
        match self {
            Self::Academic => "academic",
            Self::Dining => "dining",
            Self::Transport => "transport",
            Self::Admin => "admin",
            Self::Assistant => "ai-assistant",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&t| t == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn category(self) -> Option<&'static Category> {
        content::category(self.path())
    }
}

pub struct App {
    pub active_tab: Tab,
    pub should_quit: bool,
    pub show_help: bool,
    pub exit_pending: bool,
    pub scroll_offset: usize,
    pub conversation: ConversationManager,
}

impl App {
    pub fn new(generator: Arc<dyn TextGenerator>, reply_timeout: Duration) -> Self {
        Self {
            active_tab: Tab::Academic,
            should_quit: false,
            show_help: false,
            exit_pending: false,
            scroll_offset: 0,
            conversation: ConversationManager::new(generator, reply_timeout),
        }
    }

    pub const fn quit(&mut self) {
        self.should_quit = true;
    }

    pub const fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn select_tab(&mut self, tab: Tab) {
        if self.active_tab != tab {
            tracing::debug!(tab = tab.path(), "switching tab");
            self.active_tab = tab;
            self.scroll_offset = if tab == Tab::Assistant { usize::MAX } else { 0 };
        }
    }

    pub fn next_tab(&mut self) {
        self.select_tab(self.active_tab.next());
    }

    pub fn previous_tab(&mut self) {
        self.select_tab(self.active_tab.previous());
    }

    pub fn in_chat(&self) -> bool {
        self.active_tab == Tab::Assistant
    }

    /// Submit the chat input; keeps the view pinned to the newest turn.
    pub fn send_message(&mut self) -> bool {
        let sent = self.conversation.on_submit();
        if sent {
            self.scroll_to_bottom();
        }
        sent
    }

    /// Apply a finished reply, if any. Called once per frame.
    pub fn tick(&mut self) {
        if self.conversation.poll_resolution() && self.in_chat() {
            self.scroll_to_bottom();
        }
    }

    pub const fn scroll_up(&mut self, amount: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
    }

    pub const fn scroll_down(&mut self, amount: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(amount);
    }

    pub const fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    pub const fn scroll_to_bottom(&mut self) {
        // Clamped to the real maximum when the view is rendered
        self.scroll_offset = usize::MAX;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{GenerateResponse, MockTextGenerator};
    use crate::models::Role;

    fn app(mock: MockTextGenerator) -> App {
        App::new(Arc::new(mock), Duration::from_secs(5))
    }

    #[test]
    fn test_app_new() {
        let app = app(MockTextGenerator::new());
        assert_eq!(app.active_tab, Tab::Academic);
        assert!(!app.should_quit);
        assert!(!app.show_help);
        assert_eq!(app.conversation.transcript().len(), 1);
    }

    #[test]
    fn test_app_quit() {
        let mut app = app(MockTextGenerator::new());
        app.quit();
        assert!(app.should_quit);
    }

    #[test]
    fn test_toggle_help() {
        let mut app = app(MockTextGenerator::new());
        app.toggle_help();
        assert!(app.show_help);
        app.toggle_help();
        assert!(!app.show_help);
    }

    #[test]
    fn test_every_tab_has_a_category() {
        for tab in Tab::ALL {
            assert!(tab.category().is_some(), "{tab:?} has no category");
        }
        assert_eq!(Tab::ALL.len(), content::CATEGORIES.len());
    }

    #[test]
    fn test_tab_cycling_wraps() {
        assert_eq!(Tab::Assistant.next(), Tab::Academic);
        assert_eq!(Tab::Academic.previous(), Tab::Assistant);
        assert_eq!(Tab::Dining.next(), Tab::Transport);
        assert_eq!(Tab::from_index(4), Some(Tab::Assistant));
        assert_eq!(Tab::from_index(5), None);
    }

    #[test]
    fn test_select_tab_resets_scroll() {
        let mut app = app(MockTextGenerator::new());
        app.scroll_offset = 7;
        app.next_tab();
        assert_eq!(app.active_tab, Tab::Dining);
        assert_eq!(app.scroll_offset, 0);

        app.select_tab(Tab::Assistant);
        assert!(app.in_chat());
        assert_eq!(app.scroll_offset, usize::MAX);
    }

    #[test]
    fn test_scroll_up_saturates() {
        let mut app = app(MockTextGenerator::new());
        app.scroll_offset = 10;
        app.scroll_up(3);
        assert_eq!(app.scroll_offset, 7);
        app.scroll_up(10);
        assert_eq!(app.scroll_offset, 0);
    }

    #[test]
    fn test_scroll_down_and_bounds() {
        let mut app = app(MockTextGenerator::new());
        app.scroll_down(3);
        assert_eq!(app.scroll_offset, 3);
        app.scroll_to_bottom();
        assert_eq!(app.scroll_offset, usize::MAX);
        app.scroll_down(1);
        assert_eq!(app.scroll_offset, usize::MAX);
        app.scroll_to_top();
        assert_eq!(app.scroll_offset, 0);
    }

    #[tokio::test]
    async fn test_send_message_and_tick() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate().times(1).returning(|_| {
            Ok(GenerateResponse {
                text: Some("勤业沙茶面".to_string()),
            })
        });
        let mut app = app(mock);
        app.select_tab(Tab::Assistant);
        app.conversation.on_input_change("推荐什么?");

        assert!(app.send_message());
        assert!(!app.send_message());

        for _ in 0..200 {
            app.tick();
            if !app.conversation.is_awaiting_response() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        let last = app.conversation.transcript().last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(last.text, "勤业沙茶面");
    }
}
