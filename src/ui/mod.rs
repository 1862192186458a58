pub mod widgets;

use crate::app::{App, Tab};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

const SIDEBAR_WIDTH: u16 = 34;

pub fn render(frame: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Sidebar + content
            Constraint::Length(1), // Bottom keymap bar
        ])
        .split(frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(rows[0]);

    widgets::render_sidebar(frame, app, columns[0]);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab header
            Constraint::Min(0),    // Tab body
        ])
        .split(columns[1]);

    widgets::render_header(frame, app, main[0]);

    match app.active_tab {
        Tab::Assistant => render_chat(frame, app, main[1]),
        _ => widgets::render_directory(frame, app, main[1]),
    }

    widgets::render_bottom_bar(frame, app, rows[1]);

    if app.show_help {
        widgets::render_help_window(frame, frame.area());
    }
}

fn render_chat(frame: &mut Frame, app: &mut App, area: ratatui::layout::Rect) {
    // Width available for text is total width - 2 (for borders)
    let available_width = area.width.saturating_sub(2).max(1) as usize;
    let input_lines = app
        .conversation
        .pending_input()
        .chars()
        .count()
        .div_ceil(available_width)
        .max(1);

    // Clamp lines: Min 1, Max roughly a third of the panel
    let max_lines = (area.height as usize / 3).max(1);
    #[allow(clippy::cast_possible_truncation)]
    let input_height = (input_lines.min(max_lines) + 2) as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),            // Panel title
            Constraint::Min(0),               // Transcript
            Constraint::Length(1),            // Status line
            Constraint::Length(input_height), // Input field (dynamic height)
            Constraint::Length(1),            // Disclaimer
        ])
        .split(area);

    widgets::render_chat_title(frame, chunks[0]);
    widgets::render_chat_history(frame, app, chunks[1]);
    widgets::render_status_line(frame, app, chunks[2]);
    widgets::render_input_field(frame, app, chunks[3]);
    widgets::render_disclaimer(frame, chunks[4]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{GenerateResponse, MockTextGenerator};
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;
    use std::time::Duration;

    fn app_with(mock: MockTextGenerator) -> App {
        App::new(Arc::new(mock), Duration::from_secs(5))
    }

    fn draw(app: &mut App) -> String {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_render_every_tab_does_not_panic() {
        let mut app = app_with(MockTextGenerator::new());
        for tab in Tab::ALL {
            app.select_tab(tab);
            draw(&mut app);
        }
    }

    #[test]
    fn test_render_tiny_terminal_does_not_panic() {
        let mut app = app_with(MockTextGenerator::new());
        app.select_tab(Tab::Assistant);
        app.show_help = true;
        let backend = TestBackend::new(10, 4);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, &mut app)).unwrap();
    }

    #[test]
    fn test_academic_tab_lists_links() {
        let mut app = app_with(MockTextGenerator::new());
        let screen = draw(&mut app);
        assert!(screen.contains("https://soe.xmu.edu.cn"));
        assert!(screen.contains("https://library.xmu.edu.cn"));
    }

    #[tokio::test]
    async fn test_chat_tab_shows_transcript_and_loading() {
        let mut mock = MockTextGenerator::new();
        mock.expect_generate().times(1).returning(|_| {
            Ok(GenerateResponse {
                text: Some("Bus leaves at 7".to_string()),
            })
        });
        let mut app = app_with(mock);
        app.select_tab(Tab::Assistant);

        app.conversation.on_input_change("when is the shuttle");
        let screen = draw(&mut app);
        assert!(screen.contains("when is the shuttle"));

        app.send_message();
        let screen = draw(&mut app);
        assert!(screen.contains("when is the shuttle"));
        assert!(screen.contains(widgets::LOADING_INDICATOR));

        app.conversation.settle().await;
        let screen = draw(&mut app);
        assert!(screen.contains("Bus leaves at 7"));
        assert!(!screen.contains(widgets::LOADING_INDICATOR));
    }

    #[test]
    fn test_help_and_exit_prompt_render() {
        let mut app = app_with(MockTextGenerator::new());
        app.show_help = true;
        assert!(draw(&mut app).contains("Keyboard Shortcuts"));

        app.show_help = false;
        app.exit_pending = true;
        assert!(draw(&mut app).contains("Ctrl+C again"));
    }
}
