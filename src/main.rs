mod api;
mod app;
mod config;
mod content;
mod conversation;
mod events;
mod models;
mod ui;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, prelude::*};
use std::fs::OpenOptions;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use api::GeminiClient;
use app::{App, Tab};
use models::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load_config()?;
    init_logging(&config)?;
    tracing::info!(model = %config.model, "starting yanban");

    let client = GeminiClient::new(
        config.api_base_url.clone(),
        config.model.clone(),
        config::api_key_from_env(&config),
        config.request_timeout,
    )?;
    let mut app = App::new(
        Arc::new(client),
        Duration::from_secs(config.request_timeout),
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "application loop failed");
        eprintln!("Error: {err:?}");
    }

    tracing::info!("exiting");
    Ok(())
}

/// Log to a file next to the config; the terminal belongs to the UI.
fn init_logging(config: &AppConfig) -> Result<()> {
    let log_path = config::get_log_path()?;
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(log_file)),
        )
        .with(filter)
        .init();

    Ok(())
}

fn handle_keyboard_input(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
    if app.show_help {
        match key {
            KeyCode::Char('h') if modifiers.contains(KeyModifiers::CONTROL) => app.toggle_help(),
            KeyCode::Esc => app.show_help = false,
            _ => {}
        }
        return;
    }

    match key {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            if app.exit_pending {
                app.quit();
            } else {
                app.exit_pending = true;
            }
            return;
        }
        KeyCode::Esc if app.exit_pending => {
            app.exit_pending = false;
            return;
        }
        _ if app.exit_pending => {
            // Any other key cancels pending exit and is processed normally
            app.exit_pending = false;
        }
        _ => {}
    }

    match key {
        KeyCode::Char('q') if modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
        KeyCode::Char('h') if modifiers.contains(KeyModifiers::CONTROL) => app.toggle_help(),
        KeyCode::Tab => app.next_tab(),
        KeyCode::BackTab => app.previous_tab(),

        KeyCode::Up => app.scroll_up(1),
        KeyCode::Down => app.scroll_down(1),
        KeyCode::PageUp => app.scroll_up(10),
        KeyCode::PageDown => app.scroll_down(10),
        KeyCode::Home => app.scroll_to_top(),
        KeyCode::End => app.scroll_to_bottom(),

        // Editing keys only apply on the assistant tab
        KeyCode::Backspace if app.in_chat() => app.conversation.pop_input_char(),
        KeyCode::Enter if app.in_chat() => {
            app.send_message();
        }
        KeyCode::Char(c) if app.in_chat() => app.conversation.push_input_char(c),

        KeyCode::Char(c @ '1'..='5') => {
            let index = c as usize - '1' as usize;
            if let Some(tab) = Tab::from_index(index) {
                app.select_tab(tab);
            }
        }

        _ => {}
    }
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Apply any finished reply before reading input
        app.tick();

        // ~60fps keeps the loading indicator and scrolling smooth
        if event::poll(Duration::from_millis(16))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_keyboard_input(app, key.code, key.modifiers);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockTextGenerator;

    fn app() -> App {
        App::new(Arc::new(MockTextGenerator::new()), Duration::from_secs(5))
    }

    fn press(app: &mut App, key: KeyCode) {
        handle_keyboard_input(app, key, KeyModifiers::NONE);
    }

    #[test]
    fn test_ctrl_c_requires_confirmation() {
        let mut app = app();
        handle_keyboard_input(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.exit_pending);
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Esc);
        assert!(!app.exit_pending);

        handle_keyboard_input(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL);
        handle_keyboard_input(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }

    #[test]
    fn test_number_keys_switch_tabs_outside_chat() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.active_tab, Tab::Transport);
        press(&mut app, KeyCode::Char('5'));
        assert_eq!(app.active_tab, Tab::Assistant);

        // Inside the chat digits are typed, not navigated
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.active_tab, Tab::Assistant);
        assert_eq!(app.conversation.pending_input(), "1");
    }

    #[test]
    fn test_typing_only_edits_in_chat() {
        let mut app = app();
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.conversation.pending_input(), "");

        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.active_tab, Tab::Assistant);
        for c in "hey".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.conversation.pending_input(), "he");
    }

    #[test]
    fn test_enter_with_blank_input_does_nothing() {
        let mut app = app();
        app.select_tab(Tab::Assistant);
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.conversation.transcript().len(), 1);
        assert!(!app.conversation.is_awaiting_response());
    }

    #[test]
    fn test_help_window_swallows_keys() {
        let mut app = app();
        handle_keyboard_input(&mut app, KeyCode::Char('h'), KeyModifiers::CONTROL);
        assert!(app.show_help);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.active_tab, Tab::Academic);

        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
    }
}
