use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Tab};
use crate::content::{
    ACADEMIC_HIGHLIGHTS, ACADEMIC_HIGHLIGHTS_TITLE, ACADEMIC_INFO, ADMIN_SERVICES, ADMIN_TITLE,
    APP_SUBTITLE, APP_TITLE, CATEGORIES, CHAT_TAGLINE, CHAT_TITLE, DINING_HIGHLIGHTS, DISCLAIMER,
    INPUT_PLACEHOLDER, TRANSPORT_TIPS,
};
use crate::models::Role;

const XMU_BLUE: Color = Color::Rgb(0, 64, 128);

pub const LOADING_INDICATOR: &str = "· · ·";

pub fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            APP_TITLE,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        Line::from(Span::styled(APP_SUBTITLE, Style::default().fg(Color::Gray)))
            .alignment(Alignment::Center),
        Line::from(""),
    ];

    for (i, category) in CATEGORIES.iter().enumerate() {
        let selected = app.active_tab.category() == Some(category);
        let label_style = if selected {
            Style::default()
                .fg(XMU_BLUE)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", i + 1), Style::default().fg(Color::DarkGray)),
            Span::styled(format!("{} {} ", category.icon, category.label), label_style),
        ]));
        lines.push(Line::from(Span::styled(
            format!("    {}", category.description),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "© 2024 厦门大学经济学院学子项目",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(Span::styled(
        "止于至善 · 自强不息",
        Style::default().fg(Color::DarkGray),
    )));

    let sidebar = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::RIGHT)
                .border_style(Style::default().fg(XMU_BLUE)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(sidebar, area);
}

pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let (label, description) = app
        .active_tab
        .category()
        .map_or(("", ""), |c| (c.label, c.description));

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            label,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(description, Style::default().fg(Color::Gray))),
    ])
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(header, area);
}

/// Body of the four static directory tabs.
pub fn render_directory(frame: &mut Frame, app: &mut App, area: Rect) {
    let lines = match app.active_tab {
        Tab::Academic => academic_lines(),
        Tab::Dining => dining_lines(),
        Tab::Transport => transport_lines(),
        Tab::Admin => admin_lines(),
        Tab::Assistant => Vec::new(),
    };

    render_scrolled(frame, app, lines, area);
}

fn title_style() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

fn academic_lines() -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for link in ACADEMIC_INFO {
        lines.push(Line::from(Span::styled(link.title, title_style())));
        lines.push(Line::from(link.desc));
        lines.push(Line::from(Span::styled(
            format!("{} →", link.url),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        ACADEMIC_HIGHLIGHTS_TITLE,
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for item in ACADEMIC_HIGHLIGHTS {
        lines.push(Line::from(format!("  • {item}")));
    }
    lines
}

fn dining_lines() -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for hall in DINING_HIGHLIGHTS {
        lines.push(Line::from(Span::styled(
            format!("🍽️ {}", hall.name),
            title_style(),
        )));
        lines.push(Line::from(Span::styled(
            format!("推荐：{}", hall.dish),
            Style::default().fg(Color::LightRed),
        )));
        let tags: Vec<String> = hall.tags.iter().map(|tag| format!("#{tag}")).collect();
        lines.push(Line::from(Span::styled(
            tags.join("  "),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
    }
    lines
}

fn transport_lines() -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for tip in TRANSPORT_TIPS {
        lines.push(Line::from(vec![
            Span::styled("▌ ", Style::default().fg(XMU_BLUE)),
            Span::styled(tip.title, Style::default().add_modifier(Modifier::BOLD)),
        ]));
        lines.push(Line::from(format!("  {}", tip.content)));
        lines.push(Line::from(""));
    }
    lines
}

fn admin_lines() -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(ADMIN_TITLE, title_style())),
        Line::from(""),
    ];
    for service in ADMIN_SERVICES {
        lines.push(Line::from(vec![
            Span::raw(format!("{} ", service.icon)),
            Span::styled(service.title, Style::default().add_modifier(Modifier::BOLD)),
        ]));
        lines.push(Line::from(Span::styled(
            format!("   {}", service.detail),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(""));
    }
    lines
}

pub fn render_chat_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(vec![
        Span::styled("● ", Style::default().fg(Color::Green)),
        Span::styled(CHAT_TITLE, Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!("  {CHAT_TAGLINE}"), Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(title, area);
}

pub fn render_chat_history(frame: &mut Frame, app: &mut App, area: Rect) {
    let mut lines = Vec::new();

    for turn in app.conversation.transcript() {
        let (speaker, color, alignment) = match turn.role {
            Role::User => ("你", Color::Cyan, Alignment::Right),
            Role::Assistant => ("研伴", Color::Green, Alignment::Left),
        };

        lines.push(Line::from(""));
        lines.push(
            Line::from(vec![
                Span::styled(
                    speaker,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" {}", turn.timestamp_label()),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
            .alignment(alignment),
        );

        for text_line in turn.text.lines() {
            lines.push(Line::from(text_line.to_string()).alignment(alignment));
        }
    }

    if app.conversation.is_awaiting_response() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            LOADING_INDICATOR,
            Style::default().fg(Color::DarkGray),
        )));
    }

    render_scrolled(frame, app, lines, area);
}

/// Render `lines` wrapped, clamping the app's scroll offset to the content.
fn render_scrolled(frame: &mut Frame, app: &mut App, lines: Vec<Line<'static>>, area: Rect) {
    // Account for wrapping to find the true visual height
    let available_width = (area.width as usize).max(1);
    let total_visual_lines: usize = lines
        .iter()
        .map(|line| line.width().div_ceil(available_width).max(1))
        .sum();

    let visible_height = area.height as usize;
    let max_scroll = total_visual_lines.saturating_sub(visible_height);
    let actual_scroll = app.scroll_offset.min(max_scroll);

    // Sync the actual scroll back to the app state
    app.scroll_offset = actual_scroll;

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((u16::try_from(actual_scroll).unwrap_or(u16::MAX), 0));

    frame.render_widget(paragraph, area);
}

pub fn render_status_line(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = if app.conversation.is_awaiting_response() {
        (
            "研伴正在思考... 发送已暂停",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )
    } else {
        ("Enter 发送", Style::default().fg(Color::Green))
    };

    let status = Paragraph::new(text)
        .alignment(Alignment::Right)
        .style(style);

    frame.render_widget(status, area);
}

pub fn render_input_field(frame: &mut Frame, app: &App, area: Rect) {
    let pending = app.conversation.pending_input();
    let input_text = if pending.is_empty() {
        INPUT_PLACEHOLDER
    } else {
        pending
    };

    let input_style = if pending.is_empty() {
        Style::default().fg(Color::Gray)
    } else {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    };

    // Dim the border while sending is disabled
    let border_color = if app.conversation.is_awaiting_response() {
        Color::DarkGray
    } else {
        Color::Cyan
    };

    let input = Paragraph::new(input_text)
        .style(input_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(input, area);
}

pub fn render_disclaimer(frame: &mut Frame, area: Rect) {
    let disclaimer = Paragraph::new(DISCLAIMER)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        );
    frame.render_widget(disclaimer, area);
}

pub fn render_bottom_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = if app.exit_pending {
        (
            "Press Ctrl+C again to exit, Esc to cancel",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    } else if app.in_chat() {
        (
            "Ctrl+C: Quit | Ctrl+H: Help | Tab: Next section | Enter: Send",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (
            "Ctrl+C: Quit | Ctrl+H: Help | 1-5/Tab: Switch section | Up/Down: Scroll",
            Style::default().fg(Color::DarkGray),
        )
    };

    let bar = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(style);

    frame.render_widget(bar, area);
}

pub fn render_help_window(frame: &mut Frame, area: Rect) {
    let help_text = vec![
        Line::from(Span::styled(
            "厦大经院研伴 - Keyboard Shortcuts",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("General:", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  Ctrl+H        - Show/hide this help"),
        Line::from("  Ctrl+Q        - Quit application"),
        Line::from("  Ctrl+C        - Quit (press twice)"),
        Line::from(""),
        Line::from(Span::styled("Sections:", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  Tab/Shift+Tab - Next/previous section"),
        Line::from("  1-5           - Jump to section (outside chat)"),
        Line::from(""),
        Line::from(Span::styled("Assistant:", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  Enter         - Send message"),
        Line::from("  Typing        - Edit message, also while waiting"),
        Line::from(""),
        Line::from(Span::styled("Navigation:", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  Up/Down       - Scroll"),
        Line::from("  PgUp/PgDn     - Scroll faster"),
        Line::from("  Home/End      - Jump to start/end"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Ctrl+H or Esc to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    let popup_width = 56;
    let popup_height = 23;
    let x = (area.width.saturating_sub(popup_width)) / 2;
    let y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect {
        x: area.x + x,
        y: area.y + y,
        width: popup_width.min(area.width),
        height: popup_height.min(area.height),
    };

    frame.render_widget(Clear, popup_area);
    frame.render_widget(help_paragraph, popup_area);
}
