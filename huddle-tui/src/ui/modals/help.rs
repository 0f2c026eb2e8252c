use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::super::theme::get_theme_colors;
use super::utils::centered_rect;
use crate::app::{App, Focus};

type ShortcutGroup = (&'static str, Vec<(&'static str, &'static str)>);

/// Render help modal
pub fn render_help_modal(frame: &mut Frame, app: &App, area: Rect) {
    let theme = get_theme_colors(app);

    let modal_area = centered_rect(80, 85, area);
    frame.render_widget(Clear, modal_area);

    let mut lines = vec![Line::from("")];

    for (category, items) in get_shortcuts_for_context(app) {
        lines.push(Line::from(Span::styled(
            category,
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));

        for (key, description) in items {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<15}", key), Style::default().fg(theme.success)),
                Span::styled(description, Style::default().fg(theme.text)),
            ]));
        }

        lines.push(Line::from(""));
    }

    let help_content = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                )
                .title(" Keyboard Shortcuts ")
                .title_alignment(Alignment::Center)
                .style(Style::default().bg(theme.background)),
        )
        .wrap(ratatui::widgets::Wrap { trim: false });

    frame.render_widget(help_content, modal_area);
}

/// Get shortcuts relevant to current context
pub fn get_shortcuts_for_context(app: &App) -> Vec<ShortcutGroup> {
    let mut shortcuts = vec![(
        "Global",
        vec![("q / Esc", "Quit application"), ("?", "Toggle this help"), ("Ctrl+C", "Quit")],
    )];

    shortcuts.push((
        "Post",
        vec![
            ("←/h  →/l", "Select reaction"),
            ("Space/Enter", "Toggle selected reaction"),
            ("1-6", "Toggle reaction directly"),
            ("R", "Report post"),
            ("t", "Switch light/dark theme"),
        ],
    ));
    shortcuts.push((
        "Comments",
        vec![
            ("c", "Show/hide comments"),
            ("↓/j  ↑/k", "Select comment"),
            ("d", "Delete your comment"),
            ("r", "Report comment"),
            ("i / Tab", "Write a comment"),
        ],
    ));

    if app.focus == Focus::Composer {
        shortcuts.push((
            "Composer",
            vec![
                ("Enter", "Post comment"),
                ("Alt+Enter", "New line"),
                ("@name", "Mention a user"),
                ("↓/↑", "Move through suggestions"),
                ("Enter / Tab", "Insert suggestion"),
                ("Esc", "Close suggestions, then leave"),
            ],
        ));
    }

    shortcuts
}
