use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::super::theme::get_theme_colors;
use super::utils::centered_rect;
use crate::app::App;

/// Render the y/n prompt shown before a comment is deleted
pub fn render_delete_confirmation_modal(frame: &mut Frame, app: &App, area: Rect) {
    let theme = get_theme_colors(app);

    let modal_area = centered_rect(50, 25, area);
    frame.render_widget(Clear, modal_area);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Are you sure you want to delete this comment?",
            Style::default().fg(theme.text),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "Y",
                Style::default()
                    .fg(theme.error)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(": Delete  ", Style::default().fg(theme.text)),
            Span::styled(
                "N / Esc",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(": Cancel", Style::default().fg(theme.text)),
        ]),
    ];

    let modal = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .title(" Delete Comment ")
            .borders(Borders::ALL)
            .border_style(
                Style::default()
                    .fg(theme.warning)
                    .add_modifier(Modifier::BOLD),
            )
            .style(Style::default().bg(theme.background)),
    );

    frame.render_widget(modal, modal_area);
}
