use huddle_types::{ReportReason, ReportTarget};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::super::theme::get_theme_colors;
use super::utils::centered_rect;
use crate::app::{App, ReportField};

/// Render the report modal for a post or comment
pub fn render_report_modal(frame: &mut Frame, app: &App, area: Rect) {
    let theme = get_theme_colors(app);
    let Some(report) = app.report_state.as_ref() else {
        return;
    };

    let modal_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, modal_area);

    let title = match report.target {
        ReportTarget::Post(_) => " Report Post ",
        ReportTarget::Comment(_) => " Report Comment ",
    };
    let outer_block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(theme.background));
    let inner = outer_block.inner(modal_area);
    frame.render_widget(outer_block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(ReportReason::ALL.len() as u16 + 2), // Reasons
            Constraint::Min(3),                                     // Details
            Constraint::Length(1),                                  // Error
            Constraint::Length(1),                                  // Instructions
        ])
        .split(inner);

    let focused = |field: ReportField| {
        if report.field == field {
            Style::default().fg(theme.primary)
        } else {
            Style::default().fg(theme.border)
        }
    };

    let reasons: Vec<Line> = ReportReason::ALL
        .iter()
        .map(|reason| {
            let chosen = report.reason == Some(*reason);
            let marker = if chosen { "(•) " } else { "( ) " };
            let style = if chosen {
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            Line::from(Span::styled(format!("{}{}", marker, reason.label()), style))
        })
        .collect();
    let reasons_widget = Paragraph::new(reasons).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Reason")
            .border_style(focused(ReportField::Reason)),
    );
    frame.render_widget(reasons_widget, chunks[0]);

    let details_block = Block::default()
        .borders(Borders::ALL)
        .title("Details (optional)")
        .border_style(focused(ReportField::Details));
    let details_area = details_block.inner(chunks[1]);
    frame.render_widget(details_block, chunks[1]);
    frame.render_widget(&report.details, details_area);

    if let Some(error) = &report.error {
        let error_widget = Paragraph::new(error.as_str())
            .style(Style::default().fg(theme.error))
            .alignment(Alignment::Center);
        frame.render_widget(error_widget, chunks[2]);
    }

    let instructions = Paragraph::new("↑/↓: Reason | Tab: Switch field | Enter/Ctrl+S: Submit | Esc: Cancel")
        .style(Style::default().fg(theme.text_dim))
        .alignment(Alignment::Center);
    frame.render_widget(instructions, chunks[3]);
}
