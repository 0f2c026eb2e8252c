use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem},
    Frame,
};

use super::formatting::truncate_to_width;
use super::theme::get_theme_colors;
use crate::app::App;

/// Suggestion popup next to the active anchor
pub fn render_mention_dropdown(frame: &mut Frame, app: &mut App, bounds: Rect) {
    let theme = get_theme_colors(app);
    if app.mentions.layout_dropdown(bounds).is_none() {
        return;
    }
    let Some((area, suggestions, list_state)) = app.mentions.dropdown_view() else {
        return;
    };

    let label_width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = suggestions
        .iter()
        .map(|s| {
            let marker = if s.avatar_url.is_some() { "●" } else { "○" };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", marker), Style::default().fg(theme.text_dim)),
                Span::styled(
                    truncate_to_width(&format!("@{}", s.username), label_width),
                    Style::default().fg(theme.text),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent))
                .style(Style::default().bg(theme.background)),
        )
        .highlight_style(
            Style::default()
                .fg(theme.primary)
                .bg(theme.highlight_bg)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(Clear, area);
    frame.render_stateful_widget(list, area, list_state);
}
