use huddle_types::ReactionKind;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::formatting::{format_comment_content, truncate_to_width};
use super::theme::get_theme_colors;
use crate::app::{App, Focus, COMMENT_ANCHOR};
use crate::toast::ToastLevel;

/// Post title line plus the reaction bar
pub fn render_post_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = get_theme_colors(app);

    let mut reaction_spans = Vec::new();
    for (index, kind) in ReactionKind::ALL.iter().enumerate() {
        let tally = app.reactions_state.summary.get(*kind);
        let mut style = if tally.user_reacted {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };
        if index == app.reactions_state.selected && app.focus == Focus::Comments {
            style = style.bg(theme.highlight_bg).add_modifier(Modifier::REVERSED);
        }
        let label = if tally.count > 0 {
            format!(" {} {} ", kind.emoji(), tally.count)
        } else {
            format!(" {} ", kind.emoji())
        };
        reaction_spans.push(Span::styled(label, style));
        reaction_spans.push(Span::raw(" "));
    }

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!("Post #{}", app.post_id),
                Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  on {}", app.api_client.base_url()),
                Style::default().fg(theme.text_dim),
            ),
        ]),
        Line::from(reaction_spans),
    ];

    let header = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Huddle ")
            .border_style(Style::default().fg(theme.border)),
    );
    frame.render_widget(header, area);
}

pub fn render_comments(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = get_theme_colors(app);
    let state = &mut app.comments_state;

    let title = if state.visible {
        format!(" Comments ({}) ", state.comments.len())
    } else {
        " Comments (hidden, press c) ".to_string()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(if app.focus == Focus::Comments {
            theme.primary
        } else {
            theme.border
        }));

    if !state.visible {
        frame.render_widget(block, area);
        return;
    }

    let placeholder = if state.loading {
        Some(("Loading comments...", theme.text_dim))
    } else if let Some(error) = &state.error {
        Some((error.as_str(), theme.error))
    } else if state.comments.is_empty() {
        Some(("No comments yet. Be the first to comment!", theme.text_dim))
    } else {
        None
    };
    if let Some((message, color)) = placeholder {
        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(color))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let width = area.width.saturating_sub(2) as usize;
    let items: Vec<ListItem> = state
        .comments
        .iter()
        .map(|comment| {
            let mut lines = vec![Line::from(vec![
                Span::styled(
                    format!("@{}", comment.user.username),
                    Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  {}", comment.time_ago), Style::default().fg(theme.text_dim)),
            ])];
            lines.extend(format_comment_content(&comment.content, &theme, width));
            lines.push(Line::from(""));
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(theme.highlight_bg));
    frame.render_stateful_widget(list, area, &mut state.list_state);
}

/// The comment input; records its inner area as the mention anchor
pub fn render_composer(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = get_theme_colors(app);
    let focused = app.focus == Focus::Composer;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(if focused {
            " Comment | Enter: Post | Alt+Enter: Newline | Esc: Leave "
        } else {
            " Comment (press i to write) "
        })
        .title_bottom(Line::from(format!(" {} chars ", app.composer_state.char_count())).right_aligned())
        .border_style(Style::default().fg(if focused { theme.accent } else { theme.border }));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(&app.composer_state.textarea, inner);
    app.mentions.set_anchor_area(COMMENT_ANCHOR, inner);
}

pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let theme = get_theme_colors(app);
    let hints = match app.focus {
        Focus::Comments => "?: Help | c: Comments | i: Write | 1-6: React | t: Theme | q: Quit",
        Focus::Composer => "@: Mention | Up/Down: Pick | Enter/Tab: Insert | Esc: Close",
    };
    let footer = Paragraph::new(hints)
        .style(Style::default().fg(theme.text_dim))
        .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}

/// Stack of live toasts in the top-right corner
pub fn render_toasts(frame: &mut Frame, app: &App, area: Rect) {
    let theme = get_theme_colors(app);
    let width = (area.width / 2).clamp(20, 50);
    let mut y = area.y + 1;

    for toast in app.toasts.toasts() {
        if y + 3 > area.bottom() {
            break;
        }
        let color = match toast.level {
            ToastLevel::Info => theme.primary,
            ToastLevel::Success => theme.success,
            ToastLevel::Warning => theme.warning,
            ToastLevel::Error => theme.error,
        };
        let rect = Rect::new(area.right().saturating_sub(width + 1), y, width, 3);
        let text = truncate_to_width(&toast.message, width.saturating_sub(2) as usize);
        let widget = Paragraph::new(text)
            .style(Style::default().fg(color))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .style(Style::default().bg(theme.background)),
            );
        frame.render_widget(Clear, rect);
        frame.render_widget(widget, rect);
        y += 3;
    }
}
