use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use super::theme::ThemeColors;

/// Wrap a comment body and highlight its `@mentions`
pub fn format_comment_content(content: &str, theme: &ThemeColors, max_width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![];
    let wrap_width = max_width.saturating_sub(4).max(1);

    for line in content.lines() {
        for wrapped_line in textwrap::wrap(line, wrap_width) {
            let mut spans = vec![Span::raw("  ")]; // Indent
            let mut current_word = String::new();
            let mut whitespace_buffer = String::new();

            for ch in wrapped_line.chars() {
                if ch.is_whitespace() {
                    if !current_word.is_empty() {
                        push_styled_word(&mut spans, &current_word, theme);
                        current_word.clear();
                    }
                    whitespace_buffer.push(ch);
                } else {
                    if !whitespace_buffer.is_empty() {
                        spans.push(Span::raw(std::mem::take(&mut whitespace_buffer)));
                    }
                    current_word.push(ch);
                }
            }

            if !current_word.is_empty() {
                push_styled_word(&mut spans, &current_word, theme);
            }
            lines.push(Line::from(spans));
        }
    }

    lines
}

fn push_styled_word(spans: &mut Vec<Span<'static>>, word: &str, theme: &ThemeColors) {
    let style = if word.starts_with('@') && word.len() > 1 {
        Style::default().fg(theme.primary).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };
    spans.push(Span::styled(word.to_string(), style));
}

/// Cut `text` to at most `max_width` terminal columns, ending in `…` when cut
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::colors_for;
    use huddle_types::Theme;

    #[test]
    fn test_mentions_are_highlighted() {
        let theme = colors_for(Theme::Light);
        let lines = format_comment_content("thanks @alice!", &theme, 80);
        assert_eq!(lines.len(), 1);
        let mention = lines[0]
            .spans
            .iter()
            .find(|s| s.content.starts_with('@'))
            .unwrap();
        assert_eq!(mention.style.fg, Some(theme.primary));
        assert!(mention.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("alice", 10), "alice");
        assert_eq!(truncate_to_width("alexandria", 6), "alexa…");
    }
}
