//! Bridge between `TextArea` (row/column in chars) and flat text with a byte caret
use tui_textarea::{CursorMove, TextArea};

/// Flatten the textarea into one string and the caret into a byte offset
pub fn snapshot(textarea: &TextArea<'_>) -> (String, usize) {
    let (row, col) = textarea.cursor();
    let lines = textarea.lines();
    let text = lines.join("\n");

    let mut offset = 0;
    for line in lines.iter().take(row) {
        offset += line.len() + 1;
    }
    if let Some(line) = lines.get(row) {
        offset += line
            .char_indices()
            .nth(col)
            .map(|(byte, _)| byte)
            .unwrap_or(line.len());
    }

    let caret = offset.min(text.len());
    (text, caret)
}

/// Row/column (in chars) of a byte offset within flat text
pub fn cursor_for_offset(text: &str, offset: usize) -> (usize, usize) {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    let before = &text[..offset];
    let row = before.matches('\n').count();
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let col = before[line_start..].chars().count();
    (row, col)
}

/// Replace the textarea content and place the caret at `caret` (bytes)
///
/// Styles are reapplied by the caller; `TextArea::from` starts unstyled.
pub fn replace(textarea: &mut TextArea<'static>, text: &str, caret: usize) {
    let (row, col) = cursor_for_offset(text, caret);
    *textarea = TextArea::from(text.split('\n').map(str::to_string));
    textarea.set_hard_tab_indent(true);
    textarea.move_cursor(CursorMove::Jump(row as u16, col as u16));
}
