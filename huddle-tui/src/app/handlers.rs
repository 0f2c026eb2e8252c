use crate::app::state::{App, Focus, PendingAction, ReportField, COMMENT_ANCHOR};
use crate::mention::PointerOutcome;
use crate::log_key_event;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use huddle_types::{ReactionKind, ReportTarget};
use tui_textarea::Input;

pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.kind != KeyEventKind::Press {
        return Ok(());
    }
    log_key_event!(app.log_config, "Key {:?} with focus {:?}", key.code, app.focus);

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return Ok(());
    }

    // Priority 1: Help modal (highest priority)
    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            app.toggle_help();
        }
        return Ok(());
    }

    // Priority 2: Report modal
    if app.report_state.is_some() {
        return handle_report_keys(app, key);
    }

    // Priority 3: Delete confirmation
    if app.comments_state.pending_delete.is_some() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_delete(),
            _ => {}
        }
        return Ok(());
    }

    // Priority 4: Composer; the mention dropdown gets first look inside
    if app.focus == Focus::Composer {
        app.handle_composer_input(key);
        return Ok(());
    }

    handle_comments_keys(app, key)
}

pub fn handle_comments_keys(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('?') => app.toggle_help(),
        KeyCode::Char('c') | KeyCode::Char('C') => app.toggle_comments(),
        KeyCode::Char('i') | KeyCode::Tab => app.focus_composer(),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => app.next_comment(),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => app.previous_comment(),
        KeyCode::Char('t') | KeyCode::Char('T') => app.toggle_theme(),
        KeyCode::Char('d') | KeyCode::Char('D') => app.request_delete_selected_comment(),
        KeyCode::Char('r') => {
            let id = app.comments_state.selected_comment().map(|c| c.id);
            if let Some(id) = id {
                app.open_report(ReportTarget::Comment(id));
            }
        }
        KeyCode::Char('R') => {
            let post_id = app.post_id;
            app.open_report(ReportTarget::Post(post_id));
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => app.previous_reaction(),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => app.next_reaction(),
        KeyCode::Char(' ') | KeyCode::Enter => {
            let kind = app.reactions_state.selected_kind();
            app.queue_action(PendingAction::ToggleReaction(kind));
        }
        KeyCode::Char(digit @ '1'..='6') => {
            let index = digit as usize - '1' as usize;
            app.reactions_state.selected = index;
            app.queue_action(PendingAction::ToggleReaction(ReactionKind::ALL[index]));
        }
        _ => {}
    }
    Ok(())
}

fn handle_report_keys(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.code == KeyCode::Esc {
        app.close_report();
        return Ok(());
    }
    if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.request_report_submit();
        return Ok(());
    }

    let field = match app.report_state.as_ref() {
        Some(report) => report.field,
        None => return Ok(()),
    };

    match (field, key.code) {
        (_, KeyCode::Tab) | (_, KeyCode::BackTab) => {
            if let Some(report) = app.report_state.as_mut() {
                report.field = match report.field {
                    ReportField::Reason => ReportField::Details,
                    ReportField::Details => ReportField::Reason,
                };
            }
        }
        (ReportField::Reason, KeyCode::Down | KeyCode::Char('j')) => app.cycle_report_reason(true),
        (ReportField::Reason, KeyCode::Up | KeyCode::Char('k')) => app.cycle_report_reason(false),
        (ReportField::Reason, KeyCode::Enter) => app.request_report_submit(),
        (ReportField::Details, _) => {
            if let Some(report) = app.report_state.as_mut() {
                report.details.input(Input::from(crossterm::event::Event::Key(key)));
            }
        }
        _ => {}
    }
    Ok(())
}

/// Pointer input; only a left-button press matters
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) -> Result<()> {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return Ok(());
    }
    if app.show_help || app.report_state.is_some() {
        return Ok(());
    }

    match app.mentions.handle_pointer_down(mouse.column, mouse.row) {
        PointerOutcome::Select { anchor, username } => {
            app.commit_mention(anchor, &username);
        }
        PointerOutcome::Ignored | PointerOutcome::Dismissed => {
            if app.mentions.anchor_at(mouse.column, mouse.row) == Some(COMMENT_ANCHOR) {
                app.focus_composer();
            }
        }
    }
    Ok(())
}
