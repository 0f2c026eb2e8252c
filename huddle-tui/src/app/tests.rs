use super::handlers::{handle_key_event, handle_mouse_event};
use super::*;
use crate::api::client::tests::{loopback_client, serve_once};
use crate::mention::{ManualClock, Suggestion};
use crate::toast::ToastLevel;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use huddle_types::{Comment, CommentAuthor};
use ratatui::layout::Rect;

const NOW: i64 = 1_700_000_000_000;

/// Helper to create a KeyEvent
fn key_event(code: KeyCode) -> KeyEvent {
    let mut event = KeyEvent::new(code, KeyModifiers::empty());
    event.kind = KeyEventKind::Press;
    event
}

fn test_app() -> (App, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = ConfigManager::with_dir(dir.path()).unwrap();
    let clock = Arc::new(ManualClock::new(NOW));
    let app = App::with_clock(ApiClient::new("http://127.0.0.1:9"), config, 42, clock);
    (app, dir)
}

fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        handle_key_event(app, key_event(KeyCode::Char(ch))).unwrap();
    }
}

fn team() -> Vec<Suggestion> {
    ["alice", "bob", "alan", "Malory"].into_iter().map(Suggestion::new).collect()
}

fn comment(id: i64, can_delete: bool) -> Comment {
    Comment {
        id,
        content: "looks good".to_string(),
        content_html: String::new(),
        time_ago: "just now".to_string(),
        can_delete,
        user: CommentAuthor {
            id: 7,
            username: "alice".to_string(),
            profile_picture: None,
        },
    }
}

fn visible_names(app: &App) -> Vec<String> {
    app.mentions
        .session()
        .map(|s| s.items.iter().map(|i| i.username.clone()).collect())
        .unwrap_or_default()
}

#[test]
fn test_escape_closes_help_modal_first() {
    let (mut app, _dir) = test_app();
    app.show_help = true;

    handle_key_event(&mut app, key_event(KeyCode::Esc)).unwrap();

    assert!(!app.show_help, "Help modal should be closed");
    assert!(app.running, "App should still be running");
}

#[test]
fn test_question_mark_toggles_help() {
    let (mut app, _dir) = test_app();

    handle_key_event(&mut app, key_event(KeyCode::Char('?'))).unwrap();
    assert!(app.show_help, "Help modal should be open");

    handle_key_event(&mut app, key_event(KeyCode::Char('?'))).unwrap();
    assert!(!app.show_help, "Help modal should be closed");
}

#[test]
fn test_q_types_into_composer_instead_of_quitting() {
    let (mut app, _dir) = test_app();
    handle_key_event(&mut app, key_event(KeyCode::Char('i'))).unwrap();
    assert_eq!(app.focus, Focus::Composer);

    type_text(&mut app, "q");
    assert!(app.running);
    assert_eq!(app.composer_state.get_content(), "q");

    let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    handle_key_event(&mut app, ctrl_c).unwrap();
    assert!(!app.running, "Ctrl+C quits from anywhere");
}

#[test]
fn test_mention_commit_from_fresh_cache() {
    let (mut app, _dir) = test_app();
    app.mentions.prime_cache(team(), NOW);
    app.focus_composer();

    type_text(&mut app, "hi @al");

    assert!(app.take_lookup_requests().is_empty(), "fresh cache answers without a lookup");
    assert_eq!(visible_names(&app), vec!["alice", "alan", "Malory"]);

    handle_key_event(&mut app, key_event(KeyCode::Down)).unwrap();
    assert_eq!(app.mentions.active_suggestion().unwrap().username, "alan");

    handle_key_event(&mut app, key_event(KeyCode::Enter)).unwrap();

    assert_eq!(app.composer_state.get_content(), "hi @alan ");
    assert_eq!(app.composer_state.textarea.cursor(), (0, 9));
    assert!(!app.mentions.is_visible());
    assert_eq!(app.focus, Focus::Composer);
    assert!(app.pending_actions.is_empty(), "Enter on the dropdown must not submit");
}

#[test]
fn test_typing_after_commit_continues_the_comment() {
    let (mut app, _dir) = test_app();
    app.mentions.prime_cache(team(), NOW);
    app.focus_composer();

    type_text(&mut app, "@bo");
    handle_key_event(&mut app, key_event(KeyCode::Tab)).unwrap();
    type_text(&mut app, "thanks");

    assert_eq!(app.composer_state.get_content(), "@bob thanks");
    assert!(!app.mentions.is_visible());
}

#[test]
fn test_escape_closes_dropdown_before_composer() {
    let (mut app, _dir) = test_app();
    app.mentions.prime_cache(team(), NOW);
    app.focus_composer();
    type_text(&mut app, "@a");
    assert!(app.mentions.is_visible());

    handle_key_event(&mut app, key_event(KeyCode::Esc)).unwrap();
    assert!(!app.mentions.is_visible());
    assert_eq!(app.focus, Focus::Composer);
    assert_eq!(app.composer_state.get_content(), "@a");

    handle_key_event(&mut app, key_event(KeyCode::Esc)).unwrap();
    assert_eq!(app.focus, Focus::Comments);
    assert!(app.running);
}

#[test]
fn test_stale_lookup_is_not_shown() {
    let (mut app, _dir) = test_app();
    app.focus_composer();

    type_text(&mut app, "@");
    type_text(&mut app, "a");
    let requests = app.take_lookup_requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].token < requests[1].token);

    let mut requests = requests.into_iter();
    let older = requests.next().unwrap();
    let newer = requests.next().unwrap();

    app.apply_mention_lookup(older.complete(Some(team())));
    assert!(!app.mentions.is_visible(), "superseded lookup must not render");
    assert!(app.mentions.cache().entry().is_some(), "but it still refreshes the cache");

    app.apply_mention_lookup(newer.complete(Some(team())));
    assert_eq!(visible_names(&app), vec!["alice", "alan", "Malory"]);
}

#[test]
fn test_failed_lookup_leaves_dropdown_closed() {
    let (mut app, _dir) = test_app();
    app.focus_composer();
    type_text(&mut app, "@x");

    for request in app.take_lookup_requests() {
        app.apply_mention_lookup(request.complete(None));
    }
    assert!(!app.mentions.is_visible());
    assert_eq!(app.composer_state.get_content(), "@x");
}

#[test]
fn test_click_on_suggestion_commits_it() {
    let (mut app, _dir) = test_app();
    app.mentions.prime_cache(team(), NOW);
    app.focus_composer();
    type_text(&mut app, "ping @al");

    // Composer at the bottom of a 24-row screen, so the list opens above it
    app.mentions.set_anchor_area(COMMENT_ANCHOR, Rect::new(0, 20, 40, 3));
    let area = app.mentions.layout_dropdown(Rect::new(0, 0, 80, 24)).unwrap();
    assert!(area.bottom() <= 20);

    let click = MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: 2,
        row: area.y + 2,
        modifiers: KeyModifiers::empty(),
    };
    handle_mouse_event(&mut app, click).unwrap();

    assert_eq!(app.composer_state.get_content(), "ping @alan ");
    assert!(!app.mentions.is_visible());
}

#[test]
fn test_click_elsewhere_dismisses_dropdown() {
    let (mut app, _dir) = test_app();
    app.mentions.prime_cache(team(), NOW);
    app.focus_composer();
    type_text(&mut app, "@a");
    app.mentions.set_anchor_area(COMMENT_ANCHOR, Rect::new(0, 20, 40, 3));
    app.mentions.layout_dropdown(Rect::new(0, 0, 80, 24));

    let click = MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: 70,
        row: 2,
        modifiers: KeyModifiers::empty(),
    };
    handle_mouse_event(&mut app, click).unwrap();

    assert!(!app.mentions.is_visible());
    assert_eq!(app.composer_state.get_content(), "@a");
}

#[tokio::test]
async fn test_empty_comment_is_rejected_locally() {
    let (mut app, _dir) = test_app();
    app.focus_composer();
    type_text(&mut app, "   ");

    handle_key_event(&mut app, key_event(KeyCode::Enter)).unwrap();
    assert_eq!(app.pending_actions.front(), Some(&PendingAction::SubmitComment));

    app.run_pending_actions().await.unwrap();

    let toast = app.toasts.latest().unwrap();
    assert_eq!(toast.message, "Please enter a comment");
    assert_eq!(toast.level, ToastLevel::Error);
    assert!(app.comments_state.comments.is_empty());
}

#[tokio::test]
async fn test_rejected_comment_toasts_server_message() {
    let (base, server) = serve_once(
        "400 Bad Request",
        r#"{"success": false, "message": "Comment too long"}"#,
    )
    .await;
    let (mut app, _dir) = test_app();
    app.api_client = loopback_client(&base);
    app.focus_composer();
    type_text(&mut app, "hello there");

    handle_key_event(&mut app, key_event(KeyCode::Enter)).unwrap();
    app.run_pending_actions().await.unwrap();

    let toast = app.toasts.latest().unwrap();
    assert_eq!(toast.message, "Comment too long");
    assert_eq!(toast.level, ToastLevel::Error);
    assert_eq!(app.composer_state.get_content(), "hello there");
    server.await.unwrap();
}

#[test]
fn test_log_config_reaches_mention_engine() {
    let (mut app, _dir) = test_app();
    assert!(app.mentions.log_config().features.mentions);

    let mut config = crate::logging::LogConfig::default();
    config.features.mentions = false;
    app.set_log_config(config);

    assert!(!app.log_config.features.mentions);
    assert!(!app.mentions.log_config().features.mentions);

    // Muted logging does not change the mention flow
    app.mentions.prime_cache(team(), NOW);
    app.focus_composer();
    type_text(&mut app, "@al");
    assert!(app.mentions.is_visible());
}

#[test]
fn test_alt_enter_inserts_newline() {
    let (mut app, _dir) = test_app();
    app.focus_composer();
    type_text(&mut app, "one");
    handle_key_event(&mut app, KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT)).unwrap();
    type_text(&mut app, "two");

    assert_eq!(app.composer_state.get_content(), "one\ntwo");
    assert!(app.pending_actions.is_empty());
}

#[test]
fn test_comments_load_once_on_first_reveal() {
    let (mut app, _dir) = test_app();
    assert!(!app.comments_state.visible);

    handle_key_event(&mut app, key_event(KeyCode::Char('c'))).unwrap();
    assert!(app.comments_state.visible);
    assert!(app.comments_state.loading);
    assert_eq!(app.pending_actions.len(), 1);

    handle_key_event(&mut app, key_event(KeyCode::Char('c'))).unwrap();
    handle_key_event(&mut app, key_event(KeyCode::Char('c'))).unwrap();
    assert!(app.comments_state.visible);
    assert_eq!(app.pending_actions.len(), 1, "second reveal must not reload");
}

#[test]
fn test_delete_requires_confirmation() {
    let (mut app, _dir) = test_app();
    app.comments_state.comments = vec![comment(5, false), comment(6, true)];
    app.comments_state.list_state.select(Some(0));

    handle_key_event(&mut app, key_event(KeyCode::Char('d'))).unwrap();
    assert_eq!(app.comments_state.pending_delete, None);
    let toast = app.toasts.latest().unwrap();
    assert_eq!(toast.message, "You can only delete your own comments");
    assert_eq!(toast.level, ToastLevel::Warning);

    handle_key_event(&mut app, key_event(KeyCode::Char('j'))).unwrap();
    handle_key_event(&mut app, key_event(KeyCode::Char('d'))).unwrap();
    assert_eq!(app.comments_state.pending_delete, Some(6));

    handle_key_event(&mut app, key_event(KeyCode::Char('n'))).unwrap();
    assert_eq!(app.comments_state.pending_delete, None);
    assert!(app.pending_actions.is_empty());

    handle_key_event(&mut app, key_event(KeyCode::Char('d'))).unwrap();
    handle_key_event(&mut app, key_event(KeyCode::Char('y'))).unwrap();
    assert_eq!(app.pending_actions.front(), Some(&PendingAction::DeleteComment(6)));
}

#[test]
fn test_theme_toggle_is_saved_locally_and_queued() {
    let (mut app, _dir) = test_app();
    assert_eq!(app.theme, Theme::Light);

    handle_key_event(&mut app, key_event(KeyCode::Char('t'))).unwrap();

    assert_eq!(app.theme, Theme::Dark);
    assert_eq!(app.config_manager.saved_theme(), Some(Theme::Dark));
    assert_eq!(app.pending_actions.front(), Some(&PendingAction::SaveTheme(Theme::Dark)));
}

#[test]
fn test_saved_theme_wins_over_hint() {
    let (mut app, _dir) = test_app();
    app.apply_theme_hint(Some(Theme::Dark));
    assert_eq!(app.theme, Theme::Dark);

    app.config_manager.save_theme(Theme::Light).unwrap();
    app.apply_theme_hint(Some(Theme::Dark));
    assert_eq!(app.theme, Theme::Light);
}

#[test]
fn test_number_keys_toggle_reactions() {
    let (mut app, _dir) = test_app();

    handle_key_event(&mut app, key_event(KeyCode::Char('3'))).unwrap();

    assert_eq!(app.reactions_state.selected_kind(), ReactionKind::ALL[2]);
    assert_eq!(
        app.pending_actions.front(),
        Some(&PendingAction::ToggleReaction(ReactionKind::ALL[2]))
    );
}

#[test]
fn test_report_requires_reason() {
    let (mut app, _dir) = test_app();

    handle_key_event(&mut app, key_event(KeyCode::Char('R'))).unwrap();
    assert_eq!(app.report_state.as_ref().unwrap().target, ReportTarget::Post(42));

    handle_key_event(&mut app, key_event(KeyCode::Enter)).unwrap();
    assert_eq!(
        app.report_state.as_ref().unwrap().error.as_deref(),
        Some("Please select a reason")
    );
    assert!(app.pending_actions.is_empty());

    handle_key_event(&mut app, key_event(KeyCode::Down)).unwrap();
    assert_eq!(app.report_state.as_ref().unwrap().reason, Some(ReportReason::ALL[0]));

    handle_key_event(&mut app, key_event(KeyCode::Enter)).unwrap();
    assert_eq!(app.pending_actions.front(), Some(&PendingAction::SubmitReport));

    handle_key_event(&mut app, key_event(KeyCode::Esc)).unwrap();
    assert!(app.report_state.is_none());
    assert!(app.running, "Esc closes the modal, not the app");
}
