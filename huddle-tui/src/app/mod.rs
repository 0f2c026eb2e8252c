use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use huddle_types::{ReactionKind, ReportReason, ReportTarget, Theme};
use ratatui::style::Style;
use tui_textarea::{Input, TextArea};

use crate::api::ApiClient;
use crate::config::ConfigManager;
use crate::mention::{AnchorId, Clock, KeyOutcome, LookupRequest, LookupResult, MentionEngine, SystemClock};
use crate::toast::ToastQueue;
use crate::{log_api_call, log_mentions, log_settings};

pub mod state;
pub use state::*;
pub mod handlers;

#[cfg(test)]
mod tests;

impl App {
    pub fn new(api_client: ApiClient, config_manager: ConfigManager, post_id: i64) -> Self {
        Self::with_clock(api_client, config_manager, post_id, Arc::new(SystemClock))
    }

    /// Build an app whose mention cache reads time from `clock`
    pub fn with_clock(
        api_client: ApiClient,
        config_manager: ConfigManager,
        post_id: i64,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let mut mentions = MentionEngine::new(clock);
        mentions.register_anchor(COMMENT_ANCHOR);

        let theme = config_manager.saved_theme().unwrap_or_default();

        let mut app = Self {
            running: true,
            post_id,
            api_client,
            config_manager,
            theme,
            focus: Focus::Comments,
            show_help: false,
            composer_state: ComposerState::new(),
            comments_state: CommentsState::default(),
            reactions_state: ReactionsState::default(),
            report_state: None,
            mentions,
            pending_lookups: Vec::new(),
            pending_actions: VecDeque::new(),
            toasts: ToastQueue::default(),
            log_config: crate::logging::LogConfig::default(),
        };
        let mut textarea = std::mem::take(&mut app.composer_state.textarea);
        app.apply_composer_styling(&mut textarea);
        app.composer_state.textarea = textarea;
        app
    }

    /// Use `config` for the app's own logs and the mention engine's
    pub fn set_log_config(&mut self, config: crate::logging::LogConfig) {
        self.mentions.set_log_config(config.clone());
        self.log_config = config;
    }

    /// Pick the startup theme: locally saved, then the hint, then light
    pub fn apply_theme_hint(&mut self, hint: Option<Theme>) {
        self.theme = self
            .config_manager
            .saved_theme()
            .or(hint)
            .unwrap_or_default();
        self.restyle_composer();
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn clear_expired_toasts(&mut self) {
        self.toasts.clear_expired(Instant::now());
    }

    // ============================================================================
    // COMPOSER + MENTIONS
    // ============================================================================

    pub fn focus_composer(&mut self) {
        self.focus = Focus::Composer;
    }

    pub fn blur_composer(&mut self) {
        self.mentions.deactivate();
        self.focus = Focus::Comments;
    }

    fn apply_composer_styling(&self, textarea: &mut TextArea) {
        let theme = crate::ui::theme::get_theme_colors(self);
        textarea.set_style(Style::default().fg(theme.text));
        textarea.set_cursor_style(Style::default().fg(theme.background).bg(theme.primary));
        textarea.set_cursor_line_style(Style::default());
    }

    fn restyle_composer(&mut self) {
        let mut textarea = std::mem::take(&mut self.composer_state.textarea);
        self.apply_composer_styling(&mut textarea);
        self.composer_state.textarea = textarea;
    }

    /// Composer keys: the dropdown sees them first, then the textarea
    pub fn handle_composer_input(&mut self, key: KeyEvent) {
        match self.mentions.handle_key(&key) {
            KeyOutcome::Consumed => return,
            KeyOutcome::Select { anchor, username } => {
                self.commit_mention(anchor, &username);
                return;
            }
            KeyOutcome::Ignored => {}
        }

        match key.code {
            KeyCode::Esc => {
                self.blur_composer();
            }
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => {
                self.composer_state.textarea.insert_newline();
                self.on_composer_changed();
            }
            KeyCode::Enter => {
                self.queue_action(PendingAction::SubmitComment);
            }
            _ => {
                let modified = self
                    .composer_state
                    .textarea
                    .input(Input::from(crossterm::event::Event::Key(key)));
                if modified {
                    self.on_composer_changed();
                }
            }
        }
    }

    /// Run mention detection against the composer's text and caret
    pub fn on_composer_changed(&mut self) {
        let (text, caret) = crate::textarea_text::snapshot(&self.composer_state.textarea);
        if let Some(request) = self.mentions.on_text_changed(COMMENT_ANCHOR, &text, caret) {
            log_mentions!(self.log_config, "Queued lookup #{} for @{}", request.token, request.prefix);
            self.pending_lookups.push(request);
        }
    }

    /// Splice a chosen username into `anchor` and give it focus back
    pub fn commit_mention(&mut self, anchor: AnchorId, username: &str) {
        if anchor != COMMENT_ANCHOR {
            self.mentions.deactivate();
            return;
        }
        let (text, caret) = crate::textarea_text::snapshot(&self.composer_state.textarea);
        if let Some(splice) = self.mentions.commit(&text, caret, username) {
            crate::textarea_text::replace(&mut self.composer_state.textarea, &splice.text, splice.caret);
            self.restyle_composer();
        }
        self.focus = Focus::Composer;
    }

    pub fn take_lookup_requests(&mut self) -> Vec<LookupRequest> {
        std::mem::take(&mut self.pending_lookups)
    }

    pub fn apply_mention_lookup(&mut self, result: LookupResult) {
        let token = result.token;
        let shown = self.mentions.apply_lookup(result);
        log_mentions!(self.log_config, "Lookup #{} applied, dropdown visible: {}", token, shown);
    }

    // ============================================================================
    // QUEUED ACTIONS
    // ============================================================================

    pub fn queue_action(&mut self, action: PendingAction) {
        self.pending_actions.push_back(action);
    }

    /// Run every queued network action in order
    pub async fn run_pending_actions(&mut self) -> Result<()> {
        while let Some(action) = self.pending_actions.pop_front() {
            log_api_call!(self.log_config, "Running {:?}", action);
            match action {
                PendingAction::LoadComments => self.load_comments().await,
                PendingAction::SubmitComment => self.submit_comment().await,
                PendingAction::DeleteComment(id) => self.delete_comment(id).await,
                PendingAction::ToggleReaction(kind) => self.toggle_reaction(kind).await,
                PendingAction::SaveTheme(theme) => self.save_theme_remote(theme).await,
                PendingAction::SubmitReport => self.submit_report().await,
            }
        }
        Ok(())
    }

    // ============================================================================
    // COMMENTS
    // ============================================================================

    /// Show or hide the comments section, loading it on first reveal
    pub fn toggle_comments(&mut self) {
        let state = &mut self.comments_state;
        state.visible = !state.visible;
        if state.visible && !state.loaded {
            state.loaded = true;
            state.loading = true;
            self.queue_action(PendingAction::LoadComments);
        }
    }

    pub async fn load_comments(&mut self) {
        self.comments_state.loading = true;
        match self.api_client.load_comments(self.post_id).await {
            Ok(comments) => {
                self.comments_state.list_state.select(if comments.is_empty() { None } else { Some(0) });
                self.comments_state.comments = comments;
                self.comments_state.error = None;
            }
            Err(e) => {
                log::error!("Error loading comments: {}", e);
                self.comments_state.error = Some(e.user_message("Failed to load comments"));
            }
        }
        self.comments_state.loading = false;
    }

    pub async fn submit_comment(&mut self) {
        let content = self.composer_state.get_content().trim().to_string();
        if content.is_empty() {
            self.toasts.error("Please enter a comment");
            return;
        }

        match self.api_client.post_comment(self.post_id, content).await {
            Ok(comment) => {
                self.mentions.deactivate();
                self.composer_state = ComposerState::new();
                self.restyle_composer();
                self.comments_state.comments.push(comment);
                self.comments_state.visible = true;
                let last = self.comments_state.comments.len() - 1;
                self.comments_state.list_state.select(Some(last));
                self.toasts.success("Comment posted successfully");
            }
            Err(e) => {
                log::error!("Error posting comment: {}", e);
                self.toasts.error(e.user_message("Failed to post comment"));
            }
        }
    }

    pub fn next_comment(&mut self) {
        let len = self.comments_state.comments.len();
        if len == 0 {
            return;
        }
        let next = self
            .comments_state
            .list_state
            .selected()
            .map(|i| (i + 1).min(len - 1))
            .unwrap_or(0);
        self.comments_state.list_state.select(Some(next));
    }

    pub fn previous_comment(&mut self) {
        if self.comments_state.comments.is_empty() {
            return;
        }
        let previous = self
            .comments_state
            .list_state
            .selected()
            .map(|i| i.saturating_sub(1))
            .unwrap_or(0);
        self.comments_state.list_state.select(Some(previous));
    }

    /// Ask for confirmation before deleting the selected comment
    pub fn request_delete_selected_comment(&mut self) {
        match self.comments_state.selected_comment() {
            Some(comment) if comment.can_delete => {
                self.comments_state.pending_delete = Some(comment.id);
            }
            Some(_) => self.toasts.warning("You can only delete your own comments"),
            None => {}
        }
    }

    pub fn confirm_delete(&mut self) {
        if let Some(id) = self.comments_state.pending_delete.take() {
            self.queue_action(PendingAction::DeleteComment(id));
        }
    }

    pub fn cancel_delete(&mut self) {
        self.comments_state.pending_delete = None;
    }

    pub async fn delete_comment(&mut self, comment_id: i64) {
        match self.api_client.delete_comment(comment_id).await {
            Ok(()) => {
                self.remove_comment(comment_id);
                self.toasts.success("Comment deleted");
            }
            Err(e) => {
                log::error!("Error deleting comment: {}", e);
                self.toasts.error(e.user_message("Failed to delete comment"));
            }
        }
    }

    fn remove_comment(&mut self, comment_id: i64) {
        let state = &mut self.comments_state;
        state.comments.retain(|c| c.id != comment_id);
        let len = state.comments.len();
        let selected = match state.list_state.selected() {
            _ if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => Some(0),
        };
        state.list_state.select(selected);
    }

    // ============================================================================
    // REACTIONS
    // ============================================================================

    pub fn next_reaction(&mut self) {
        let last = ReactionKind::ALL.len() - 1;
        self.reactions_state.selected = (self.reactions_state.selected + 1).min(last);
    }

    pub fn previous_reaction(&mut self) {
        self.reactions_state.selected = self.reactions_state.selected.saturating_sub(1);
    }

    pub async fn toggle_reaction(&mut self, kind: ReactionKind) {
        match self.api_client.toggle_reaction(self.post_id, kind).await {
            Ok(summary) => {
                self.reactions_state.summary = summary;
            }
            Err(e) => {
                log::error!("Error toggling reaction: {}", e);
                self.toasts.error(e.user_message("Failed to toggle reaction"));
            }
        }
    }

    // ============================================================================
    // THEME
    // ============================================================================

    /// Flip light/dark, persist locally, and queue the server save
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.restyle_composer();
        log_settings!(self.log_config, "Theme switched to {}", self.theme.as_str());
        self.toasts.info(format!("Switched to {} mode", self.theme.as_str()));

        if let Err(e) = self.config_manager.save_theme(self.theme) {
            log::error!("Failed to save theme locally: {}", e);
        }
        self.queue_action(PendingAction::SaveTheme(self.theme));
    }

    /// Best-effort server save; failures are only logged
    pub async fn save_theme_remote(&mut self, theme: Theme) {
        if let Err(e) = self.api_client.save_theme(theme).await {
            log::error!("Error saving theme: {}", e);
        }
    }

    // ============================================================================
    // REPORTS
    // ============================================================================

    pub fn open_report(&mut self, target: ReportTarget) {
        self.mentions.deactivate();
        self.report_state = Some(ReportState::new(target));
    }

    pub fn close_report(&mut self) {
        self.report_state = None;
    }

    /// Move the reason selection; starts from the first reason
    pub fn cycle_report_reason(&mut self, forward: bool) {
        let Some(report) = self.report_state.as_mut() else {
            return;
        };
        let reasons = ReportReason::ALL;
        let current = report
            .reason
            .and_then(|r| reasons.iter().position(|candidate| *candidate == r));
        let next = match (current, forward) {
            (None, _) => 0,
            (Some(i), true) => (i + 1).min(reasons.len() - 1),
            (Some(i), false) => i.saturating_sub(1),
        };
        report.reason = Some(reasons[next]);
        report.error = None;
    }

    /// Validate the modal and queue the submission
    pub fn request_report_submit(&mut self) {
        let Some(report) = self.report_state.as_mut() else {
            return;
        };
        if report.reason.is_none() {
            report.error = Some("Please select a reason".to_string());
            return;
        }
        self.queue_action(PendingAction::SubmitReport);
    }

    pub async fn submit_report(&mut self) {
        let Some(report) = self.report_state.as_ref() else {
            return;
        };
        let Some(reason) = report.reason else {
            return;
        };
        let target = report.target;
        let details = report.details.lines().join("\n").trim().to_string();

        match self.api_client.submit_report(target, reason, details).await {
            Ok(()) => {
                self.report_state = None;
                self.toasts
                    .success("Report submitted successfully. Our moderation team will review it.");
            }
            Err(e) => {
                log::error!("Error submitting report: {}", e);
                let message = format!("Failed to submit report: {}", e.user_message("unknown error"));
                if let Some(report) = self.report_state.as_mut() {
                    report.error = Some(message.clone());
                }
                self.toasts.error(message);
            }
        }
    }
}
