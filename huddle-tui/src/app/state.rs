use std::collections::VecDeque;

use huddle_types::{Comment, ReactionKind, ReactionSummary, ReportReason, ReportTarget, Theme};
use ratatui::widgets::ListState;
use tui_textarea::TextArea;

use crate::api::ApiClient;
use crate::config::ConfigManager;
use crate::mention::{AnchorId, LookupRequest, MentionEngine};
use crate::toast::ToastQueue;

/// The comment composer, the one mention-enabled input of the client
pub const COMMENT_ANCHOR: AnchorId = AnchorId("comment-composer");

/// Which pane receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Browsing comments and reactions, shortcuts active
    Comments,
    /// Typing in the composer, shortcuts disabled
    Composer,
}

pub struct ComposerState {
    pub textarea: TextArea<'static>,
}

impl ComposerState {
    pub fn new() -> Self {
        let mut textarea = TextArea::default();
        textarea.set_hard_tab_indent(true);
        Self { textarea }
    }

    pub fn get_content(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn char_count(&self) -> usize {
        self.get_content().chars().count()
    }
}

impl Default for ComposerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Comments section of the open post
#[derive(Default)]
pub struct CommentsState {
    pub comments: Vec<Comment>,
    pub list_state: ListState,
    pub visible: bool,
    /// Set after the first load; the section is never reloaded on reveal
    pub loaded: bool,
    pub loading: bool,
    pub error: Option<String>,
    /// Comment awaiting a y/n delete confirmation
    pub pending_delete: Option<i64>,
}

impl CommentsState {
    pub fn selected_comment(&self) -> Option<&Comment> {
        self.list_state
            .selected()
            .and_then(|index| self.comments.get(index))
    }
}

#[derive(Default)]
pub struct ReactionsState {
    pub summary: ReactionSummary,
    /// Index into `ReactionKind::ALL`
    pub selected: usize,
}

impl ReactionsState {
    pub fn selected_kind(&self) -> ReactionKind {
        ReactionKind::ALL[self.selected.min(ReactionKind::ALL.len() - 1)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportField {
    Reason,
    Details,
}

/// Report modal for a post or a comment
pub struct ReportState {
    pub target: ReportTarget,
    /// `None` until the user picks a reason
    pub reason: Option<ReportReason>,
    pub details: TextArea<'static>,
    pub field: ReportField,
    pub error: Option<String>,
}

impl ReportState {
    pub fn new(target: ReportTarget) -> Self {
        Self {
            target,
            reason: None,
            details: TextArea::default(),
            field: ReportField::Reason,
            error: None,
        }
    }
}

/// Network work queued by key handlers and run by the event loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    LoadComments,
    SubmitComment,
    DeleteComment(i64),
    ToggleReaction(ReactionKind),
    SaveTheme(Theme),
    SubmitReport,
}

/// Main application state
pub struct App {
    pub running: bool,
    pub post_id: i64,
    pub api_client: ApiClient,
    pub config_manager: ConfigManager,
    pub theme: Theme,
    pub focus: Focus,
    pub show_help: bool,
    pub composer_state: ComposerState,
    pub comments_state: CommentsState,
    pub reactions_state: ReactionsState,
    pub report_state: Option<ReportState>,
    pub mentions: MentionEngine,
    /// Mention lookups waiting to be spawned
    pub pending_lookups: Vec<LookupRequest>,
    pub pending_actions: VecDeque<PendingAction>,
    pub toasts: ToastQueue,
    pub log_config: crate::logging::LogConfig,
}
