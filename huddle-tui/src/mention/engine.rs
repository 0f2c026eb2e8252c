use std::collections::HashMap;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Position, Rect};
use ratatui::widgets::ListState;

use super::cache::{filter_suggestions, Clock, Suggestion, SuggestionCache, SystemClock};
use super::trigger::{detect_trigger, splice_mention, Splice};
use super::{DROPDOWN_MAX_ROWS, DROPDOWN_MAX_WIDTH};
use crate::log_mentions;
use crate::logging::LogConfig;

/// Identifier of a text surface opted into mention handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnchorId(pub &'static str);

/// An open autocomplete session
#[derive(Debug, Clone)]
pub struct Session {
    pub anchor: AnchorId,
    pub prefix: String,
    pub items: Vec<Suggestion>,
    pub active_index: usize,
    /// Token of the most recent lookup issued for this session
    pub token: u64,
}

/// A user search the event loop must run off the input path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub token: u64,
    pub anchor: AnchorId,
    pub prefix: String,
}

impl LookupRequest {
    pub fn complete(self, candidates: Option<Vec<Suggestion>>) -> LookupResult {
        LookupResult {
            token: self.token,
            candidates,
        }
    }
}

/// Outcome of a lookup; `candidates` is `None` when the search failed
#[derive(Debug, Clone)]
pub struct LookupResult {
    pub token: u64,
    pub candidates: Option<Vec<Suggestion>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not ours; the anchor handles the key normally
    Ignored,
    /// Handled by the dropdown; the anchor must not see it
    Consumed,
    /// Commit `username` into `anchor`
    Select { anchor: AnchorId, username: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerOutcome {
    Ignored,
    Dismissed,
    Select { anchor: AnchorId, username: String },
}

/// The suggestion list widget state, owned by its engine
#[derive(Debug, Default)]
struct Dropdown {
    area: Option<Rect>,
    list_state: ListState,
}

/// `@username` autocomplete over a set of registered anchors
pub struct MentionEngine {
    /// Registered anchors and their last rendered area
    anchors: HashMap<AnchorId, Option<Rect>>,
    cache: SuggestionCache,
    clock: Arc<dyn Clock>,
    session: Option<Session>,
    dropdown: Dropdown,
    last_token: u64,
    log_config: LogConfig,
}

impl Default for MentionEngine {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl MentionEngine {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            anchors: HashMap::new(),
            cache: SuggestionCache::default(),
            clock,
            session: None,
            dropdown: Dropdown::default(),
            last_token: 0,
            log_config: LogConfig::default(),
        }
    }

    /// Mention logs follow `features.mentions` of this config
    pub fn set_log_config(&mut self, config: LogConfig) {
        self.log_config = config;
    }

    pub fn log_config(&self) -> &LogConfig {
        &self.log_config
    }

    pub fn register_anchor(&mut self, anchor: AnchorId) {
        self.anchors.entry(anchor).or_insert(None);
    }

    pub fn is_registered(&self, anchor: AnchorId) -> bool {
        self.anchors.contains_key(&anchor)
    }

    /// Record where an anchor was drawn this frame
    pub fn set_anchor_area(&mut self, anchor: AnchorId, area: Rect) {
        if let Some(slot) = self.anchors.get_mut(&anchor) {
            *slot = Some(area);
        }
    }

    /// Anchor drawn at a screen position, if any
    pub fn anchor_at(&self, column: u16, row: u16) -> Option<AnchorId> {
        let position = Position::new(column, row);
        self.anchors
            .iter()
            .find(|(_, area)| area.is_some_and(|a| a.contains(position)))
            .map(|(anchor, _)| *anchor)
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// A session with at least one suggestion to show
    pub fn is_visible(&self) -> bool {
        self.session.as_ref().is_some_and(|s| !s.items.is_empty())
    }

    pub fn active_suggestion(&self) -> Option<&Suggestion> {
        self.session
            .as_ref()
            .and_then(|s| s.items.get(s.active_index))
    }

    pub fn cache(&self) -> &SuggestionCache {
        &self.cache
    }

    #[cfg(test)]
    pub(crate) fn prime_cache(&mut self, results: Vec<Suggestion>, fetched_at_millis: i64) {
        self.cache.replace(results, fetched_at_millis);
    }

    /// React to a text change on `anchor`
    ///
    /// Returns a lookup to run when the cache cannot answer; the caller
    /// completes it asynchronously and feeds it to [`Self::apply_lookup`].
    pub fn on_text_changed(&mut self, anchor: AnchorId, text: &str, caret: usize) -> Option<LookupRequest> {
        if !self.is_registered(anchor) {
            return None;
        }

        let Some(prefix) = detect_trigger(text, caret) else {
            if self.session.is_some() {
                log_mentions!(self.log_config, "Trigger lost, closing suggestions");
                self.deactivate();
            }
            return None;
        };
        let prefix = prefix.to_string();

        self.last_token += 1;
        let token = self.last_token;

        let now = self.clock.now_millis();
        if let Some(candidates) = self.cache.fresh_results(now) {
            let items = filter_suggestions(candidates, &prefix);
            self.open_session(anchor, prefix, token, items);
            return None;
        }

        // Keep the current list on screen until the lookup lands
        let mut session = self
            .session
            .take()
            .filter(|s| s.anchor == anchor)
            .unwrap_or(Session {
                anchor,
                prefix: String::new(),
                items: Vec::new(),
                active_index: 0,
                token,
            });
        session.prefix = prefix.clone();
        session.token = token;
        self.session = Some(session);

        log_mentions!(self.log_config, "Lookup #{} for prefix {:?}", token, prefix);
        Some(LookupRequest { token, anchor, prefix })
    }

    /// Apply a finished lookup; returns whether suggestions are now shown
    ///
    /// A successful result always refreshes the cache. It is only rendered if
    /// its token is still the session's latest, so a slow answer for an older
    /// prefix never replaces a newer list.
    pub fn apply_lookup(&mut self, result: LookupResult) -> bool {
        let succeeded = result.candidates.is_some();
        if let Some(candidates) = result.candidates {
            self.cache.replace(candidates, self.clock.now_millis());
        }

        let Some(session) = self.session.as_ref() else {
            return false;
        };
        if session.token != result.token {
            log_mentions!(
                self.log_config,
                "Discarding lookup #{} (session is at #{})",
                result.token,
                session.token
            );
            return false;
        }

        let items = match (succeeded, self.cache.entry()) {
            (true, Some(entry)) => filter_suggestions(&entry.results, &session.prefix),
            _ => Vec::new(),
        };
        let anchor = session.anchor;
        let prefix = session.prefix.clone();
        self.open_session(anchor, prefix, result.token, items);
        self.is_visible()
    }

    fn open_session(&mut self, anchor: AnchorId, prefix: String, token: u64, items: Vec<Suggestion>) {
        if items.is_empty() {
            self.deactivate();
            return;
        }
        log_mentions!(
            self.log_config,
            "Showing {} suggestions for prefix {:?}",
            items.len(),
            prefix
        );
        self.session = Some(Session {
            anchor,
            prefix,
            items,
            active_index: 0,
            token,
        });
        self.dropdown.list_state = ListState::default().with_selected(Some(0));
    }

    pub fn deactivate(&mut self) {
        self.session = None;
        self.dropdown.area = None;
        self.dropdown.list_state = ListState::default();
    }

    /// Keyboard protocol while the dropdown is visible
    pub fn handle_key(&mut self, key: &KeyEvent) -> KeyOutcome {
        if !self.is_visible() {
            return KeyOutcome::Ignored;
        }
        let Some(session) = self.session.as_mut() else {
            return KeyOutcome::Ignored;
        };

        match key.code {
            KeyCode::Down => {
                session.active_index = (session.active_index + 1).min(session.items.len() - 1);
                self.dropdown.list_state.select(Some(session.active_index));
                KeyOutcome::Consumed
            }
            KeyCode::Up => {
                session.active_index = session.active_index.saturating_sub(1);
                self.dropdown.list_state.select(Some(session.active_index));
                KeyOutcome::Consumed
            }
            KeyCode::Enter | KeyCode::Tab => KeyOutcome::Select {
                anchor: session.anchor,
                username: session.items[session.active_index].username.clone(),
            },
            KeyCode::Esc => {
                self.deactivate();
                KeyOutcome::Consumed
            }
            _ => KeyOutcome::Ignored,
        }
    }

    /// Splice the chosen username over the `@prefix` and close the session
    pub fn commit(&mut self, text: &str, caret: usize, username: &str) -> Option<Splice> {
        let splice = splice_mention(text, caret, username);
        log_mentions!(self.log_config, "Committed mention @{}", username);
        self.deactivate();
        splice
    }

    /// Pointer-down anywhere on screen
    pub fn handle_pointer_down(&mut self, column: u16, row: u16) -> PointerOutcome {
        let Some(session) = self.session.as_ref() else {
            return PointerOutcome::Ignored;
        };
        let position = Position::new(column, row);

        if let Some(area) = self.dropdown.area {
            if area.contains(position) {
                let first_row = area.y + 1;
                let last_row = area.bottom().saturating_sub(1);
                if row >= first_row && row < last_row {
                    let index = self.dropdown.list_state.offset() + (row - first_row) as usize;
                    if let Some(item) = session.items.get(index) {
                        return PointerOutcome::Select {
                            anchor: session.anchor,
                            username: item.username.clone(),
                        };
                    }
                }
                return PointerOutcome::Ignored;
            }
        }

        let inside_anchor = self
            .anchors
            .values()
            .flatten()
            .any(|area| area.contains(position));
        if inside_anchor {
            return PointerOutcome::Ignored;
        }

        self.deactivate();
        PointerOutcome::Dismissed
    }

    /// Place the dropdown under its anchor, inside `bounds`
    ///
    /// Prefers the rows below the anchor, flips above when there is no room,
    /// and otherwise shrinks to what is left below.
    pub fn layout_dropdown(&mut self, bounds: Rect) -> Option<Rect> {
        let placed = self.compute_dropdown_area(bounds);
        self.dropdown.area = placed;
        placed
    }

    fn compute_dropdown_area(&self, bounds: Rect) -> Option<Rect> {
        let session = self.session.as_ref().filter(|s| !s.items.is_empty())?;
        let anchor = (*self.anchors.get(&session.anchor)?)?;

        let width = anchor
            .width
            .min(DROPDOWN_MAX_WIDTH)
            .min(bounds.right().saturating_sub(anchor.x));
        let wanted = (session.items.len() as u16).min(DROPDOWN_MAX_ROWS) + 2;
        let room_below = bounds.bottom().saturating_sub(anchor.bottom());
        let room_above = anchor.y.saturating_sub(bounds.y);

        let (y, height) = if room_below >= wanted {
            (anchor.bottom(), wanted)
        } else if room_above >= wanted {
            (anchor.y - wanted, wanted)
        } else {
            (anchor.bottom(), room_below)
        };

        if width < 3 || height < 3 {
            return None;
        }
        Some(Rect::new(anchor.x, y, width, height))
    }

    /// Everything the renderer needs, when the dropdown has been laid out
    pub fn dropdown_view(&mut self) -> Option<(Rect, &[Suggestion], &mut ListState)> {
        let area = self.dropdown.area?;
        let session = self.session.as_ref().filter(|s| !s.items.is_empty())?;
        Some((area, &session.items, &mut self.dropdown.list_state))
    }
}
