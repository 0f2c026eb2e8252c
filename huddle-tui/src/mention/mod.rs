//! `@username` autocomplete for text inputs.
//!
//! Typing `@` followed by word characters in a registered anchor opens a
//! suggestion list fed by the user-search endpoint. The engine owns its
//! candidate cache, its dropdown state and the token of the latest lookup;
//! network calls run outside the engine and are handed back through
//! [`MentionEngine::apply_lookup`].
mod cache;
mod directory;
mod engine;
mod trigger;

pub use cache::{filter_suggestions, CacheEntry, Clock, ManualClock, Suggestion, SuggestionCache, SystemClock};
pub use directory::{fetch_candidates, UserDirectory};
pub use engine::{AnchorId, KeyOutcome, LookupRequest, LookupResult, MentionEngine, PointerOutcome, Session};
pub use trigger::{detect_trigger, splice_mention, Splice};

/// Maximum cache age before a new search is issued
pub const FRESHNESS_WINDOW_MS: i64 = 60_000;

/// Maximum number of suggestions shown at once
pub const MAX_SUGGESTIONS: usize = 10;

/// Dropdown width cap, in columns
pub const DROPDOWN_MAX_WIDTH: u16 = 32;

/// Visible rows before the list scrolls
pub const DROPDOWN_MAX_ROWS: u16 = 6;
