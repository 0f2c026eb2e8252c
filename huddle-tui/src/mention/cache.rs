//! Candidate cache for mention suggestions.
//!
//! One slot per engine: the unfiltered result of the most recent user search,
//! replaced wholesale once it is older than the freshness window.
use std::sync::atomic::{AtomicI64, Ordering};

use huddle_types::SearchUser;

use super::{FRESHNESS_WINDOW_MS, MAX_SUGGESTIONS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub username: String,
    pub avatar_url: Option<String>,
}

impl Suggestion {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            avatar_url: None,
        }
    }
}

impl From<SearchUser> for Suggestion {
    fn from(user: SearchUser) -> Self {
        Self {
            username: user.username,
            avatar_url: user.profile_picture,
        }
    }
}

/// Millisecond wall clock, injectable for tests
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock(AtomicI64);

impl ManualClock {
    pub fn new(now_millis: i64) -> Self {
        Self(AtomicI64::new(now_millis))
    }

    pub fn set(&self, now_millis: i64) {
        self.0.store(now_millis, Ordering::SeqCst);
    }

    pub fn advance(&self, millis: i64) {
        self.0.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub results: Vec<Suggestion>,
    pub fetched_at_millis: i64,
}

#[derive(Debug, Clone)]
pub struct SuggestionCache {
    entry: Option<CacheEntry>,
    freshness_ms: i64,
}

impl Default for SuggestionCache {
    fn default() -> Self {
        Self::new(FRESHNESS_WINDOW_MS)
    }
}

impl SuggestionCache {
    pub fn new(freshness_ms: i64) -> Self {
        Self {
            entry: None,
            freshness_ms,
        }
    }

    pub fn entry(&self) -> Option<&CacheEntry> {
        self.entry.as_ref()
    }

    pub fn is_fresh(&self, now_millis: i64) -> bool {
        self.entry
            .as_ref()
            .is_some_and(|entry| now_millis - entry.fetched_at_millis < self.freshness_ms)
    }

    /// Cached candidates, only while the entry is inside the freshness window
    pub fn fresh_results(&self, now_millis: i64) -> Option<&[Suggestion]> {
        if self.is_fresh(now_millis) {
            self.entry.as_ref().map(|entry| entry.results.as_slice())
        } else {
            None
        }
    }

    pub fn replace(&mut self, results: Vec<Suggestion>, now_millis: i64) {
        self.entry = Some(CacheEntry {
            results,
            fetched_at_millis: now_millis,
        });
    }
}

/// Case-insensitive substring filter, input order kept, first `MAX_SUGGESTIONS`
pub fn filter_suggestions(candidates: &[Suggestion], prefix: &str) -> Vec<Suggestion> {
    if prefix.is_empty() {
        return candidates.iter().take(MAX_SUGGESTIONS).cloned().collect();
    }

    let needle = prefix.to_lowercase();
    candidates
        .iter()
        .filter(|candidate| candidate.username.to_lowercase().contains(&needle))
        .take(MAX_SUGGESTIONS)
        .cloned()
        .collect()
}
