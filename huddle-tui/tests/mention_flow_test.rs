use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use huddle::api::{ApiError, ApiResult};
use huddle::mention::{
    fetch_candidates, AnchorId, ManualClock, MentionEngine, UserDirectory, FRESHNESS_WINDOW_MS,
};
use huddle_types::SearchUser;

const COMPOSER: AnchorId = AnchorId("composer");

struct CountingDirectory {
    calls: AtomicUsize,
}

#[async_trait]
impl UserDirectory for CountingDirectory {
    async fn search_users(&self, _query: &str) -> ApiResult<Vec<SearchUser>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(["dana", "dave", "erin"]
            .into_iter()
            .map(|name| SearchUser {
                username: name.to_string(),
                profile_picture: None,
            })
            .collect())
    }
}

#[tokio::test]
async fn test_lookup_cycle_and_cache_expiry() {
    let clock = Arc::new(ManualClock::new(0));
    let mut engine = MentionEngine::new(clock.clone());
    engine.register_anchor(COMPOSER);
    let directory = CountingDirectory {
        calls: AtomicUsize::new(0),
    };

    let request = engine.on_text_changed(COMPOSER, "cc @da", 6).unwrap();
    let candidates = fetch_candidates(&directory).await;
    assert!(engine.apply_lookup(request.complete(candidates)));
    let names: Vec<_> = engine.session().unwrap().items.iter().map(|s| s.username.as_str()).collect();
    assert_eq!(names, vec!["dana", "dave"]);

    // Within the window the cache answers
    clock.advance(FRESHNESS_WINDOW_MS - 1);
    assert!(engine.on_text_changed(COMPOSER, "cc @er", 6).is_none());
    assert_eq!(engine.active_suggestion().unwrap().username, "erin");
    assert_eq!(directory.calls.load(Ordering::SeqCst), 1);

    // Past it, a new lookup is issued
    clock.advance(1);
    assert!(engine.on_text_changed(COMPOSER, "cc @er", 6).is_some());
}

#[tokio::test]
async fn test_unregistered_anchor_is_ignored() {
    let mut engine = MentionEngine::default();
    engine.register_anchor(COMPOSER);
    assert!(engine.on_text_changed(AnchorId("search-box"), "@da", 3).is_none());
    assert!(engine.session().is_none());
}

struct OfflineDirectory;

#[async_trait]
impl UserDirectory for OfflineDirectory {
    async fn search_users(&self, _query: &str) -> ApiResult<Vec<SearchUser>> {
        Err(ApiError::Rejected("Not logged in".to_string()))
    }
}

#[tokio::test]
async fn test_rejected_search_keeps_dropdown_closed() {
    let mut engine = MentionEngine::new(Arc::new(ManualClock::new(0)));
    engine.register_anchor(COMPOSER);

    let request = engine.on_text_changed(COMPOSER, "@da", 3).unwrap();
    let candidates = fetch_candidates(&OfflineDirectory).await;
    assert!(candidates.is_none());

    assert!(!engine.apply_lookup(request.complete(candidates)));
    assert!(!engine.is_visible());
    assert!(engine.cache().entry().is_none());
}
