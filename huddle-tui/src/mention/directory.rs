use async_trait::async_trait;
use huddle_types::SearchUser;

use super::cache::Suggestion;
use crate::api::{ApiClient, ApiResult};

/// The user-search collaborator behind mention suggestions
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn search_users(&self, query: &str) -> ApiResult<Vec<SearchUser>>;
}

#[async_trait]
impl UserDirectory for ApiClient {
    async fn search_users(&self, query: &str) -> ApiResult<Vec<SearchUser>> {
        ApiClient::search_users(self, query).await
    }
}

/// Fetch the unfiltered candidate set
///
/// Failures come back as `None` and never reach the caller as errors. They
/// are logged as warnings whatever the category switches say; the engine
/// reports the successful side under `features.mentions`.
pub async fn fetch_candidates(directory: &dyn UserDirectory) -> Option<Vec<Suggestion>> {
    match directory.search_users("").await {
        Ok(users) => Some(users.into_iter().map(Suggestion::from).collect()),
        Err(e) => {
            log::warn!(target: "mentions", "Error fetching users: {}", e);
            None
        }
    }
}
