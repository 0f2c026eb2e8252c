use reqwest::Client;
use serde::de::DeserializeOwned;

use super::{ApiError, ApiResult};
use huddle_types::*;

/// Default dashboard server for local development
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// API client for communicating with the dashboard server
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    csrf_token: Option<String>,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(Client::new(), base_url)
    }

    pub(crate) fn with_http_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            csrf_token: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Set the CSRF token sent with state-changing requests
    pub fn set_csrf_token(&mut self, token: Option<String>) {
        self.csrf_token = token;
    }

    fn add_csrf_header(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(token) = &self.csrf_token {
            req.header("X-CSRFToken", token)
        } else {
            req
        }
    }

    /// Helper to handle API responses
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> ApiResult<T> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            // JSON envelopes carry their own user-facing message
            if let Ok(envelope) = serde_json::from_str::<StatusResponse>(&error_text) {
                let Some(message) = envelope.message.filter(|m| !m.is_empty()) else {
                    return Err(ApiError::Rejected(String::new()));
                };
                return Err(status_error(status.as_u16(), message));
            }

            // HTML error pages (proxies, framework debug pages) are not worth showing
            let clean_error = if error_text.contains("<html>") || error_text.contains("<!DOCTYPE") {
                format!("Server returned {} error. Please check the server URL.", status.as_u16())
            } else {
                error_text
            };

            Err(status_error(status.as_u16(), clean_error))
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    // User endpoints

    /// Search users; an unsuccessful envelope becomes `ApiError::Rejected`
    pub async fn search_users(&self, query: &str) -> ApiResult<Vec<SearchUser>> {
        let url = format!("{}?q={}", self.url("users/search"), urlencoding::encode(query));
        let response = self.client.get(&url).send().await?;
        let body: UserSearchResponse = self.handle_response(response).await?;
        ensure_success(body.success, body.message)?;
        Ok(body.users)
    }

    // Comment endpoints

    /// Load all comments of a post
    pub async fn load_comments(&self, post_id: i64) -> ApiResult<Vec<Comment>> {
        let url = self.url(&format!("comments/{}", post_id));
        let response = self.client.get(&url).send().await?;
        let body: CommentsResponse = self.handle_response(response).await?;
        ensure_success(body.success, body.message)?;
        Ok(body.comments)
    }

    /// Post a comment and return the stored comment
    pub async fn post_comment(&self, post_id: i64, content: String) -> ApiResult<Comment> {
        let url = self.url(&format!("comment/{}", post_id));
        let request = CreateCommentRequest { content };
        let req = self.add_csrf_header(self.client.post(&url).json(&request));
        let response = req.send().await?;
        let body: CommentResponse = self.handle_response(response).await?;
        ensure_success(body.success, body.message)?;
        body.comment
            .ok_or_else(|| ApiError::Api("Server did not return the new comment".to_string()))
    }

    /// Delete a comment
    pub async fn delete_comment(&self, comment_id: i64) -> ApiResult<()> {
        let url = self.url(&format!("comment/{}", comment_id));
        let req = self.add_csrf_header(self.client.delete(&url));
        let response = req.send().await?;
        let body: StatusResponse = self.handle_response(response).await?;
        ensure_success(body.success, body.message)
    }

    // Reaction endpoints

    /// Toggle the current user's reaction and return the post's new tallies
    pub async fn toggle_reaction(&self, post_id: i64, kind: ReactionKind) -> ApiResult<ReactionSummary> {
        let url = self.url(&format!("reaction/{}", post_id));
        let request = ReactionRequest { reaction_type: kind };
        let req = self.add_csrf_header(self.client.post(&url).json(&request));
        let response = req.send().await?;
        let body: ReactionsResponse = self.handle_response(response).await?;
        ensure_success(body.success, body.message)?;
        Ok(body.reactions)
    }

    // Preference endpoints

    /// Save the theme preference on the server
    pub async fn save_theme(&self, theme: Theme) -> ApiResult<()> {
        let url = self.url("theme");
        let request = ThemeRequest { theme };
        let req = self.add_csrf_header(self.client.post(&url).json(&request));
        let response = req.send().await?;
        let body: StatusResponse = self.handle_response(response).await?;
        ensure_success(body.success, body.message)
    }

    // Moderation endpoints

    /// File a report against a post or a comment
    pub async fn submit_report(&self, target: ReportTarget, reason: ReportReason, details: String) -> ApiResult<()> {
        let url = self.url(&format!("report/{}/{}", target.kind(), target.id()));
        let request = ReportRequest { reason, details };
        let req = self.add_csrf_header(self.client.post(&url).json(&request));
        let response = req.send().await?;
        let body: StatusResponse = self.handle_response(response).await?;
        ensure_success(body.success, body.message)
    }
}

fn status_error(status: u16, message: String) -> ApiError {
    match status {
        404 => ApiError::NotFound(message),
        401 => ApiError::Unauthorized(message),
        400 => ApiError::BadRequest(message),
        _ => ApiError::Api(message),
    }
}

/// Turn a `{ success: false, message }` envelope into an error
fn ensure_success(success: bool, message: Option<String>) -> ApiResult<()> {
    if success {
        Ok(())
    } else {
        Err(ApiError::Rejected(message.unwrap_or_default()))
    }
}
