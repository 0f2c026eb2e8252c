use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::enums::{ReactionKind, ReportReason, Theme};

/// A user returned by the user-search endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchUser {
    pub username: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserSearchResponse {
    pub success: bool,
    #[serde(default)]
    pub users: Vec<SearchUser>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Author block embedded in every comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentAuthor {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub content: String,
    /// Server-rendered body (mentions linkified)
    #[serde(default)]
    pub content_html: String,
    #[serde(default)]
    pub time_ago: String,
    #[serde(default)]
    pub can_delete: bool,
    pub user: CommentAuthor,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentsResponse {
    pub success: bool,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentResponse {
    pub success: bool,
    #[serde(default)]
    pub comment: Option<Comment>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionCount {
    pub count: u32,
    pub user_reacted: bool,
}

/// Per-kind reaction tallies for one post, keyed by the wire name of the kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReactionSummary(pub HashMap<String, ReactionCount>);

impl ReactionSummary {
    /// Tally for a kind; kinds the server omitted count as zero
    pub fn get(&self, kind: ReactionKind) -> ReactionCount {
        self.0.get(kind.as_str()).copied().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReactionRequest {
    pub reaction_type: ReactionKind,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReactionsResponse {
    pub success: bool,
    #[serde(default)]
    pub reactions: ReactionSummary,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThemeRequest {
    pub theme: Theme,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportRequest {
    pub reason: ReportReason,
    pub details: String,
}

/// Envelope for endpoints that only acknowledge
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_tolerates_extra_fields() {
        let json = r#"{
            "success": true,
            "users": [
                {"username": "alice", "profile_picture": "/static/a.png", "id": 3},
                {"username": "bob", "profile_picture": null}
            ]
        }"#;
        let parsed: UserSearchResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.success);
        assert_eq!(parsed.users.len(), 2);
        assert_eq!(parsed.users[0].profile_picture.as_deref(), Some("/static/a.png"));
        assert_eq!(parsed.users[1].profile_picture, None);
    }

    #[test]
    fn test_unsuccessful_search_has_no_users() {
        let parsed: UserSearchResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(!parsed.success);
        assert!(parsed.users.is_empty());
    }

    #[test]
    fn test_reaction_summary_missing_kinds_are_zero() {
        let json = r#"{"success": true, "reactions": {"fire": {"count": 3, "user_reacted": true}}}"#;
        let parsed: ReactionsResponse = serde_json::from_str(json).unwrap();
        let fire = parsed.reactions.get(ReactionKind::Fire);
        assert_eq!(fire.count, 3);
        assert!(fire.user_reacted);
        assert_eq!(parsed.reactions.get(ReactionKind::Like), ReactionCount::default());
    }

    #[test]
    fn test_reaction_request_wire_format() {
        let body = serde_json::to_value(ReactionRequest {
            reaction_type: ReactionKind::Celebrate,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"reaction_type": "celebrate"}));
    }
}
