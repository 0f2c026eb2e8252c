use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    /// Well-formed response carrying `success: false`
    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl ApiError {
    /// Text shown to the user in an error toast
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Network(_) => "Network error occurred".to_string(),
            ApiError::Rejected(message) if !message.is_empty() => message.clone(),
            ApiError::Rejected(_) | ApiError::Serialization(_) => fallback.to_string(),
            ApiError::Api(message)
            | ApiError::NotFound(message)
            | ApiError::Unauthorized(message)
            | ApiError::BadRequest(message) => message.clone(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_message_prefers_server_text() {
        let err = ApiError::Rejected("Comment too long".to_string());
        assert_eq!(err.user_message("Failed to post comment"), "Comment too long");

        let err = ApiError::Rejected(String::new());
        assert_eq!(err.user_message("Failed to post comment"), "Failed to post comment");
    }
}
