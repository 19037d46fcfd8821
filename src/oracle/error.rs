use thiserror::Error;

/// Errors from the recommendation backends.
///
/// SECURITY: Error messages must NEVER contain API keys.
#[derive(Debug, Error)]
pub enum RecommendationError {
    /// Missing, invalid or rejected API key
    #[error("authentication failed: {message}")]
    Auth { message: String },

    /// Backend returned an error response
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Network-level error (connection failed, timeout, etc.)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("model returned an empty response")]
    EmptyResponse,

    #[error("unknown recommendation backend: {0}")]
    UnknownBackend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        let err = RecommendationError::Auth {
            message: "Incorrect API key provided".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "authentication failed: Incorrect API key provided"
        );
    }

    #[test]
    fn test_api_error_display() {
        let err = RecommendationError::Api {
            status: 404,
            message: "model 'llama9' not found".to_string(),
        };
        assert_eq!(err.to_string(), "API error (404): model 'llama9' not found");
    }

    #[test]
    fn test_unknown_backend_display() {
        let err = RecommendationError::UnknownBackend("bard".to_string());
        assert_eq!(err.to_string(), "unknown recommendation backend: bard");
    }
}
