use thiserror::Error;

/// Application-wide error types for backend communication.
///
/// Client-side validation failures never reach this type; they are
/// view-local and stop before a request is built.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (DNS, refused
    /// connection, aborted fetch).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered 404 for the addressed article.
    #[error("article not found")]
    NotFound,

    /// Any other non-2xx response, with the backend's `detail` message
    /// when one was present in the body.
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },

    /// A 2xx response whose body did not match the expected shape.
    #[error("malformed response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Short text suitable for a toast. The full error is for the log.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Transport(_) => "Could not reach the article service".to_string(),
            ApiError::NotFound => "Article not found".to_string(),
            ApiError::Server { message, .. } => message.clone(),
            ApiError::Decode(_) => "Unexpected response from the article service".to_string(),
        }
    }
}
