use thiserror::Error;

/// Everything that can go wrong talking to the catalog API.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("session token contains characters not allowed in a cookie")]
    InvalidToken,
}

impl ClientError {
    /// True for 401/403, i.e. the session token was rejected.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Status { status: 401 | 403, .. })
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
