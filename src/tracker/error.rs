use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Tracker error: {0}")]
    BackendError(String),
}
