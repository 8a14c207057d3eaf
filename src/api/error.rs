use thiserror::Error;

/// Errors from the Remote User Directory boundary. Every one of these is
/// converted into a notification or a red stderr line before it reaches
/// the operator; none escape the console core.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (DNS, connect, timeout, TLS).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The directory answered with a non-2xx status.
    #[error("directory returned HTTP {0}")]
    Status(u16),

    /// The response body was not the shape the console consumes.
    #[error("unexpected response shape: {0}")]
    Malformed(String),
}
