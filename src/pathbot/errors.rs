use thiserror::Error;

/// Failures talking to the maze server. All of these end the session; a
/// blocked move is not an error and never shows up here.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Transport-level failure from reqwest (DNS, TLS, connection reset, ...).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server did not answer within the configured timeout.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// Non-success reply that is not the "blocked" answer.
    #[error("server rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Reply body did not decode as a location report.
    #[error("malformed reply: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A move was requested before the session obtained its first location.
    #[error("session not started")]
    NotStarted,
}
