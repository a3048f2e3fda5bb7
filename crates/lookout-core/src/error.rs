use thiserror::Error;

/// Result type alias for lookout operations
pub type Result<T> = std::result::Result<T, LookoutError>;

/// Errors that can occur while running lookups.
///
/// Provider-level failures (a dead endpoint, a malformed body, an empty
/// answer) are absorbed by the orchestrators and never reach the caller as
/// one of these. What does surface is caller or configuration misuse.
#[derive(Error, Debug)]
pub enum LookoutError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Provider answered with a non-success status
    #[error("provider returned status {code} for {url}")]
    Status {
        /// HTTP status code
        code: u16,
        /// Resolved URL that produced the status
        url: String,
    },

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid IP address format
    #[error("invalid IP address: {0}")]
    InvalidIp(String),

    /// Query subject cannot be used for this kind of lookup
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Configuration has the wrong shape
    #[error("configuration error: {0}")]
    Config(String),

    /// Settings store could not be read or written
    #[error("settings store error: {0}")]
    Store(String),

    /// Filesystem error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl LookoutError {
    /// Returns true if the error came from talking to a provider
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Status { .. })
    }

    /// Returns the HTTP status code if a provider answered with one
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}
