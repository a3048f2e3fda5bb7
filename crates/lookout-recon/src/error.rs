use lookout_core::LookoutError;
use thiserror::Error;

/// Result type alias for reconnaissance operations
pub type ReconResult<T> = std::result::Result<T, ReconError>;

/// Errors from reconnaissance tools
#[derive(Error, Debug)]
pub enum ReconError {
    /// DNS resolution error
    #[error("DNS error: {0}")]
    Dns(String),

    /// Host name that cannot be inspected
    #[error("invalid host: {0}")]
    InvalidHost(String),
}

impl From<LookoutError> for ReconError {
    fn from(err: LookoutError) -> Self {
        Self::Dns(err.to_string())
    }
}

impl From<ReconError> for LookoutError {
    fn from(err: ReconError) -> Self {
        match err {
            ReconError::Dns(msg) => Self::Http(msg),
            ReconError::InvalidHost(host) => Self::InvalidQuery(host),
        }
    }
}
