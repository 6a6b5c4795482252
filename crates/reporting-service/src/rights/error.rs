use thiserror::Error;

/// Failures talking to the rights service.
#[derive(Debug, Error)]
pub enum RightLookupError {
    /// The request could not be sent or the response body not read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a status other than 200 or 404.
    #[error("unexpected status {status} while looking up right '{right}'")]
    UnexpectedStatus { status: u16, right: String },

    /// The configured base URL cannot carry a path.
    #[error("invalid reference-data base URL: {0}")]
    InvalidBaseUrl(String),
}

impl RightLookupError {
    /// Returns whether the failure might succeed on retry.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(error) => error.is_timeout() || error.is_connect(),
            Self::UnexpectedStatus { status, .. } => *status >= 500,
            Self::InvalidBaseUrl(_) => false,
        }
    }
}
