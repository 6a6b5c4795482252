//! Service-level error type.

use reporting_core::{MessageKey, ReportingError, ValidationError};
use reporting_postgres::PgError;
use thiserror::Error;

use crate::rights::RightLookupError;

/// Result type alias for template service operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures of template service operations.
///
/// [`Error::Reporting`] and [`Error::Validation`] are user-facing and carry a
/// message key; the remaining variants are infrastructure failures.
#[derive(Debug, Error)]
#[must_use = "errors do nothing unless you use them"]
pub enum Error {
    /// The upload or the template state is invalid.
    #[error(transparent)]
    Reporting(#[from] ReportingError),

    /// An authorization precondition failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The template store failed.
    #[error("database error: {0}")]
    Database(#[source] PgError),

    /// The rights service could not be queried.
    #[error("right lookup failed: {0}")]
    RightLookup(#[from] RightLookupError),
}

impl Error {
    /// Returns the message key of user-facing errors.
    pub fn message_key(&self) -> Option<MessageKey> {
        match self {
            Self::Reporting(error) => Some(error.message_key()),
            Self::Validation(error) => Some(error.message_key()),
            Self::Database(_) | Self::RightLookup(_) => None,
        }
    }

    /// Returns whether the error was caused by the caller's input.
    pub fn is_user_error(&self) -> bool {
        self.message_key().is_some()
    }

    /// Maps a store failure for the template `name`, turning a lost
    /// name-uniqueness race into [`ReportingError::TemplateExists`].
    pub(crate) fn from_store(error: PgError, name: &str) -> Self {
        let duplicate = error
            .constraint_violation()
            .is_some_and(|violation| violation.is_duplicate_template_name());

        if duplicate {
            Self::Reporting(ReportingError::TemplateExists(name.to_owned()))
        } else {
            Self::Database(error)
        }
    }
}

impl From<PgError> for Error {
    fn from(error: PgError) -> Self {
        Self::Database(error)
    }
}
