//! Message-keyed error families.
//!
//! Every error carries a stable [`MessageKey`] plus the positional arguments a
//! localized message needs, so that callers can render user-facing text without
//! parsing the `Display` output.

use strum::{AsRefStr, IntoStaticStr};
use thiserror::Error;

use crate::compiler::CompileError;

/// Stable i18n keys for every user-visible failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, IntoStaticStr)]
pub enum MessageKey {
    #[strum(serialize = "report.error.reporting.file.missing")]
    FileMissing,
    #[strum(serialize = "report.error.reporting.file.incorrectType")]
    FileIncorrectType,
    #[strum(serialize = "report.error.reporting.file.empty")]
    FileEmpty,
    #[strum(serialize = "report.error.reporting.file.invalid")]
    FileInvalid,
    #[strum(serialize = "report.error.reporting.io")]
    Io,
    #[strum(serialize = "report.error.reporting.template.exist")]
    TemplateExists,
    #[strum(serialize = "report.error.reporting.parameter.missing")]
    ParameterMissing,
    #[strum(serialize = "report.error.reporting.parameter.incorrectType")]
    ParameterIncorrectType,
    #[strum(serialize = "report.error.reporting.parameter.malformedDependency")]
    MalformedDependency,
    #[strum(serialize = "report.error.authorization.right.notFound")]
    RightNotFound,
}

impl MessageKey {
    /// Returns the key as it appears in the message bundles.
    #[inline]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Failures raised while validating an uploaded report definition or the
/// template state it is applied to.
#[derive(Debug, Error)]
#[must_use = "reporting errors should be reported to the caller"]
pub enum ReportingError {
    /// No file was attached to the request.
    #[error("report file is missing")]
    FileMissing,

    /// The file name does not carry the `.jrxml` extension.
    #[error("file '{file_name}' is not a .jrxml report definition")]
    IncorrectFileType { file_name: String },

    /// The file has no content.
    #[error("file '{file_name}' is empty")]
    FileEmpty { file_name: String },

    /// The report compiler rejected the file.
    #[error("file '{file_name}' is not a valid report definition: {source}")]
    FileInvalid {
        file_name: String,
        #[source]
        source: CompileError,
    },

    /// Reading the upload or writing the compiled payload failed.
    #[error("I/O error while processing report file: {0}")]
    Io(String),

    /// A template with the same name is already stored.
    #[error("template '{0}' already exists")]
    TemplateExists(String),

    /// A prompting parameter lacks a mandatory property.
    #[error("parameter '{parameter}' is missing property '{property}'")]
    ParameterMissing {
        parameter: String,
        property: &'static str,
    },

    /// A prompting parameter declares a value class outside the registry.
    #[error("parameter '{parameter}' has unsupported data type '{data_type}'")]
    ParameterIncorrectType {
        parameter: String,
        data_type: String,
    },

    /// A dependency entry does not split into exactly three segments.
    #[error(
        "parameter '{parameter}' has malformed dependency '{value}': \
         expected 3 colon-separated segments, found {segments}"
    )]
    MalformedDependency {
        parameter: String,
        value: String,
        segments: usize,
    },
}

impl ReportingError {
    /// Returns the message key for this error.
    pub fn message_key(&self) -> MessageKey {
        match self {
            Self::FileMissing => MessageKey::FileMissing,
            Self::IncorrectFileType { .. } => MessageKey::FileIncorrectType,
            Self::FileEmpty { .. } => MessageKey::FileEmpty,
            Self::FileInvalid { .. } => MessageKey::FileInvalid,
            Self::Io(_) => MessageKey::Io,
            Self::TemplateExists(_) => MessageKey::TemplateExists,
            Self::ParameterMissing { .. } => MessageKey::ParameterMissing,
            Self::ParameterIncorrectType { .. } => MessageKey::ParameterIncorrectType,
            Self::MalformedDependency { .. } => MessageKey::MalformedDependency,
        }
    }

    /// Returns the positional arguments of the localized message.
    pub fn message_params(&self) -> Vec<String> {
        match self {
            Self::FileMissing => vec![],
            Self::IncorrectFileType { file_name } | Self::FileEmpty { file_name } => {
                vec![file_name.clone()]
            }
            Self::FileInvalid { file_name, source } => {
                vec![file_name.clone(), source.to_string()]
            }
            Self::Io(message) => vec![message.clone()],
            Self::TemplateExists(name) => vec![name.clone()],
            Self::ParameterMissing { property, .. } => vec![(*property).to_owned()],
            Self::ParameterIncorrectType {
                parameter,
                data_type,
            } => vec![parameter.clone(), data_type.clone()],
            Self::MalformedDependency {
                parameter, value, ..
            } => vec![parameter.clone(), value.clone()],
        }
    }
}

/// Failures of authorization preconditions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[must_use = "validation errors should be reported to the caller"]
pub enum ValidationError {
    /// A required right is unknown to the rights service.
    #[error("right '{0}' not found")]
    RightNotFound(String),
}

impl ValidationError {
    /// Returns the message key for this error.
    pub fn message_key(&self) -> MessageKey {
        match self {
            Self::RightNotFound(_) => MessageKey::RightNotFound,
        }
    }

    /// Returns the positional arguments of the localized message.
    pub fn message_params(&self) -> Vec<String> {
        match self {
            Self::RightNotFound(right) => vec![right.clone()],
        }
    }
}
