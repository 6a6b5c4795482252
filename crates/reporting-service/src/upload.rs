//! Uploaded report definition files.

use std::path::Path;

use bytes::Bytes;
use reporting_core::ReportingError;

/// Extension every accepted report definition must carry. Compared
/// case-sensitively.
pub const JRXML_EXTENSION: &str = ".jrxml";

/// A report definition file as received from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateUpload {
    /// Original file name, including the extension.
    pub file_name: String,
    /// Raw file content.
    pub content: Bytes,
}

impl TemplateUpload {
    /// Creates an upload from a file name and its content.
    pub fn new(file_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }

    /// Reads an upload from disk, naming it after the last path component.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ReportingError> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let content = tokio::fs::read(path)
            .await
            .map_err(|e| ReportingError::Io(format!("{}: {}", path.display(), e)))?;

        Ok(Self::new(file_name, content))
    }

    /// Returns whether the file name ends with [`JRXML_EXTENSION`].
    #[inline]
    pub fn has_jrxml_extension(&self) -> bool {
        self.file_name.ends_with(JRXML_EXTENSION)
    }

    /// Returns whether the file has no content.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
