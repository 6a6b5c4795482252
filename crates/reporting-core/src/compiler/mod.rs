//! Report definition compilation.
//!
//! A [`ReportCompiler`] turns the raw bytes of an uploaded definition into a
//! [`CompiledReport`]: the report-level properties and the parameter table,
//! including the built-in parameters every report receives. The compiled form
//! crosses the storage boundary through [`CompiledReport::to_bytes`] and
//! [`CompiledReport::from_bytes`].

mod builtin;
mod jrxml;
mod report;

use thiserror::Error;

pub use builtin::{BUILTIN_PARAMETERS, is_builtin_parameter};
pub use jrxml::JrxmlCompiler;
pub use report::{CompiledReport, ReportParameter};

/// Report-level property naming the template category.
pub const REPORT_TYPE_PROPERTY: &str = "reportType";

/// Reasons a report definition fails to compile.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The document is not well-formed XML.
    #[error("malformed XML at byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    /// An element carries a malformed attribute.
    #[error("malformed attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// An element is opened but never closed.
    #[error("element '{0}' is not closed")]
    Unclosed(String),

    /// An entity or character reference could not be resolved.
    #[error("invalid escape sequence: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    /// The document is not valid UTF-8.
    #[error("report definition is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// The root element is not a report definition.
    #[error("unexpected root element '{0}', expected 'jasperReport'")]
    UnexpectedRoot(String),

    /// The document contains no elements.
    #[error("report definition is empty")]
    MissingRoot,

    /// A mandatory attribute is absent or blank.
    #[error("element '{element}' is missing attribute '{attribute}'")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    /// An attribute has a value outside its domain.
    #[error("attribute '{attribute}' has invalid value '{value}'")]
    InvalidAttribute {
        attribute: &'static str,
        value: String,
    },

    /// Two parameters share a name, or a parameter shadows a built-in one.
    #[error("parameter '{0}' is declared more than once")]
    DuplicateParameter(String),
}

/// Compiles report definitions.
pub trait ReportCompiler: Send + Sync {
    /// Compiles the raw definition into its executable form.
    fn compile(&self, source: &[u8]) -> Result<CompiledReport, CompileError>;
}
