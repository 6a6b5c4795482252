#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for report definition compilation.
pub const TRACING_TARGET_COMPILER: &str = "reporting_core::compiler";

/// Tracing target for parameter extraction.
pub const TRACING_TARGET_EXTRACT: &str = "reporting_core::extract";

pub mod compiler;
mod error;
mod extract;
pub mod model;
#[doc(hidden)]
pub mod prelude;
mod property;
mod value_type;

pub use error::{MessageKey, ReportingError, ValidationError};
pub use extract::{build_parameter, extract_parameters};
pub use property::{
    DependencyFormatError, parse_boolean_property, split_list_property, strip_quotes,
};
pub use value_type::ParameterValueType;
