#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for template save, insert and replace operations.
pub const TRACING_TARGET_TEMPLATE: &str = "reporting_service::template";

/// Tracing target for right resolution.
pub const TRACING_TARGET_RIGHTS: &str = "reporting_service::rights";

/// Tracing target for template store access.
pub const TRACING_TARGET_STORE: &str = "reporting_service::store";

mod error;
#[doc(hidden)]
pub mod prelude;
pub mod rights;
mod store;
pub mod template;
mod upload;

pub use error::{Error, Result};
#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub use rights::MockRightLookup;
pub use rights::{ReferenceDataClient, ReferenceDataConfig, RightLookup, RightLookupError};
#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub use store::MemoryTemplateRepository;
pub use store::TemplateStore;
pub use template::{TemplateService, map_request_parameters};
pub use upload::{JRXML_EXTENSION, TemplateUpload};
