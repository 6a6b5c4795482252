//! Convenient re-exports for common use.

pub use reporting_core::prelude::*;

pub use crate::error::{Error, Result};
pub use crate::rights::RightLookup;
pub use crate::store::TemplateStore;
pub use crate::template::TemplateService;
pub use crate::upload::TemplateUpload;
