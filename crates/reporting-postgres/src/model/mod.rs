//! Diesel models for the template tables.

mod template;
mod template_parameter;

pub use template::{NewTemplate, Template, UpdateTemplate};
pub use template_parameter::{NewTemplateParameter, TemplateParameter};
