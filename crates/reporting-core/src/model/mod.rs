//! Persisted shapes of report templates and the rights guarding them.

mod parameter;
mod right;
mod template;

pub use parameter::{ParameterDependency, TemplateParameter};
pub use right::Right;
pub use template::{DEFAULT_TEMPLATE_TYPE, Template};
