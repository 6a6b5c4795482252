//! Convenient re-exports for common use.

pub use crate::compiler::{CompileError, CompiledReport, JrxmlCompiler, ReportCompiler};
pub use crate::error::{MessageKey, ReportingError, ValidationError};
pub use crate::model::{ParameterDependency, Right, Template, TemplateParameter};
pub use crate::value_type::ParameterValueType;
