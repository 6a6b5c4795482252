//! Template lifecycle operations.

mod request;
mod service;

pub use request::map_request_parameters;
pub use service::TemplateService;
