//! Repositories for the template tables.
//!
//! Listing queries take a [`Pagination`] so result sets stay bounded.

mod pagination;
mod template;

pub use pagination::{MAX_LIMIT, Pagination};
pub use template::TemplateRepository;
