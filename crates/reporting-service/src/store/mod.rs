//! Template persistence seam used by the service.
//!
//! [`TemplateStore`] is implemented for [`PgClient`](reporting_postgres::PgClient),
//! which checks out a pooled connection per call and delegates to
//! [`TemplateRepository`](reporting_postgres::query::TemplateRepository).
//! The `test-utils` feature adds the in-memory [`MemoryTemplateRepository`].

#[cfg(any(test, feature = "test-utils"))]
mod memory;
mod postgres;

use std::sync::Arc;

#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub use memory::MemoryTemplateRepository;
use reporting_core::model::Template;
use reporting_postgres::query::Pagination;

use crate::Result;

/// Whole-aggregate access to stored templates.
///
/// Implementations report a template-name collision on write as
/// [`ReportingError::TemplateExists`](reporting_core::ReportingError::TemplateExists).
#[async_trait::async_trait]
pub trait TemplateStore: Send + Sync {
    /// Finds a template by its unique name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Template>>;

    /// Lists templates ordered by name.
    async fn list(&self, pagination: Pagination) -> Result<Vec<Template>>;

    /// Inserts a new template; never overwrites.
    async fn create(&self, template: &Template) -> Result<Template>;

    /// Inserts or overwrites a template by id, replacing its parameters.
    async fn save(&self, template: &Template) -> Result<Template>;

    /// Deletes any same-named template and inserts this one atomically.
    async fn replace(&self, template: &Template) -> Result<Template>;

    /// Deletes a template by name, returning whether it existed.
    async fn delete_by_name(&self, name: &str) -> Result<bool>;
}

#[async_trait::async_trait]
impl<T: TemplateStore + ?Sized> TemplateStore for Arc<T> {
    async fn find_by_name(&self, name: &str) -> Result<Option<Template>> {
        (**self).find_by_name(name).await
    }

    async fn list(&self, pagination: Pagination) -> Result<Vec<Template>> {
        (**self).list(pagination).await
    }

    async fn create(&self, template: &Template) -> Result<Template> {
        (**self).create(template).await
    }

    async fn save(&self, template: &Template) -> Result<Template> {
        (**self).save(template).await
    }

    async fn replace(&self, template: &Template) -> Result<Template> {
        (**self).replace(template).await
    }

    async fn delete_by_name(&self, name: &str) -> Result<bool> {
        (**self).delete_by_name(name).await
    }
}
