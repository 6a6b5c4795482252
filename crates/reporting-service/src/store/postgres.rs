use reporting_core::model::Template;
use reporting_postgres::PgClient;
use reporting_postgres::query::{Pagination, TemplateRepository};

use super::TemplateStore;
use crate::{Error, Result, TRACING_TARGET_STORE};

#[async_trait::async_trait]
impl TemplateStore for PgClient {
    async fn find_by_name(&self, name: &str) -> Result<Option<Template>> {
        let mut conn = self.get_connection().await?;
        Ok(conn.find_template_by_name(name).await?)
    }

    async fn list(&self, pagination: Pagination) -> Result<Vec<Template>> {
        let mut conn = self.get_connection().await?;
        Ok(conn.list_templates(pagination).await?)
    }

    async fn create(&self, template: &Template) -> Result<Template> {
        let mut conn = self.get_connection().await?;
        conn.create_template(template)
            .await
            .map_err(|e| Error::from_store(e, &template.name))
    }

    async fn save(&self, template: &Template) -> Result<Template> {
        let mut conn = self.get_connection().await?;
        conn.save_template(template)
            .await
            .map_err(|e| Error::from_store(e, &template.name))
    }

    async fn replace(&self, template: &Template) -> Result<Template> {
        let mut conn = self.get_connection().await?;
        conn.replace_template(template)
            .await
            .map_err(|e| Error::from_store(e, &template.name))
    }

    async fn delete_by_name(&self, name: &str) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        let deleted = conn.delete_template_by_name(name).await?;

        tracing::debug!(
            target: TRACING_TARGET_STORE,
            template = name,
            deleted,
            "Template delete by name completed"
        );

        Ok(deleted)
    }
}
