//! Template repository.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use reporting_core::model as domain;
use uuid::Uuid;

use super::Pagination;
use crate::model::{NewTemplate, NewTemplateParameter, Template, TemplateParameter, UpdateTemplate};
use crate::{PgConnection, PgError, PgResult, TRACING_TARGET_QUERY, schema};

/// Repository for report templates and their parameters.
///
/// Every method reads or writes the whole aggregate: a template row is never
/// stored without its parameter list, and the list is always replaced as a
/// whole, never merged.
pub trait TemplateRepository {
    /// Finds a template by its unique name.
    fn find_template_by_name(
        &mut self,
        name: &str,
    ) -> impl Future<Output = PgResult<Option<domain::Template>>> + Send;

    /// Finds a template by ID.
    fn find_template_by_id(
        &mut self,
        template_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<domain::Template>>> + Send;

    /// Lists templates ordered by name.
    fn list_templates(
        &mut self,
        pagination: Pagination,
    ) -> impl Future<Output = PgResult<Vec<domain::Template>>> + Send;

    /// Inserts a new template.
    ///
    /// Fails with a `templates_name_unique` violation if the name is taken.
    fn create_template(
        &mut self,
        template: &domain::Template,
    ) -> impl Future<Output = PgResult<domain::Template>> + Send;

    /// Inserts or overwrites a template by ID and replaces its parameters.
    ///
    /// The template keeps its identifier, so references to it stay valid.
    fn save_template(
        &mut self,
        template: &domain::Template,
    ) -> impl Future<Output = PgResult<domain::Template>> + Send;

    /// Deletes any template with the same name, then inserts this one.
    ///
    /// Both steps run in one transaction; the stored template takes the
    /// identifier of `template`.
    fn replace_template(
        &mut self,
        template: &domain::Template,
    ) -> impl Future<Output = PgResult<domain::Template>> + Send;

    /// Deletes a template and its parameters, returning whether it existed.
    fn delete_template(&mut self, template_id: Uuid) -> impl Future<Output = PgResult<bool>> + Send;

    /// Deletes a template by name, returning whether it existed.
    fn delete_template_by_name(&mut self, name: &str)
    -> impl Future<Output = PgResult<bool>> + Send;
}

impl TemplateRepository for PgConnection {
    async fn find_template_by_name(&mut self, name: &str) -> PgResult<Option<domain::Template>> {
        use schema::templates::dsl;

        let row = dsl::templates
            .filter(dsl::name.eq(name))
            .select(Template::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)?;

        match row {
            Some(row) => Ok(Some(load_aggregate(self, row).await?)),
            None => Ok(None),
        }
    }

    async fn find_template_by_id(
        &mut self,
        template_id: Uuid,
    ) -> PgResult<Option<domain::Template>> {
        use schema::templates::dsl;

        let row = dsl::templates
            .filter(dsl::id.eq(template_id))
            .select(Template::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)?;

        match row {
            Some(row) => Ok(Some(load_aggregate(self, row).await?)),
            None => Ok(None),
        }
    }

    async fn list_templates(&mut self, pagination: Pagination) -> PgResult<Vec<domain::Template>> {
        use schema::template_parameters::dsl as params;
        use schema::templates::dsl;

        let rows = dsl::templates
            .order(dsl::name.asc())
            .limit(pagination.limit())
            .offset(pagination.offset())
            .select(Template::as_select())
            .load(self)
            .await
            .map_err(PgError::from)?;

        let parameters = TemplateParameter::belonging_to(&rows)
            .order(params::position.asc())
            .select(TemplateParameter::as_select())
            .load(self)
            .await
            .map_err(PgError::from)?;

        parameters
            .grouped_by(&rows)
            .into_iter()
            .zip(rows)
            .map(|(parameters, row)| {
                let parameters = parameters
                    .into_iter()
                    .map(TemplateParameter::into_domain)
                    .collect::<PgResult<Vec<_>>>()?;
                Ok(row.into_domain(parameters))
            })
            .collect()
    }

    async fn create_template(&mut self, template: &domain::Template) -> PgResult<domain::Template> {
        let saved = self
            .transaction::<_, PgError, _>(|conn| {
                async move {
                    let row = insert_row(conn, template).await?;
                    write_parameters(conn, row.id, &template.parameters).await?;
                    load_aggregate(conn, row).await
                }
                .scope_boxed()
            })
            .await?;

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            template_id = %saved.id,
            name = %saved.name,
            parameters = saved.parameters.len(),
            "template created"
        );

        Ok(saved)
    }

    async fn save_template(&mut self, template: &domain::Template) -> PgResult<domain::Template> {
        let saved = self
            .transaction::<_, PgError, _>(|conn| {
                async move {
                    let row = upsert_row(conn, template).await?;
                    write_parameters(conn, row.id, &template.parameters).await?;
                    load_aggregate(conn, row).await
                }
                .scope_boxed()
            })
            .await?;

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            template_id = %saved.id,
            name = %saved.name,
            parameters = saved.parameters.len(),
            "template saved"
        );

        Ok(saved)
    }

    async fn replace_template(&mut self, template: &domain::Template) -> PgResult<domain::Template> {
        let (removed, saved) = self
            .transaction::<_, PgError, _>(|conn| {
                async move {
                    let removed = delete_by_name(conn, &template.name).await?;
                    let row = insert_row(conn, template).await?;
                    write_parameters(conn, row.id, &template.parameters).await?;
                    Ok((removed, load_aggregate(conn, row).await?))
                }
                .scope_boxed()
            })
            .await?;

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            template_id = %saved.id,
            name = %saved.name,
            replaced = removed,
            "template replaced"
        );

        Ok(saved)
    }

    async fn delete_template(&mut self, template_id: Uuid) -> PgResult<bool> {
        use schema::templates::dsl;

        let deleted = diesel::delete(dsl::templates.filter(dsl::id.eq(template_id)))
            .execute(self)
            .await
            .map_err(PgError::from)?;

        tracing::debug!(target: TRACING_TARGET_QUERY, %template_id, deleted, "template deleted");
        Ok(deleted > 0)
    }

    async fn delete_template_by_name(&mut self, name: &str) -> PgResult<bool> {
        let deleted = delete_by_name(self, name).await?;
        tracing::debug!(target: TRACING_TARGET_QUERY, name, deleted, "template deleted by name");
        Ok(deleted)
    }
}

async fn insert_row(conn: &mut PgConnection, template: &domain::Template) -> PgResult<Template> {
    use schema::templates;

    let new_template = NewTemplate::from(template);
    diesel::insert_into(templates::table)
        .values(&new_template)
        .returning(Template::as_returning())
        .get_result(conn)
        .await
        .map_err(PgError::from)
}

async fn upsert_row(conn: &mut PgConnection, template: &domain::Template) -> PgResult<Template> {
    use schema::templates::{self, dsl};

    let new_template = NewTemplate::from(template);
    let changes = UpdateTemplate::from(template);
    diesel::insert_into(templates::table)
        .values(&new_template)
        .on_conflict(dsl::id)
        .do_update()
        .set(&changes)
        .returning(Template::as_returning())
        .get_result(conn)
        .await
        .map_err(PgError::from)
}

async fn delete_by_name(conn: &mut PgConnection, name: &str) -> PgResult<bool> {
    use schema::templates::dsl;

    let deleted = diesel::delete(dsl::templates.filter(dsl::name.eq(name)))
        .execute(conn)
        .await
        .map_err(PgError::from)?;

    Ok(deleted > 0)
}

async fn write_parameters(
    conn: &mut PgConnection,
    template_id: Uuid,
    parameters: &[domain::TemplateParameter],
) -> PgResult<()> {
    use schema::template_parameters::{self, dsl};

    diesel::delete(dsl::template_parameters.filter(dsl::template_id.eq(template_id)))
        .execute(conn)
        .await
        .map_err(PgError::from)?;

    if parameters.is_empty() {
        return Ok(());
    }

    let rows = parameters
        .iter()
        .enumerate()
        .map(|(position, parameter)| {
            NewTemplateParameter::from_domain(template_id, position, parameter)
        })
        .collect::<PgResult<Vec<_>>>()?;

    diesel::insert_into(template_parameters::table)
        .values(&rows)
        .execute(conn)
        .await
        .map_err(PgError::from)?;

    Ok(())
}

async fn load_aggregate(conn: &mut PgConnection, row: Template) -> PgResult<domain::Template> {
    use schema::template_parameters::dsl;

    let parameters = TemplateParameter::belonging_to(&row)
        .order(dsl::position.asc())
        .select(TemplateParameter::as_select())
        .load(conn)
        .await
        .map_err(PgError::from)?
        .into_iter()
        .map(TemplateParameter::into_domain)
        .collect::<PgResult<Vec<_>>>()?;

    Ok(row.into_domain(parameters))
}
