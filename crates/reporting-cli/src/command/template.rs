use anyhow::{Context, bail};
use reporting_core::model::Template;
use reporting_postgres::query::Pagination;
use reporting_service::{TemplateService, TemplateUpload};

use super::print_json;
use crate::TRACING_TARGET_COMMAND;
use crate::config::{Command, ListArgs, MapParamsArgs, NameArgs, UploadArgs};

pub async fn execute(service: &TemplateService, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Save(args) => save(service, args).await,
        Command::Insert(args) => insert(service, args).await,
        Command::Replace(args) => replace(service, args).await,
        Command::Show(args) => show(service, args).await,
        Command::List(args) => list(service, args).await,
        Command::Delete(args) => delete(service, args).await,
        Command::MapParams(args) => map_params(service, args).await,
        Command::Migrate | Command::MigrationStatus => {
            bail!("migration commands do not use the template service")
        }
    }
}

async fn read_upload(args: &UploadArgs) -> anyhow::Result<Option<TemplateUpload>> {
    let Some(path) = &args.file else {
        return Ok(None);
    };

    let upload = TemplateUpload::from_path(path)
        .await
        .map_err(reporting_service::Error::from)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(Some(upload))
}

/// Builds the entity handed to the insert and replace paths.
fn new_template(args: &UploadArgs) -> Template {
    let template = Template::new(&args.name)
        .with_description(args.description.clone())
        .with_required_rights(args.rights.iter().cloned());

    match &args.template_type {
        Some(template_type) => template.with_type(template_type),
        None => template,
    }
}

async fn save(service: &TemplateService, args: UploadArgs) -> anyhow::Result<()> {
    let upload = read_upload(&args).await?;
    let template = service
        .save_template(
            upload.as_ref(),
            &args.name,
            args.description.clone(),
            &args.rights,
        )
        .await
        .context("failed to save template")?;

    print_json(&template)
}

async fn insert(service: &TemplateService, args: UploadArgs) -> anyhow::Result<()> {
    service
        .validate_required_rights(&args.rights)
        .await
        .context("invalid required rights")?;

    let upload = read_upload(&args).await?;
    let template = service
        .insert_template(new_template(&args), upload.as_ref())
        .await
        .context("failed to insert template")?;

    print_json(&template)
}

async fn replace(service: &TemplateService, args: UploadArgs) -> anyhow::Result<()> {
    service
        .validate_required_rights(&args.rights)
        .await
        .context("invalid required rights")?;

    let upload = read_upload(&args).await?;
    let template = service
        .replace_template(new_template(&args), upload.as_ref())
        .await
        .context("failed to replace template")?;

    print_json(&template)
}

async fn show(service: &TemplateService, args: NameArgs) -> anyhow::Result<()> {
    match service.find_template(&args.name).await? {
        Some(template) => print_json(&template),
        None => bail!("template '{}' not found", args.name),
    }
}

async fn list(service: &TemplateService, args: ListArgs) -> anyhow::Result<()> {
    let pagination = Pagination::from_page(args.page, args.page_size);
    let templates = service.list_templates(pagination).await?;

    tracing::debug!(
        target: TRACING_TARGET_COMMAND,
        page = pagination.page_number(),
        count = templates.len(),
        "Templates listed"
    );

    print_json(&templates)
}

async fn delete(service: &TemplateService, args: NameArgs) -> anyhow::Result<()> {
    if !service.delete_template(&args.name).await? {
        bail!("template '{}' not found", args.name);
    }

    tracing::info!(
        target: TRACING_TARGET_COMMAND,
        template = %args.name,
        "Template deleted"
    );
    Ok(())
}

async fn map_params(service: &TemplateService, args: MapParamsArgs) -> anyhow::Result<()> {
    let Some(template) = service.find_template(&args.name).await? else {
        bail!("template '{}' not found", args.name);
    };

    let mapped = service.map_request_parameters(&template, &args.request());
    print_json(&mapped)
}

#[cfg(test)]
mod tests {
    use reporting_core::model::DEFAULT_TEMPLATE_TYPE;

    use super::*;

    fn args(template_type: Option<&str>) -> UploadArgs {
        UploadArgs {
            file: None,
            name: "Stock Status".into(),
            description: Some("Monthly".into()),
            rights: vec!["REPORTS_VIEW".into(), "REPORTS_VIEW".into()],
            template_type: template_type.map(str::to_owned),
        }
    }

    #[test]
    fn new_template_uses_arguments() {
        let template = new_template(&args(Some("Stockout")));
        assert_eq!(template.name, "Stock Status");
        assert_eq!(template.template_type, "Stockout");
        assert_eq!(template.description.as_deref(), Some("Monthly"));
        assert_eq!(template.required_rights, vec!["REPORTS_VIEW"]);
    }

    #[test]
    fn new_template_defaults_type() {
        assert_eq!(new_template(&args(None)).template_type, DEFAULT_TEMPLATE_TYPE);
    }

    #[tokio::test]
    async fn upload_without_file_is_none() {
        assert!(read_upload(&args(None)).await.unwrap().is_none());
    }
}
