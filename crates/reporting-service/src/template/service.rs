//! Template service: validates uploaded report definitions and persists them.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use reporting_core::compiler::{JrxmlCompiler, ReportCompiler};
use reporting_core::model::Template;
use reporting_core::{ReportingError, ValidationError, extract_parameters};
use reporting_postgres::query::Pagination;

use super::map_request_parameters;
use crate::rights::RightLookup;
use crate::store::TemplateStore;
use crate::{Result, TRACING_TARGET_RIGHTS, TRACING_TARGET_TEMPLATE, TemplateUpload};

/// Validates, compiles and persists report templates.
///
/// Three write paths exist and differ in what happens to a stored template
/// with the same name:
///
/// - [`save_template`](Self::save_template) updates it in place and keeps its
///   id, so records referencing the template stay valid;
/// - [`insert_template`](Self::insert_template) refuses to touch it;
/// - [`replace_template`](Self::replace_template) deletes it and stores the
///   new template under a new id, breaking references to the old one.
///
/// Every path validates and extracts the upload completely before writing,
/// so a rejected file never reaches the store.
#[derive(Clone)]
pub struct TemplateService {
    compiler: Arc<dyn ReportCompiler>,
    rights: Arc<dyn RightLookup>,
    store: Arc<dyn TemplateStore>,
}

impl std::fmt::Debug for TemplateService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateService").finish_non_exhaustive()
    }
}

impl TemplateService {
    /// Creates a service using the built-in [`JrxmlCompiler`].
    pub fn new<S, R>(store: S, rights: R) -> Self
    where
        S: TemplateStore + 'static,
        R: RightLookup + 'static,
    {
        Self {
            compiler: Arc::new(JrxmlCompiler::new()),
            rights: Arc::new(rights),
            store: Arc::new(store),
        }
    }

    /// Replaces the report compiler.
    #[must_use]
    pub fn with_compiler(mut self, compiler: impl ReportCompiler + 'static) -> Self {
        self.compiler = Arc::new(compiler);
        self
    }

    /// Saves a template by name, merging into a stored template of the same
    /// name.
    ///
    /// Every required right must be known. An existing template keeps its id
    /// and type; its description and required rights are overwritten and its
    /// parameters rebuilt from the upload. Otherwise a new template with the
    /// default type is created.
    #[tracing::instrument(
        skip(self, upload, description, required_rights),
        target = TRACING_TARGET_TEMPLATE
    )]
    pub async fn save_template(
        &self,
        upload: Option<&TemplateUpload>,
        name: &str,
        description: Option<String>,
        required_rights: &[String],
    ) -> Result<Template> {
        let start = Instant::now();
        self.validate_required_rights(required_rights).await?;

        let existing = self.store.find_by_name(name).await?;
        let merged = existing.is_some();
        let mut template = match existing {
            Some(mut template) => {
                template.description = description;
                template.replace_required_rights(required_rights.iter().cloned());
                template
            }
            None => Template::new(name)
                .with_description(description)
                .with_required_rights(required_rights.iter().cloned()),
        };

        self.validate_file_and_set_data(&mut template, upload)?;
        let saved = self.store.save(&template).await?;

        tracing::info!(
            target: TRACING_TARGET_TEMPLATE,
            template_id = %saved.id,
            merged,
            parameters = saved.parameters.len(),
            elapsed = ?start.elapsed(),
            "Template saved"
        );

        Ok(saved)
    }

    /// Validates the upload into `template` and stores it as a new template.
    ///
    /// Fails with [`ReportingError::TemplateExists`] if the name is taken;
    /// nothing stored is ever modified.
    #[tracing::instrument(
        skip_all,
        target = TRACING_TARGET_TEMPLATE,
        fields(template = %template.name)
    )]
    pub async fn insert_template(
        &self,
        mut template: Template,
        upload: Option<&TemplateUpload>,
    ) -> Result<Template> {
        if self.store.find_by_name(&template.name).await?.is_some() {
            tracing::debug!(
                target: TRACING_TARGET_TEMPLATE,
                "Template name already taken"
            );
            return Err(ReportingError::TemplateExists(template.name).into());
        }

        self.validate_file_and_set_data(&mut template, upload)?;
        let created = self.store.create(&template).await?;

        tracing::info!(
            target: TRACING_TARGET_TEMPLATE,
            template_id = %created.id,
            parameters = created.parameters.len(),
            "Template inserted"
        );

        Ok(created)
    }

    /// Validates the upload into `template`, then deletes any stored template
    /// of the same name and stores this one in its place.
    ///
    /// The stored template takes the id of `template`, so references to the
    /// replaced template no longer resolve. Validation runs before the delete:
    /// a rejected upload leaves the stored template untouched.
    #[tracing::instrument(
        skip_all,
        target = TRACING_TARGET_TEMPLATE,
        fields(template = %template.name)
    )]
    pub async fn replace_template(
        &self,
        mut template: Template,
        upload: Option<&TemplateUpload>,
    ) -> Result<Template> {
        self.validate_file_and_set_data(&mut template, upload)?;
        let replaced = self.store.replace(&template).await?;

        tracing::info!(
            target: TRACING_TARGET_TEMPLATE,
            template_id = %replaced.id,
            parameters = replaced.parameters.len(),
            "Template replaced"
        );

        Ok(replaced)
    }

    /// Checks the upload, compiles it and applies the result to `template`.
    ///
    /// The checks run in order and stop at the first failure: the upload is
    /// present, its name ends with `.jrxml`, it is not empty, it compiles.
    /// On success the `reportType` report property overrides the template
    /// type, the parameter list is rebuilt from the prompting parameters and
    /// the compiled report is stored in [`Template::data`]. On failure
    /// `template` is left unchanged.
    pub fn validate_file_and_set_data(
        &self,
        template: &mut Template,
        upload: Option<&TemplateUpload>,
    ) -> Result<(), ReportingError> {
        let upload = upload.ok_or(ReportingError::FileMissing)?;

        if !upload.has_jrxml_extension() {
            return Err(ReportingError::IncorrectFileType {
                file_name: upload.file_name.clone(),
            });
        }

        if upload.is_empty() {
            return Err(ReportingError::FileEmpty {
                file_name: upload.file_name.clone(),
            });
        }

        let report = self.compiler.compile(&upload.content).map_err(|source| {
            tracing::debug!(
                target: TRACING_TARGET_TEMPLATE,
                file_name = %upload.file_name,
                error = %source,
                "Report definition rejected"
            );
            ReportingError::FileInvalid {
                file_name: upload.file_name.clone(),
                source,
            }
        })?;

        let parameters = extract_parameters(&report)?;
        let data = report
            .to_bytes()
            .map_err(|e| ReportingError::Io(e.to_string()))?;

        if let Some(report_type) = report.report_type() {
            template.template_type = report_type.to_owned();
        }
        template.parameters = parameters;
        template.data = data;

        tracing::debug!(
            target: TRACING_TARGET_TEMPLATE,
            file_name = %upload.file_name,
            template_type = %template.template_type,
            parameters = template.parameters.len(),
            "Report definition validated"
        );

        Ok(())
    }

    /// Fails with [`ValidationError::RightNotFound`] naming the first right
    /// the rights service does not know.
    pub async fn validate_required_rights(&self, required_rights: &[String]) -> Result<()> {
        for right in required_rights {
            if self.rights.find_right(right).await?.is_none() {
                tracing::debug!(
                    target: TRACING_TARGET_RIGHTS,
                    right = %right,
                    "Required right not found"
                );
                return Err(ValidationError::RightNotFound(right.clone()).into());
            }
        }

        Ok(())
    }

    /// Selects the values of `template`'s parameters from a request map.
    ///
    /// See [`map_request_parameters`].
    pub fn map_request_parameters(
        &self,
        template: &Template,
        request: &HashMap<String, Vec<String>>,
    ) -> HashMap<String, String> {
        map_request_parameters(template, request)
    }

    /// Finds a stored template by name.
    pub async fn find_template(&self, name: &str) -> Result<Option<Template>> {
        self.store.find_by_name(name).await
    }

    /// Lists stored templates ordered by name.
    pub async fn list_templates(&self, pagination: Pagination) -> Result<Vec<Template>> {
        self.store.list(pagination).await
    }

    /// Deletes a stored template by name, returning whether it existed.
    #[tracing::instrument(skip(self), target = TRACING_TARGET_TEMPLATE)]
    pub async fn delete_template(&self, name: &str) -> Result<bool> {
        self.store.delete_by_name(name).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use reporting_core::compiler::{CompileError, CompiledReport};
    use reporting_core::model::{DEFAULT_TEMPLATE_TYPE, ParameterDependency};
    use reporting_core::{MessageKey, ParameterValueType};

    use super::*;
    use crate::{Error, MemoryTemplateRepository, MockRightLookup};

    const STOCK_STATUS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<jasperReport xmlns="http://jasperreports.sourceforge.net/jasperreports" name="Stock Status">
    <property name="reportType" value="Stockout"/>
    <parameter name="program" class="java.util.UUID">
        <property name="displayName" value="Program"/>
        <property name="required" value="TRUE"/>
        <property name="selectExpression" value="/api/programs"/>
        <property name="selectProperty" value="id"/>
        <property name="displayProperty" value="name"/>
    </parameter>
    <parameter name="facility" class="java.util.UUID">
        <property name="displayName" value="Facility"/>
        <property name="dependencies" value="program:id:programId,zone:code:zoneCode"/>
        <parameterDescription><![CDATA[Supplying facility]]></parameterDescription>
    </parameter>
    <parameter name="period">
        <property name="displayName" value="Period"/>
        <property name="options" value="a,b\,c"/>
        <defaultValueExpression><![CDATA["2017-Q1"]]></defaultValueExpression>
    </parameter>
    <parameter name="page_size" class="java.lang.Integer" isForPrompting="false"/>
    <queryString><![CDATA[SELECT 1]]></queryString>
</jasperReport>"#;

    const NO_PARAMETERS: &str =
        r#"<jasperReport name="Static"><queryString>SELECT 1</queryString></jasperReport>"#;

    fn upload(content: &str) -> TemplateUpload {
        TemplateUpload::new("stock_status.jrxml", content.to_owned())
    }

    fn with_parameter(parameter: &str) -> String {
        format!(r#"<jasperReport name="Single">{parameter}</jasperReport>"#)
    }

    fn rights(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_owned()).collect()
    }

    #[derive(Clone, Default)]
    struct CountingCompiler {
        compiles: Arc<AtomicUsize>,
    }

    impl ReportCompiler for CountingCompiler {
        fn compile(&self, source: &[u8]) -> Result<CompiledReport, CompileError> {
            self.compiles.fetch_add(1, Ordering::Relaxed);
            JrxmlCompiler::new().compile(source)
        }
    }

    struct Fixture {
        service: TemplateService,
        store: MemoryTemplateRepository,
        rights: MockRightLookup,
        compiler: CountingCompiler,
    }

    fn fixture(store: MemoryTemplateRepository) -> Fixture {
        let rights = MockRightLookup::new(["REPORTS_VIEW", "REPORT_TEMPLATES_EDIT"]);
        let compiler = CountingCompiler::default();
        let service = TemplateService::new(store.clone(), rights.clone())
            .with_compiler(compiler.clone());

        Fixture {
            service,
            store,
            rights,
            compiler,
        }
    }

    fn reporting_error(error: Error) -> ReportingError {
        match error {
            Error::Reporting(error) => error,
            other => panic!("expected a reporting error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn save_creates_template_from_upload() {
        let fx = fixture(MemoryTemplateRepository::new());

        let template = fx
            .service
            .save_template(
                Some(&upload(STOCK_STATUS)),
                "Stock Status",
                Some("Monthly stock status".into()),
                &rights(&["REPORTS_VIEW"]),
            )
            .await
            .unwrap();

        assert_eq!(template.template_type, "Stockout");
        assert_eq!(template.required_rights, vec!["REPORTS_VIEW"]);
        assert_eq!(
            template.parameter_names().collect::<Vec<_>>(),
            vec!["program", "facility", "period"]
        );

        let program = template.parameter("program").unwrap();
        assert!(program.required);
        assert_eq!(program.value_type(), Some(ParameterValueType::Uuid));
        assert_eq!(program.select_expression.as_deref(), Some("/api/programs"));
        assert_eq!(program.display_property.as_deref(), Some("name"));

        let period = template.parameter("period").unwrap();
        assert_eq!(period.options, vec!["a", "b,c"]);
        assert_eq!(period.default_value.as_deref(), Some("2017-Q1"));
        assert!(!period.required);

        let report = CompiledReport::from_bytes(&template.data).unwrap();
        assert_eq!(report.name, "Stock Status");
        assert_eq!(fx.store.get(template.id).await, Some(template));
    }

    #[tokio::test]
    async fn dependency_triples_are_extracted_in_order() {
        let fx = fixture(MemoryTemplateRepository::new());
        let mut template = Template::new("Stock Status");

        fx.service
            .validate_file_and_set_data(&mut template, Some(&upload(STOCK_STATUS)))
            .unwrap();

        let facility = template.parameter("facility").unwrap();
        assert_eq!(
            facility.dependencies,
            vec![
                ParameterDependency::new("program", "id", "programId"),
                ParameterDependency::new("zone", "code", "zoneCode"),
            ]
        );
        assert_eq!(facility.description.as_deref(), Some("Supplying facility"));
    }

    #[tokio::test]
    async fn save_merges_into_existing_template() {
        let existing = Template::new("Stock Status")
            .with_type("Custom")
            .with_description(Some("Old".into()))
            .with_required_rights(["REPORTS_VIEW"]);
        let fx = fixture(MemoryTemplateRepository::with_templates([existing.clone()]));

        let saved = fx
            .service
            .save_template(
                Some(&upload(NO_PARAMETERS)),
                "Stock Status",
                Some("New".into()),
                &rights(&["REPORT_TEMPLATES_EDIT"]),
            )
            .await
            .unwrap();

        assert_eq!(saved.id, existing.id);
        assert_eq!(saved.template_type, "Custom");
        assert_eq!(saved.description.as_deref(), Some("New"));
        assert_eq!(saved.required_rights, vec!["REPORT_TEMPLATES_EDIT"]);
        assert_eq!(fx.store.len().await, 1);
    }

    #[tokio::test]
    async fn save_discards_previous_parameters() {
        let fx = fixture(MemoryTemplateRepository::new());
        let first = fx
            .service
            .save_template(Some(&upload(STOCK_STATUS)), "Stock Status", None, &[])
            .await
            .unwrap();
        assert!(first.has_parameters());

        let second = fx
            .service
            .save_template(Some(&upload(NO_PARAMETERS)), "Stock Status", None, &[])
            .await
            .unwrap();

        assert_eq!(second.id, first.id);
        assert!(!second.has_parameters());
    }

    #[tokio::test]
    async fn new_template_without_report_type_gets_default_type() {
        let fx = fixture(MemoryTemplateRepository::new());
        let saved = fx
            .service
            .save_template(Some(&upload(NO_PARAMETERS)), "Static", None, &[])
            .await
            .unwrap();

        assert_eq!(saved.template_type, DEFAULT_TEMPLATE_TYPE);
    }

    #[tokio::test]
    async fn unknown_right_fails_before_any_file_or_store_work() {
        let fx = fixture(MemoryTemplateRepository::new());

        let error = fx
            .service
            .save_template(
                Some(&upload(STOCK_STATUS)),
                "Stock Status",
                None,
                &rights(&["REPORTS_VIEW", "UNKNOWN_RIGHT", "ALSO_UNKNOWN"]),
            )
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            Error::Validation(ValidationError::RightNotFound(ref right)) if right == "UNKNOWN_RIGHT"
        ));
        assert_eq!(fx.rights.lookups(), 2);
        assert_eq!(fx.compiler.compiles.load(Ordering::Relaxed), 0);
        assert_eq!(fx.store.writes(), 0);
    }

    #[tokio::test]
    async fn insert_rejects_taken_name() {
        let existing = Template::new("Stock Status");
        let fx = fixture(MemoryTemplateRepository::with_templates([existing]));

        let error = fx
            .service
            .insert_template(Template::new("Stock Status"), Some(&upload(STOCK_STATUS)))
            .await
            .unwrap_err();

        let error = reporting_error(error);
        assert_eq!(error.message_key(), MessageKey::TemplateExists);
        assert_eq!(fx.compiler.compiles.load(Ordering::Relaxed), 0);
        assert_eq!(fx.store.writes(), 0);
    }

    #[tokio::test]
    async fn insert_creates_new_template() {
        let fx = fixture(MemoryTemplateRepository::new());
        let template = Template::new("Stock Status");
        let id = template.id;

        let created = fx
            .service
            .insert_template(template, Some(&upload(STOCK_STATUS)))
            .await
            .unwrap();

        assert_eq!(created.id, id);
        assert_eq!(created.parameters.len(), 3);
        assert!(created.has_data());
    }

    #[tokio::test]
    async fn replace_gives_new_identity() {
        let existing = Template::new("Stock Status");
        let fx = fixture(MemoryTemplateRepository::with_templates([existing.clone()]));

        let replaced = fx
            .service
            .replace_template(Template::new("Stock Status"), Some(&upload(STOCK_STATUS)))
            .await
            .unwrap();

        assert_ne!(replaced.id, existing.id);
        assert!(fx.store.get(existing.id).await.is_none());
        assert_eq!(fx.store.len().await, 1);
    }

    #[tokio::test]
    async fn rejected_replacement_keeps_stored_template() {
        let existing = Template::new("Stock Status");
        let fx = fixture(MemoryTemplateRepository::with_templates([existing.clone()]));

        let error = fx
            .service
            .replace_template(Template::new("Stock Status"), Some(&upload("<html/>")))
            .await
            .unwrap_err();

        assert_eq!(reporting_error(error).message_key(), MessageKey::FileInvalid);
        assert_eq!(fx.store.get(existing.id).await, Some(existing));
        assert_eq!(fx.store.writes(), 0);
    }

    #[tokio::test]
    async fn wrong_extension_is_rejected_before_compilation() {
        let fx = fixture(MemoryTemplateRepository::new());
        let upload = TemplateUpload::new("report.pdf", STOCK_STATUS.to_owned());
        let mut template = Template::new("Stock Status");

        let error = fx
            .service
            .validate_file_and_set_data(&mut template, Some(&upload))
            .unwrap_err();

        assert!(matches!(
            error,
            ReportingError::IncorrectFileType { ref file_name } if file_name == "report.pdf"
        ));
        assert_eq!(fx.compiler.compiles.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn file_checks_fail_in_order() {
        let fx = fixture(MemoryTemplateRepository::new());
        let mut template = Template::new("Stock Status");

        let error = fx
            .service
            .validate_file_and_set_data(&mut template, None)
            .unwrap_err();
        assert_eq!(error.message_key(), MessageKey::FileMissing);

        let empty_pdf = TemplateUpload::new("report.pdf", Vec::new());
        let error = fx
            .service
            .validate_file_and_set_data(&mut template, Some(&empty_pdf))
            .unwrap_err();
        assert_eq!(error.message_key(), MessageKey::FileIncorrectType);

        let error = fx
            .service
            .validate_file_and_set_data(&mut template, Some(&upload("")))
            .unwrap_err();
        assert_eq!(error.message_key(), MessageKey::FileEmpty);

        let error = fx
            .service
            .validate_file_and_set_data(&mut template, Some(&upload("<jasperReport")))
            .unwrap_err();
        assert_eq!(error.message_key(), MessageKey::FileInvalid);
        assert_eq!(fx.compiler.compiles.load(Ordering::Relaxed), 1);
        assert!(!template.has_data());
    }

    #[tokio::test]
    async fn missing_display_name_rejects_file() {
        let fx = fixture(MemoryTemplateRepository::new());
        let source = with_parameter(
            r#"<parameter name="region"><property name="displayName" value="  "/></parameter>"#,
        );

        let error = fx
            .service
            .save_template(Some(&upload(&source)), "Single", None, &[])
            .await
            .unwrap_err();

        assert!(matches!(
            reporting_error(error),
            ReportingError::ParameterMissing { property: "displayName", .. }
        ));
        assert!(fx.store.is_empty().await);
    }

    #[tokio::test]
    async fn unsupported_data_type_rejects_file() {
        let fx = fixture(MemoryTemplateRepository::new());
        let source = with_parameter(
            r#"<parameter name="shape" class="java.awt.Shape">
                 <property name="displayName" value="Shape"/>
               </parameter>"#,
        );
        let mut template = Template::new("Single");

        let error = fx
            .service
            .validate_file_and_set_data(&mut template, Some(&upload(&source)))
            .unwrap_err();

        assert!(matches!(
            error,
            ReportingError::ParameterIncorrectType { ref data_type, .. } if data_type == "java.awt.Shape"
        ));
    }

    #[tokio::test]
    async fn malformed_dependency_rejects_whole_file() {
        let fx = fixture(MemoryTemplateRepository::new());
        let source = with_parameter(
            r#"<parameter name="facility">
                 <property name="displayName" value="Facility"/>
                 <property name="dependencies" value="program:id:programId,zone:code"/>
               </parameter>"#,
        );

        let error = fx
            .service
            .save_template(Some(&upload(&source)), "Single", None, &[])
            .await
            .unwrap_err();

        assert_eq!(
            reporting_error(error).message_key(),
            MessageKey::MalformedDependency
        );
        assert_eq!(fx.store.writes(), 0);
    }

    #[tokio::test]
    async fn report_without_prompting_parameters_maps_nothing() {
        let fx = fixture(MemoryTemplateRepository::new());
        let saved = fx
            .service
            .save_template(Some(&upload(NO_PARAMETERS)), "Static", None, &[])
            .await
            .unwrap();

        assert!(saved.parameters.is_empty());

        let request = HashMap::from([("region".to_owned(), vec!["North".to_owned()])]);
        assert!(fx.service.map_request_parameters(&saved, &request).is_empty());
    }

    #[tokio::test]
    async fn stored_template_is_found_and_deleted_by_name() {
        let fx = fixture(MemoryTemplateRepository::new());
        fx.service
            .save_template(Some(&upload(NO_PARAMETERS)), "Static", None, &[])
            .await
            .unwrap();

        assert!(fx.service.find_template("Static").await.unwrap().is_some());
        assert_eq!(
            fx.service
                .list_templates(Pagination::default())
                .await
                .unwrap()
                .len(),
            1
        );
        assert!(fx.service.delete_template("Static").await.unwrap());
        assert!(fx.service.find_template("Static").await.unwrap().is_none());
    }
}
