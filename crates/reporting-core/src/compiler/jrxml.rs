//! Compiler for JRXML report definitions.

use std::borrow::Cow;
use std::collections::BTreeMap;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::builtin::{builtin_parameters, is_builtin_parameter};
use super::report::DEFAULT_VALUE_CLASS;
use super::{CompileError, CompiledReport, ReportCompiler, ReportParameter};
use crate::TRACING_TARGET_COMPILER;

const ROOT: &str = "jasperReport";
const PARAMETER: &str = "parameter";
const PROPERTY: &str = "property";
const PARAMETER_DESCRIPTION: &str = "parameterDescription";
const DEFAULT_VALUE_EXPRESSION: &str = "defaultValueExpression";
const QUERY_STRING: &str = "queryString";

/// Compiles JRXML documents.
///
/// Only the parts of the document that describe the report contract are kept:
/// the report name, report-level properties, top-level parameters and the main
/// query. Layout bands and sub-datasets are checked for well-formedness and
/// otherwise ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct JrxmlCompiler;

impl JrxmlCompiler {
    /// Creates a new compiler.
    pub fn new() -> Self {
        Self
    }
}

impl ReportCompiler for JrxmlCompiler {
    fn compile(&self, source: &[u8]) -> Result<CompiledReport, CompileError> {
        let text = std::str::from_utf8(source)?;
        let mut reader = Reader::from_str(text);
        let mut builder = ReportBuilder::default();

        loop {
            let event = reader.read_event().map_err(|source| CompileError::Xml {
                position: reader.error_position() as u64,
                source,
            })?;

            match event {
                Event::Start(element) => {
                    let name = builder.open(&element)?;
                    builder.stack.push(name);
                }
                Event::Empty(element) => {
                    let name = builder.open(&element)?;
                    builder.close(&name)?;
                }
                Event::End(_) => {
                    if let Some(name) = builder.stack.pop() {
                        builder.close(&name)?;
                    }
                }
                Event::Text(content) => {
                    let raw = std::str::from_utf8(&content)?;
                    let unescaped = quick_xml::escape::unescape(raw)?;
                    builder.text.push_str(&unescaped);
                }
                Event::CData(content) => {
                    builder.text.push_str(std::str::from_utf8(&content)?);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        let report = builder.finish()?;
        tracing::debug!(
            target: TRACING_TARGET_COMPILER,
            report = %report.name,
            parameters = report.parameters.len(),
            properties = report.properties.len(),
            "report definition compiled"
        );

        Ok(report)
    }
}

#[derive(Debug, Default)]
struct ReportBuilder {
    stack: Vec<String>,
    report: Option<CompiledReport>,
    parameter: Option<ReportParameter>,
    declared: Vec<ReportParameter>,
    text: String,
}

impl ReportBuilder {
    /// Handles an opening tag and returns its local name.
    fn open(&mut self, element: &BytesStart<'_>) -> Result<String, CompileError> {
        let name = std::str::from_utf8(element.local_name().as_ref())?.to_owned();
        let mut attributes = read_attributes(element)?;
        self.text.clear();

        let Some(parent) = self.stack.last() else {
            if name != ROOT || self.report.is_some() {
                return Err(CompileError::UnexpectedRoot(name));
            }
            let report_name = required_attribute(&mut attributes, ROOT, "name")?;
            self.report = Some(CompiledReport {
                name: report_name,
                properties: BTreeMap::new(),
                parameters: Vec::new(),
                query: None,
            });
            return Ok(name);
        };

        match (parent.as_str(), name.as_str()) {
            (ROOT, PROPERTY) => {
                let key = required_attribute(&mut attributes, PROPERTY, "name")?;
                let value = attributes.remove("value").unwrap_or_default();
                if let Some(report) = self.report.as_mut() {
                    report.properties.insert(key, value);
                }
            }
            (ROOT, PARAMETER) => {
                self.parameter = Some(read_parameter(&mut attributes)?);
            }
            (PARAMETER, PROPERTY) => {
                let key = required_attribute(&mut attributes, PROPERTY, "name")?;
                let value = attributes.remove("value").unwrap_or_default();
                if let Some(parameter) = self.parameter.as_mut() {
                    parameter.properties.insert(key, value);
                }
            }
            _ => {}
        }

        Ok(name)
    }

    /// Handles the end of an element whose tag has been popped.
    fn close(&mut self, name: &str) -> Result<(), CompileError> {
        let parent = self.stack.last().map(String::as_str).unwrap_or_default();

        match (parent, name) {
            (ROOT, PARAMETER) => {
                if let Some(parameter) = self.parameter.take() {
                    let duplicate = is_builtin_parameter(&parameter.name)
                        || self.declared.iter().any(|p| p.name == parameter.name);
                    if duplicate {
                        return Err(CompileError::DuplicateParameter(parameter.name));
                    }
                    self.declared.push(parameter);
                }
            }
            (PARAMETER, PARAMETER_DESCRIPTION) => {
                let text = take_text(&mut self.text);
                if let Some(parameter) = self.parameter.as_mut() {
                    parameter.description = text;
                }
            }
            (PARAMETER, DEFAULT_VALUE_EXPRESSION) => {
                let text = take_text(&mut self.text);
                if let Some(parameter) = self.parameter.as_mut() {
                    parameter.default_value_expression = text;
                }
            }
            (ROOT, QUERY_STRING) => {
                let text = take_text(&mut self.text);
                if let Some(report) = self.report.as_mut() {
                    report.query = text;
                }
            }
            _ => {}
        }

        Ok(())
    }

    fn finish(mut self) -> Result<CompiledReport, CompileError> {
        if let Some(open) = self.stack.pop() {
            return Err(CompileError::Unclosed(open));
        }

        let mut report = self.report.ok_or(CompileError::MissingRoot)?;
        report.parameters = builtin_parameters();
        report.parameters.append(&mut self.declared);
        Ok(report)
    }
}

fn read_parameter(
    attributes: &mut BTreeMap<String, String>,
) -> Result<ReportParameter, CompileError> {
    let name = required_attribute(attributes, PARAMETER, "name")?;
    let mut parameter = ReportParameter::new(name);

    parameter.value_class_name = attributes
        .remove("class")
        .filter(|class| !class.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_VALUE_CLASS.to_owned());

    if let Some(value) = attributes.remove("isForPrompting") {
        parameter.for_prompting = match value.trim() {
            v if v.eq_ignore_ascii_case("true") => true,
            v if v.eq_ignore_ascii_case("false") => false,
            _ => {
                return Err(CompileError::InvalidAttribute {
                    attribute: "isForPrompting",
                    value,
                });
            }
        };
    }

    Ok(parameter)
}

fn read_attributes(element: &BytesStart<'_>) -> Result<BTreeMap<String, String>, CompileError> {
    let mut attributes = BTreeMap::new();
    for attribute in element.attributes() {
        let attribute = attribute?;
        let key = std::str::from_utf8(attribute.key.local_name().as_ref())?.to_owned();
        let raw = std::str::from_utf8(&attribute.value)?;
        let value: Cow<'_, str> = quick_xml::escape::unescape(raw)?;
        attributes.insert(key, value.into_owned());
    }
    Ok(attributes)
}

fn required_attribute(
    attributes: &mut BTreeMap<String, String>,
    element: &'static str,
    attribute: &'static str,
) -> Result<String, CompileError> {
    attributes
        .remove(attribute)
        .filter(|value| !value.trim().is_empty())
        .ok_or(CompileError::MissingAttribute { element, attribute })
}

fn take_text(buffer: &mut String) -> Option<String> {
    let text = std::mem::take(buffer);
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    const STOCK_REPORT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<jasperReport xmlns="http://jasperreports.sourceforge.net/jasperreports" name="Stock Status" pageWidth="595">
    <property name="reportType" value="Stockout"/>
    <parameter name="facility" class="java.util.UUID">
        <property name="displayName" value="Facility"/>
        <property name="required" value="true"/>
        <parameterDescription><![CDATA[Home facility]]></parameterDescription>
    </parameter>
    <parameter name="region">
        <property name="displayName" value="Region &amp; zone"/>
        <defaultValueExpression><![CDATA["North"]]></defaultValueExpression>
    </parameter>
    <parameter name="internal" isForPrompting="false"/>
    <subDataset name="lookup">
        <parameter name="facility"/>
        <queryString><![CDATA[SELECT 2]]></queryString>
    </subDataset>
    <queryString>
        <![CDATA[SELECT * FROM stock WHERE facility = $P{facility}]]>
    </queryString>
    <title><band height="20"/></title>
</jasperReport>"#;

    fn compile(source: &str) -> Result<CompiledReport, CompileError> {
        JrxmlCompiler::new().compile(source.as_bytes())
    }

    #[test]
    fn compiles_report_contract() {
        let report = compile(STOCK_REPORT).unwrap();

        assert_eq!(report.name, "Stock Status");
        assert_eq!(report.report_type(), Some("Stockout"));
        assert_eq!(
            report.query.as_deref(),
            Some("SELECT * FROM stock WHERE facility = $P{facility}")
        );

        let facility = report.parameter("facility").unwrap();
        assert_eq!(facility.value_class_name, "java.util.UUID");
        assert_eq!(facility.property("displayName"), Some("Facility"));
        assert_eq!(facility.description.as_deref(), Some("Home facility"));
        assert!(facility.is_user_promptable());

        let region = report.parameter("region").unwrap();
        assert_eq!(region.value_class_name, "java.lang.String");
        assert_eq!(region.property("displayName"), Some("Region & zone"));
        assert_eq!(region.default_value_expression.as_deref(), Some("\"North\""));

        assert!(!report.parameter("internal").unwrap().for_prompting);
    }

    #[test]
    fn builtin_parameters_come_first() {
        let report = compile(STOCK_REPORT).unwrap();
        let builtins = report.parameters.iter().take_while(|p| p.system_defined).count();

        assert_eq!(builtins, BUILTIN_PARAMETER_COUNT);
        assert!(report.parameter("REPORT_LOCALE").unwrap().system_defined);
        let declared: Vec<_> = report.parameters[builtins..]
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(declared, vec!["facility", "region", "internal"]);
    }

    const BUILTIN_PARAMETER_COUNT: usize = super::super::BUILTIN_PARAMETERS.len();

    #[test]
    fn rejects_unnamed_parameter() {
        let err = compile("<jasperReport name=\"x\"><parameter></jasperReport>").unwrap_err();
        assert!(matches!(
            err,
            CompileError::MissingAttribute { element: "parameter", attribute: "name" }
        ));
    }

    #[test]
    fn rejects_mismatched_end_tag() {
        let err =
            compile("<jasperReport name=\"x\"><parameter name=\"a\"></jasperReport>").unwrap_err();
        assert!(matches!(err, CompileError::Xml { .. }));
    }

    #[test]
    fn rejects_unclosed_element() {
        let err = compile("<jasperReport name=\"x\"><parameter name=\"a\">").unwrap_err();
        assert!(matches!(err, CompileError::Unclosed(open) if open == "parameter"));
    }

    #[test]
    fn rejects_foreign_documents() {
        let err = compile("<html><body/></html>").unwrap_err();
        assert!(matches!(err, CompileError::UnexpectedRoot(root) if root == "html"));

        assert!(matches!(compile("").unwrap_err(), CompileError::MissingRoot));
        assert!(matches!(
            compile("not xml at all").unwrap_err(),
            CompileError::MissingRoot | CompileError::Xml { .. }
        ));
    }

    #[test]
    fn rejects_unnamed_report() {
        let err = compile("<jasperReport/>").unwrap_err();
        assert!(matches!(
            err,
            CompileError::MissingAttribute { element: "jasperReport", attribute: "name" }
        ));
    }

    #[test]
    fn rejects_duplicate_parameters() {
        let source = r#"<jasperReport name="r">
            <parameter name="a"/>
            <parameter name="a"/>
        </jasperReport>"#;
        assert!(matches!(
            compile(source).unwrap_err(),
            CompileError::DuplicateParameter(name) if name == "a"
        ));

        let shadowing = r#"<jasperReport name="r"><parameter name="REPORT_LOCALE"/></jasperReport>"#;
        assert!(matches!(
            compile(shadowing).unwrap_err(),
            CompileError::DuplicateParameter(_)
        ));
    }

    #[test]
    fn rejects_invalid_prompting_flag() {
        let source = r#"<jasperReport name="r"><parameter name="a" isForPrompting="maybe"/></jasperReport>"#;
        assert!(matches!(
            compile(source).unwrap_err(),
            CompileError::InvalidAttribute { attribute: "isForPrompting", .. }
        ));
    }

    #[test]
    fn rejects_non_utf8_input() {
        let err = JrxmlCompiler::new().compile(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, CompileError::Encoding(_)));
    }
}
