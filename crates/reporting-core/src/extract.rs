//! Turns compiled report parameters into template parameters.

use crate::compiler::{CompiledReport, ReportParameter};
use crate::error::ReportingError;
use crate::model::{ParameterDependency, TemplateParameter};
use crate::property::{parse_boolean_property, split_list_property, strip_quotes};
use crate::value_type::ParameterValueType;
use crate::TRACING_TARGET_EXTRACT;

const DISPLAY_NAME: &str = "displayName";
const SELECT_EXPRESSION: &str = "selectExpression";
const SELECT_PROPERTY: &str = "selectProperty";
const DISPLAY_PROPERTY: &str = "displayProperty";
const REQUIRED: &str = "required";
const OPTIONS: &str = "options";
const DEPENDENCIES: &str = "dependencies";

/// Builds template parameters for every prompting, report-declared parameter
/// in document order.
///
/// The first invalid parameter rejects the whole report.
pub fn extract_parameters(report: &CompiledReport) -> Result<Vec<TemplateParameter>, ReportingError> {
    let parameters = report
        .prompting_parameters()
        .map(build_parameter)
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        target: TRACING_TARGET_EXTRACT,
        report = %report.name,
        extracted = parameters.len(),
        "template parameters extracted"
    );

    Ok(parameters)
}

/// Builds a single template parameter from its compiled declaration.
pub fn build_parameter(parameter: &ReportParameter) -> Result<TemplateParameter, ReportingError> {
    let display_name = parameter
        .property(DISPLAY_NAME)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ReportingError::ParameterMissing {
            parameter: parameter.name.clone(),
            property: DISPLAY_NAME,
        })?;

    let data_type = Some(parameter.value_class_name.as_str()).filter(|c| !c.trim().is_empty());
    if let Some(data_type) = data_type
        && ParameterValueType::resolve(data_type).is_none()
    {
        return Err(ReportingError::ParameterIncorrectType {
            parameter: parameter.name.clone(),
            data_type: data_type.to_owned(),
        });
    }

    let owned = |key: &str| parameter.property(key).map(str::to_owned);

    Ok(TemplateParameter {
        name: parameter.name.clone(),
        display_name: display_name.to_owned(),
        description: parameter.description.clone(),
        data_type: data_type.map(str::to_owned),
        select_expression: owned(SELECT_EXPRESSION),
        select_property: owned(SELECT_PROPERTY),
        display_property: owned(DISPLAY_PROPERTY),
        required: parameter
            .property(REQUIRED)
            .is_some_and(parse_boolean_property),
        default_value: parameter
            .default_value_expression
            .as_deref()
            .map(strip_quotes),
        options: list_property(parameter, OPTIONS),
        dependencies: dependencies(parameter)?,
    })
}

fn list_property(parameter: &ReportParameter, key: &str) -> Vec<String> {
    parameter
        .property(key)
        .map(split_list_property)
        .unwrap_or_default()
}

fn dependencies(parameter: &ReportParameter) -> Result<Vec<ParameterDependency>, ReportingError> {
    list_property(parameter, DEPENDENCIES)
        .iter()
        .map(|entry| {
            entry
                .parse::<ParameterDependency>()
                .map_err(|err| ReportingError::MalformedDependency {
                    parameter: parameter.name.clone(),
                    value: err.value,
                    segments: err.segments,
                })
        })
        .collect()
}
