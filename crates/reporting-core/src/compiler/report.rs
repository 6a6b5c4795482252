//! Compiled report representation and its storage boundary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::REPORT_TYPE_PROPERTY;

/// Default value class of a parameter that does not declare one.
pub(super) const DEFAULT_VALUE_CLASS: &str = "java.lang.String";

/// Executable form of a report definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledReport {
    /// Report name from the definition root.
    pub name: String,
    /// Report-level string properties.
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    /// Parameter table: built-in parameters first, then declared ones in
    /// document order.
    #[serde(default)]
    pub parameters: Vec<ReportParameter>,
    /// Main dataset query, if any.
    #[serde(default)]
    pub query: Option<String>,
}

impl CompiledReport {
    /// Returns a report-level property.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Returns the category declared by the `reportType` property.
    pub fn report_type(&self) -> Option<&str> {
        self.property(REPORT_TYPE_PROPERTY)
    }

    /// Finds a parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&ReportParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Returns the parameters a user is prompted for.
    pub fn prompting_parameters(&self) -> impl Iterator<Item = &ReportParameter> {
        self.parameters.iter().filter(|p| p.is_user_promptable())
    }

    /// Serializes the report into the opaque payload stored with a template.
    pub fn to_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    /// Restores a report from a stored payload.
    pub fn from_bytes(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}

/// One entry of a compiled report's parameter table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportParameter {
    /// Parameter name.
    pub name: String,
    /// Whether the engine supplies the parameter itself.
    pub system_defined: bool,
    /// Whether users are prompted for a value.
    pub for_prompting: bool,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Declared value class name.
    pub value_class_name: String,
    /// Raw default value expression text.
    #[serde(default)]
    pub default_value_expression: Option<String>,
    /// Custom string properties.
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl ReportParameter {
    /// Creates a user-declared parameter of type `java.lang.String`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            system_defined: false,
            for_prompting: true,
            description: None,
            value_class_name: DEFAULT_VALUE_CLASS.to_owned(),
            default_value_expression: None,
            properties: BTreeMap::new(),
        }
    }

    /// Creates a built-in parameter.
    pub(super) fn system(name: &str, class_name: &str) -> Self {
        Self {
            system_defined: true,
            for_prompting: false,
            value_class_name: class_name.to_owned(),
            ..Self::new(name)
        }
    }

    /// Returns a custom property.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Adds a custom property.
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Returns whether the parameter is declared by the report and prompted.
    #[inline]
    pub fn is_user_promptable(&self) -> bool {
        !self.system_defined && self.for_prompting
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> CompiledReport {
        CompiledReport {
            name: "stock".into(),
            properties: BTreeMap::from([("reportType".to_owned(), "Stockout".to_owned())]),
            parameters: vec![
                ReportParameter::system("REPORT_LOCALE", "java.util.Locale"),
                ReportParameter::new("facility").with_property("displayName", "Facility"),
            ],
            query: Some("SELECT 1".into()),
        }
    }

    #[test]
    fn payload_round_trips() {
        let report = report();
        let bytes = report.to_bytes().unwrap();
        assert_eq!(CompiledReport::from_bytes(&bytes).unwrap(), report);
    }

    #[test]
    fn rejects_foreign_payload() {
        assert!(CompiledReport::from_bytes(b"\xac\xed\x00\x05").is_err());
    }

    #[test]
    fn prompting_parameters_skip_builtins() {
        let report = report();
        let names: Vec<_> = report.prompting_parameters().map(|p| &p.name).collect();
        assert_eq!(names, vec!["facility"]);
        assert_eq!(report.report_type(), Some("Stockout"));
    }
}
