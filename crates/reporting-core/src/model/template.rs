//! Report template entity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::TemplateParameter;

/// Category assigned to templates whose definition does not declare one.
pub const DEFAULT_TEMPLATE_TYPE: &str = "Consistency Report";

/// A named, persisted report definition with its declared input parameters
/// and the rights required to manage it.
///
/// The parameter list is owned by the template: it is rebuilt from the report
/// definition on every upload and replaced as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Unique template identifier.
    pub id: Uuid,
    /// Globally unique template name.
    pub name: String,
    /// Category label, overridden by the `reportType` report property.
    #[serde(rename = "type")]
    pub template_type: String,
    /// Optional human-readable description.
    pub description: Option<String>,
    /// Right names required to access the template, without duplicates.
    pub required_rights: Vec<String>,
    /// Serialized compiled report.
    #[serde(default, skip_serializing)]
    pub data: Vec<u8>,
    /// User-facing parameters in declaration order.
    #[serde(default, rename = "templateParameters")]
    pub parameters: Vec<TemplateParameter>,
}

impl Template {
    /// Creates a new template with a fresh identifier and the default type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            template_type: DEFAULT_TEMPLATE_TYPE.to_owned(),
            description: None,
            required_rights: Vec::new(),
            data: Vec::new(),
            parameters: Vec::new(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Sets the template category.
    pub fn with_type(mut self, template_type: impl Into<String>) -> Self {
        self.template_type = template_type.into();
        self
    }

    /// Sets the required rights.
    pub fn with_required_rights<I, S>(mut self, rights: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.replace_required_rights(rights);
        self
    }

    /// Replaces the required rights in place, dropping duplicates while
    /// keeping the first occurrence of each name.
    pub fn replace_required_rights<I, S>(&mut self, rights: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_rights.clear();
        for right in rights {
            let right = right.into();
            if !self.required_rights.contains(&right) {
                self.required_rights.push(right);
            }
        }
    }

    /// Returns whether the template requires the given right.
    pub fn requires_right(&self, right: &str) -> bool {
        self.required_rights.iter().any(|r| r == right)
    }

    /// Returns whether the template declares any parameter.
    #[inline]
    pub fn has_parameters(&self) -> bool {
        !self.parameters.is_empty()
    }

    /// Returns the declared parameter names in declaration order.
    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(|p| p.name.as_str())
    }

    /// Finds a declared parameter by exact name.
    pub fn parameter(&self, name: &str) -> Option<&TemplateParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Returns whether a compiled report payload has been attached.
    #[inline]
    pub fn has_data(&self) -> bool {
        !self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_template_uses_default_type() {
        let template = Template::new("Stock Summary");
        assert_eq!(template.template_type, DEFAULT_TEMPLATE_TYPE);
        assert!(!template.has_parameters());
        assert!(!template.has_data());
    }

    #[test]
    fn new_templates_get_distinct_ids() {
        assert_ne!(Template::new("a").id, Template::new("a").id);
    }

    #[test]
    fn required_rights_are_deduplicated_in_order() {
        let template = Template::new("t").with_required_rights(["B", "A", "B"]);
        assert_eq!(template.required_rights, vec!["B", "A"]);
        assert!(template.requires_right("A"));
        assert!(!template.requires_right("C"));
    }

    #[test]
    fn serialization_skips_payload() {
        let mut template = Template::new("t");
        template.data = vec![1, 2, 3];

        let json = serde_json::to_value(&template).unwrap();
        assert!(json.get("data").is_none());
        assert_eq!(json["type"], DEFAULT_TEMPLATE_TYPE);
        assert!(json["templateParameters"].as_array().unwrap().is_empty());
    }
}
