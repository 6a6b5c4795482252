//! Template parameter and inter-parameter dependency.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::property::DependencyFormatError;
use crate::value_type::ParameterValueType;

/// A single named input a report declares, with display and validation
/// metadata surfaced to report requesters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateParameter {
    /// Parameter name as declared in the report definition.
    pub name: String,
    /// Label shown to users; never blank.
    pub display_name: String,
    /// Optional description from the report definition.
    pub description: Option<String>,
    /// Declared value class name.
    pub data_type: Option<String>,
    /// Where selectable values are sourced from.
    pub select_expression: Option<String>,
    /// Property of a selectable value submitted as the parameter value.
    pub select_property: Option<String>,
    /// Property of a selectable value shown to users.
    pub display_property: Option<String>,
    /// Whether a value must be supplied.
    pub required: bool,
    /// Literal default value with quote characters removed.
    pub default_value: Option<String>,
    /// Fixed selectable options.
    pub options: Vec<String>,
    /// Parameters this one depends on.
    pub dependencies: Vec<ParameterDependency>,
}

impl TemplateParameter {
    /// Resolves the declared data type against the value-type registry.
    pub fn value_type(&self) -> Option<ParameterValueType> {
        self.data_type
            .as_deref()
            .and_then(ParameterValueType::resolve)
    }

    /// Returns whether the parameter offers a fixed list of options.
    #[inline]
    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }

    /// Returns whether the parameter depends on another parameter.
    #[inline]
    pub fn has_dependencies(&self) -> bool {
        !self.dependencies.is_empty()
    }
}

/// A declared relationship between two parameters, used to drive cascading
/// selects.
///
/// Written in the report definition as `dependency:property:placeholder`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDependency {
    /// Name of the parameter depended on.
    pub dependency: String,
    /// Property of the depended-on value that is forwarded.
    pub property: String,
    /// Placeholder in the select expression that receives the value.
    pub placeholder: String,
}

impl ParameterDependency {
    /// Creates a new dependency triple.
    pub fn new(
        dependency: impl Into<String>,
        property: impl Into<String>,
        placeholder: impl Into<String>,
    ) -> Self {
        Self {
            dependency: dependency.into(),
            property: property.into(),
            placeholder: placeholder.into(),
        }
    }
}

impl FromStr for ParameterDependency {
    type Err = DependencyFormatError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = value.split(':').collect();
        match segments.as_slice() {
            [dependency, property, placeholder] => {
                Ok(Self::new(*dependency, *property, *placeholder))
            }
            _ => Err(DependencyFormatError {
                value: value.to_owned(),
                segments: segments.len(),
            }),
        }
    }
}

impl fmt::Display for ParameterDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.dependency, self.property, self.placeholder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_three_segments() {
        let dependency: ParameterDependency = "program:id:programId".parse().unwrap();
        assert_eq!(
            dependency,
            ParameterDependency::new("program", "id", "programId")
        );
        assert_eq!(dependency.to_string(), "program:id:programId");
    }

    #[test]
    fn keeps_empty_inner_segment() {
        let dependency: ParameterDependency = "a::c".parse().unwrap();
        assert_eq!(dependency.property, "");
    }

    #[test]
    fn rejects_wrong_segment_counts() {
        let error = "a:b".parse::<ParameterDependency>().unwrap_err();
        assert_eq!(error.segments, 2);

        let error = "a:b:c:d".parse::<ParameterDependency>().unwrap_err();
        assert_eq!(error.segments, 4);
        assert_eq!(error.value, "a:b:c:d");
    }

    #[test]
    fn value_type_resolves_known_classes() {
        let parameter = TemplateParameter {
            data_type: Some("java.lang.Integer".into()),
            ..Default::default()
        };
        assert_eq!(parameter.value_type(), Some(ParameterValueType::Integer));

        let parameter = TemplateParameter::default();
        assert_eq!(parameter.value_type(), None);
    }
}
