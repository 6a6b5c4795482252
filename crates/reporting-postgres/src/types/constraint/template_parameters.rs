//! Template parameters table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Template parameter table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum TemplateParameterConstraints {
    #[strum(serialize = "template_parameters_name_unique")]
    NameUnique,
    #[strum(serialize = "template_parameters_position_unique")]
    PositionUnique,

    #[strum(serialize = "template_parameters_position_min")]
    PositionMin,
    #[strum(serialize = "template_parameters_display_name_not_blank")]
    DisplayNameNotBlank,
    #[strum(serialize = "template_parameters_dependencies_array")]
    DependenciesArray,
}

impl TemplateParameterConstraints {
    /// Creates a new [`TemplateParameterConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            TemplateParameterConstraints::NameUnique
            | TemplateParameterConstraints::PositionUnique => ConstraintCategory::Uniqueness,

            TemplateParameterConstraints::PositionMin
            | TemplateParameterConstraints::DisplayNameNotBlank
            | TemplateParameterConstraints::DependenciesArray => ConstraintCategory::Validation,
        }
    }
}

impl From<TemplateParameterConstraints> for String {
    #[inline]
    fn from(val: TemplateParameterConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for TemplateParameterConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
