//! Templates table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Template table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum TemplateConstraints {
    #[strum(serialize = "templates_name_unique")]
    NameUnique,
    #[strum(serialize = "templates_name_not_blank")]
    NameNotBlank,
    #[strum(serialize = "templates_type_not_blank")]
    TypeNotBlank,

    #[strum(serialize = "templates_updated_after_created")]
    UpdatedAfterCreated,
}

impl TemplateConstraints {
    /// Creates a new [`TemplateConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            TemplateConstraints::NameUnique => ConstraintCategory::Uniqueness,
            TemplateConstraints::NameNotBlank | TemplateConstraints::TypeNotBlank => {
                ConstraintCategory::Validation
            }
            TemplateConstraints::UpdatedAfterCreated => ConstraintCategory::Chronological,
        }
    }
}

impl From<TemplateConstraints> for String {
    #[inline]
    fn from(val: TemplateConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for TemplateConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
