//! Database constraint violations organized by table.

mod template_parameters;
mod templates;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use self::template_parameters::TemplateParameterConstraints;
pub use self::templates::TemplateConstraints;

/// Unified constraint violation enum that can represent any known constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ConstraintViolation {
    Template(TemplateConstraints),
    TemplateParameter(TemplateParameterConstraints),
}

/// Categories of database constraint violations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintCategory {
    /// Data validation constraints (format, length, range checks).
    Validation,
    /// Chronological integrity constraints (timestamp relationships).
    Chronological,
    /// Uniqueness constraints (primary keys, unique indexes).
    Uniqueness,
}

impl ConstraintViolation {
    /// Creates a new [`ConstraintViolation`] from the constraint name.
    ///
    /// ```
    /// use reporting_postgres::types::{ConstraintViolation, TemplateConstraints};
    ///
    /// let violation = ConstraintViolation::new("templates_name_unique");
    /// assert_eq!(violation, Some(ConstraintViolation::Template(TemplateConstraints::NameUnique)));
    /// assert!(ConstraintViolation::new("unknown_constraint").is_none());
    /// ```
    pub fn new(constraint: &str) -> Option<Self> {
        match constraint.split('_').next()? {
            "templates" => TemplateConstraints::new(constraint).map(Self::Template),
            "template" => {
                TemplateParameterConstraints::new(constraint).map(Self::TemplateParameter)
            }
            _ => None,
        }
    }

    /// Returns the table name associated with this constraint.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConstraintViolation::Template(_) => "templates",
            ConstraintViolation::TemplateParameter(_) => "template_parameters",
        }
    }

    /// Returns the category of this constraint violation.
    pub fn constraint_category(&self) -> ConstraintCategory {
        match self {
            ConstraintViolation::Template(c) => c.categorize(),
            ConstraintViolation::TemplateParameter(c) => c.categorize(),
        }
    }

    /// Returns whether a template with the same name already exists.
    #[inline]
    pub fn is_duplicate_template_name(&self) -> bool {
        matches!(
            self,
            ConstraintViolation::Template(TemplateConstraints::NameUnique)
        )
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintViolation::Template(c) => write!(f, "{}", c),
            ConstraintViolation::TemplateParameter(c) => write!(f, "{}", c),
        }
    }
}

impl From<ConstraintViolation> for String {
    #[inline]
    fn from(val: ConstraintViolation) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for ConstraintViolation {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value).ok_or_else(|| format!("Unknown constraint: {}", value))
    }
}
