//! Template parameter row model.

use diesel::prelude::*;
use reporting_core::model as domain;
use uuid::Uuid;

use super::Template;
use crate::schema::template_parameters;
use crate::{PgError, PgResult};

/// A stored template parameter.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = template_parameters)]
#[diesel(belongs_to(Template))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TemplateParameter {
    /// Unique row identifier.
    pub id: Uuid,
    /// Owning template.
    pub template_id: Uuid,
    /// Zero-based declaration order.
    pub position: i32,
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub data_type: Option<String>,
    pub select_expression: Option<String>,
    pub select_property: Option<String>,
    pub display_property: Option<String>,
    pub required: bool,
    pub default_value: Option<String>,
    pub options: Vec<Option<String>>,
    /// Dependency triples as a JSON array.
    pub dependencies: serde_json::Value,
}

/// Data for inserting a template parameter.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = template_parameters)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewTemplateParameter {
    pub id: Uuid,
    pub template_id: Uuid,
    pub position: i32,
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub data_type: Option<String>,
    pub select_expression: Option<String>,
    pub select_property: Option<String>,
    pub display_property: Option<String>,
    pub required: bool,
    pub default_value: Option<String>,
    pub options: Vec<Option<String>>,
    pub dependencies: serde_json::Value,
}

impl TemplateParameter {
    /// Converts the row into the domain parameter.
    pub fn into_domain(self) -> PgResult<domain::TemplateParameter> {
        let dependencies = serde_json::from_value(self.dependencies).map_err(|err| {
            PgError::Decode {
                column: "template_parameters.dependencies",
                reason: err.to_string(),
            }
        })?;

        Ok(domain::TemplateParameter {
            name: self.name,
            display_name: self.display_name,
            description: self.description,
            data_type: self.data_type,
            select_expression: self.select_expression,
            select_property: self.select_property,
            display_property: self.display_property,
            required: self.required,
            default_value: self.default_value,
            options: self.options.into_iter().flatten().collect(),
            dependencies,
        })
    }
}

impl NewTemplateParameter {
    /// Builds the row for the parameter at `position` of a template.
    pub fn from_domain(
        template_id: Uuid,
        position: usize,
        parameter: &domain::TemplateParameter,
    ) -> PgResult<Self> {
        let position = i32::try_from(position)
            .map_err(|_| PgError::Unexpected("too many template parameters".into()))?;
        let dependencies = serde_json::to_value(&parameter.dependencies).map_err(|err| {
            PgError::Decode {
                column: "template_parameters.dependencies",
                reason: err.to_string(),
            }
        })?;

        Ok(Self {
            id: Uuid::now_v7(),
            template_id,
            position,
            name: parameter.name.clone(),
            display_name: parameter.display_name.clone(),
            description: parameter.description.clone(),
            data_type: parameter.data_type.clone(),
            select_expression: parameter.select_expression.clone(),
            select_property: parameter.select_property.clone(),
            display_property: parameter.display_property.clone(),
            required: parameter.required,
            default_value: parameter.default_value.clone(),
            options: parameter.options.iter().cloned().map(Some).collect(),
            dependencies,
        })
    }
}
