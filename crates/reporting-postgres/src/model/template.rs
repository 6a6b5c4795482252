//! Template row model.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use reporting_core::model as domain;
use uuid::Uuid;

use crate::schema::templates;

/// A stored report template without its parameters.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = templates)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Template {
    /// Unique template identifier.
    pub id: Uuid,
    /// Globally unique template name.
    pub name: String,
    /// Category label.
    pub template_type: String,
    /// Optional description.
    pub description: Option<String>,
    /// Right names required to access the template.
    pub required_rights: Vec<Option<String>>,
    /// Serialized compiled report.
    pub data: Vec<u8>,
    /// Timestamp when the template was first stored.
    pub created_at: Timestamp,
    /// Timestamp of the last save.
    pub updated_at: Timestamp,
}

/// Data for inserting a template.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = templates)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewTemplate {
    /// Template identifier, assigned by the caller.
    pub id: Uuid,
    /// Template name.
    pub name: String,
    /// Category label.
    pub template_type: String,
    /// Description.
    pub description: Option<String>,
    /// Required rights.
    pub required_rights: Vec<Option<String>>,
    /// Compiled report payload.
    pub data: Vec<u8>,
}

/// Full overwrite of a stored template's mutable columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = templates)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct UpdateTemplate {
    /// Template name.
    pub name: String,
    /// Category label.
    pub template_type: String,
    /// Description, cleared when `None`.
    pub description: Option<String>,
    /// Required rights.
    pub required_rights: Vec<Option<String>>,
    /// Compiled report payload.
    pub data: Vec<u8>,
    /// Save timestamp.
    pub updated_at: Timestamp,
}

impl Template {
    /// Returns the required rights without null entries.
    pub fn required_rights(&self) -> Vec<String> {
        self.required_rights.iter().flatten().cloned().collect()
    }

    /// Returns the creation time.
    #[inline]
    pub fn created_at(&self) -> jiff::Timestamp {
        self.created_at.into()
    }

    /// Returns the last save time.
    #[inline]
    pub fn updated_at(&self) -> jiff::Timestamp {
        self.updated_at.into()
    }

    /// Assembles the domain aggregate from this row and its parameters.
    pub fn into_domain(self, parameters: Vec<domain::TemplateParameter>) -> domain::Template {
        let required_rights = self.required_rights();
        domain::Template {
            id: self.id,
            name: self.name,
            template_type: self.template_type,
            description: self.description,
            required_rights,
            data: self.data,
            parameters,
        }
    }
}

impl From<&domain::Template> for NewTemplate {
    fn from(template: &domain::Template) -> Self {
        Self {
            id: template.id,
            name: template.name.clone(),
            template_type: template.template_type.clone(),
            description: template.description.clone(),
            required_rights: template.required_rights.iter().cloned().map(Some).collect(),
            data: template.data.clone(),
        }
    }
}

impl From<&domain::Template> for UpdateTemplate {
    fn from(template: &domain::Template) -> Self {
        Self {
            name: template.name.clone(),
            template_type: template.template_type.clone(),
            description: template.description.clone(),
            required_rights: template.required_rights.iter().cloned().map(Some).collect(),
            data: template.data.clone(),
            updated_at: jiff::Timestamp::now().into(),
        }
    }
}
