//! Authorization right as published by the reference-data service.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authorization capability name a template may require.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Right {
    /// Right identifier.
    pub id: Uuid,
    /// Unique right name, e.g. `REPORTS_VIEW`.
    pub name: String,
    /// Right category, e.g. `GENERAL_ADMIN` or `SUPERVISION`.
    #[serde(default, rename = "type")]
    pub right_type: Option<String>,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

impl Right {
    /// Creates a right with the given name and a fresh identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            right_type: None,
            description: None,
        }
    }
}
