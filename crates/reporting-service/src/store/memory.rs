//! In-memory template store for tests.
//!
//! Only available with the `test-utils` feature. Mirrors the database
//! constraints the service relies on: names are unique and a write that
//! collides with another template's name fails with
//! [`ReportingError::TemplateExists`].

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use reporting_core::ReportingError;
use reporting_core::model::Template;
use reporting_postgres::query::Pagination;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::TemplateStore;
use crate::Result;

/// Template store backed by a map keyed by id.
#[derive(Debug, Clone, Default)]
pub struct MemoryTemplateRepository {
    templates: Arc<RwLock<BTreeMap<Uuid, Template>>>,
    writes: Arc<AtomicUsize>,
}

impl MemoryTemplateRepository {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given templates.
    pub fn with_templates(templates: impl IntoIterator<Item = Template>) -> Self {
        let templates = templates.into_iter().map(|t| (t.id, t)).collect();
        Self {
            templates: Arc::new(RwLock::new(templates)),
            writes: Arc::default(),
        }
    }

    /// Returns the number of stored templates.
    pub async fn len(&self) -> usize {
        self.templates.read().await.len()
    }

    /// Returns whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.templates.read().await.is_empty()
    }

    /// Returns a stored template by id.
    pub async fn get(&self, id: Uuid) -> Option<Template> {
        self.templates.read().await.get(&id).cloned()
    }

    /// Returns how many write operations have been attempted.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }
}

fn name_taken_by_other(
    templates: &BTreeMap<Uuid, Template>,
    template: &Template,
) -> Result<(), ReportingError> {
    let taken = templates
        .values()
        .any(|stored| stored.name == template.name && stored.id != template.id);

    if taken {
        return Err(ReportingError::TemplateExists(template.name.clone()));
    }
    Ok(())
}

#[async_trait::async_trait]
impl TemplateStore for MemoryTemplateRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Template>> {
        let templates = self.templates.read().await;
        Ok(templates.values().find(|t| t.name == name).cloned())
    }

    async fn list(&self, pagination: Pagination) -> Result<Vec<Template>> {
        let templates = self.templates.read().await;
        let mut listed: Vec<Template> = templates.values().cloned().collect();
        listed.sort_by(|a, b| a.name.cmp(&b.name));

        let offset = usize::try_from(pagination.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(pagination.limit()).unwrap_or(0);

        Ok(listed.into_iter().skip(offset).take(limit).collect())
    }

    async fn create(&self, template: &Template) -> Result<Template> {
        self.record_write();
        let mut templates = self.templates.write().await;

        if templates.values().any(|t| t.name == template.name) {
            return Err(ReportingError::TemplateExists(template.name.clone()).into());
        }

        templates.insert(template.id, template.clone());
        Ok(template.clone())
    }

    async fn save(&self, template: &Template) -> Result<Template> {
        self.record_write();
        let mut templates = self.templates.write().await;

        name_taken_by_other(&templates, template)?;
        templates.insert(template.id, template.clone());
        Ok(template.clone())
    }

    async fn replace(&self, template: &Template) -> Result<Template> {
        self.record_write();
        let mut templates = self.templates.write().await;

        templates.retain(|_, stored| stored.name != template.name);
        templates.insert(template.id, template.clone());
        Ok(template.clone())
    }

    async fn delete_by_name(&self, name: &str) -> Result<bool> {
        self.record_write();
        let mut templates = self.templates.write().await;

        let before = templates.len();
        templates.retain(|_, stored| stored.name != name);
        Ok(templates.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[tokio::test]
    async fn create_rejects_taken_name() {
        let store = MemoryTemplateRepository::new();
        store.create(&Template::new("Stock")).await.unwrap();

        let error = store.create(&Template::new("Stock")).await.unwrap_err();
        assert!(matches!(
            error,
            Error::Reporting(ReportingError::TemplateExists(_))
        ));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn save_overwrites_by_id() {
        let template = Template::new("Stock");
        let store = MemoryTemplateRepository::with_templates([template.clone()]);

        let updated = template.with_description(Some("Monthly".into()));
        store.save(&updated).await.unwrap();

        let stored = store.get(updated.id).await.unwrap();
        assert_eq!(stored.description.as_deref(), Some("Monthly"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn replace_drops_same_named_template() {
        let old = Template::new("Stock");
        let store = MemoryTemplateRepository::with_templates([old.clone()]);

        let new = Template::new("Stock");
        store.replace(&new).await.unwrap();

        assert!(store.get(old.id).await.is_none());
        assert!(store.get(new.id).await.is_some());
        assert_eq!(store.writes(), 1);
    }

    #[tokio::test]
    async fn list_is_ordered_and_paginated() {
        let store = MemoryTemplateRepository::with_templates(
            ["Orders", "Adjustments", "Stock"].map(Template::new),
        );

        let names: Vec<String> = store
            .list(Pagination::new(2, 0))
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["Adjustments", "Orders"]);

        let rest = store.list(Pagination::new(2, 2)).await.unwrap();
        assert_eq!(rest.len(), 1);

        let beyond = store.list(Pagination::from_page(i64::MAX, 50)).await.unwrap();
        assert!(beyond.is_empty());
        assert!(store.delete_by_name("Stock").await.unwrap());
        assert!(!store.delete_by_name("Stock").await.unwrap());
    }
}
