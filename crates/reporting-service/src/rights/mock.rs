//! Fixed-set right lookup for tests.
//!
//! Only available with the `test-utils` feature:
//!
//! ```toml
//! [dev-dependencies]
//! reporting-service = { version = "...", features = ["test-utils"] }
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use reporting_core::model::Right;

use super::{RightLookup, RightLookupError};

/// Answers right lookups from a fixed set of known rights and counts the
/// lookups it serves.
#[derive(Debug, Clone, Default)]
pub struct MockRightLookup {
    rights: Arc<HashMap<String, Right>>,
    lookups: Arc<AtomicUsize>,
}

impl MockRightLookup {
    /// Creates a lookup that knows the given right names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rights = names
            .into_iter()
            .map(|name| {
                let right = Right::new(name);
                (right.name.clone(), right)
            })
            .collect();

        Self {
            rights: Arc::new(rights),
            lookups: Arc::default(),
        }
    }

    /// Returns how many lookups have been served.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }
}

#[async_trait::async_trait]
impl RightLookup for MockRightLookup {
    async fn find_right(&self, name: &str) -> Result<Option<Right>, RightLookupError> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        Ok(self.rights.get(name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn answers_from_fixed_set() {
        let lookup = MockRightLookup::new(["REPORTS_VIEW"]);

        let right = lookup.find_right("REPORTS_VIEW").await.unwrap();
        assert_eq!(right.map(|r| r.name), Some("REPORTS_VIEW".to_owned()));
        assert!(lookup.find_right("reports_view").await.unwrap().is_none());
        assert_eq!(lookup.lookups(), 2);
    }
}
