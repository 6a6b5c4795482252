//! Resolution of right names against the rights service.
//!
//! A template may only require rights the rights service knows about.
//! [`RightLookup`] is the seam: [`ReferenceDataClient`] talks to the
//! reference-data service over HTTP and, with the `test-utils` feature,
//! [`MockRightLookup`] answers from a fixed set.

mod client;
mod config;
mod error;
#[cfg(any(test, feature = "test-utils"))]
mod mock;

use std::sync::Arc;

pub use client::ReferenceDataClient;
pub use config::{DEFAULT_TIMEOUT_SECS, ReferenceDataConfig};
pub use error::RightLookupError;
#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub use mock::MockRightLookup;
use reporting_core::model::Right;

/// Looks up rights by name.
#[async_trait::async_trait]
pub trait RightLookup: Send + Sync {
    /// Returns the right with the given name, or `None` if it is unknown.
    async fn find_right(&self, name: &str) -> Result<Option<Right>, RightLookupError>;
}

#[async_trait::async_trait]
impl<T: RightLookup + ?Sized> RightLookup for Arc<T> {
    async fn find_right(&self, name: &str) -> Result<Option<Right>, RightLookupError> {
        (**self).find_right(name).await
    }
}
