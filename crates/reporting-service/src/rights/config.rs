//! Reference-data client configuration.

use std::fmt;
use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use url::Url;

/// Default timeout for right lookups: 30 seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the reference-data rights client.
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct ReferenceDataConfig {
    /// Base URL of the reference-data service
    #[cfg_attr(
        feature = "config",
        arg(
            long = "reference-data-url",
            env = "REFERENCE_DATA_URL",
            default_value = "http://localhost/"
        )
    )]
    pub base_url: Url,

    /// Bearer token sent with every lookup
    #[cfg_attr(
        feature = "config",
        arg(long = "reference-data-token", env = "REFERENCE_DATA_TOKEN")
    )]
    #[serde(default, skip_serializing)]
    pub token: Option<String>,

    /// Lookup timeout in seconds
    #[cfg_attr(
        feature = "config",
        arg(
            long = "reference-data-timeout",
            env = "REFERENCE_DATA_TIMEOUT",
            default_value = "30"
        )
    )]
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header to send with lookups
    #[cfg_attr(
        feature = "config",
        arg(long = "reference-data-user-agent", env = "REFERENCE_DATA_USER_AGENT")
    )]
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl ReferenceDataConfig {
    /// Creates a configuration for the service at `base_url`.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }

    /// Sets the bearer token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Returns the timeout, falling back to the default when zero.
    pub fn effective_timeout(&self) -> Duration {
        match self.timeout_secs {
            0 => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            secs => Duration::from_secs(secs),
        }
    }

    /// Returns the user agent, falling back to the crate name and version.
    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("reporting/{}", env!("CARGO_PKG_VERSION")))
    }
}

impl fmt::Debug for ReferenceDataConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReferenceDataConfig")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "****"))
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ReferenceDataConfig {
        ReferenceDataConfig::new(Url::parse("http://referencedata.local/").unwrap())
    }

    #[test]
    fn zero_timeout_uses_default() {
        let config = config().with_timeout(0);
        assert_eq!(
            config.effective_timeout(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
        assert_eq!(
            config.with_timeout(5).effective_timeout(),
            Duration::from_secs(5)
        );
    }

    #[test]
    fn debug_masks_token() {
        let config = config().with_token("s3cr3t");
        let debug = format!("{config:?}");
        assert!(!debug.contains("s3cr3t"));
        assert!(debug.contains("****"));
    }

    #[test]
    fn token_is_never_serialized() {
        let json = serde_json::to_value(config().with_token("s3cr3t")).unwrap();
        assert!(json.get("token").is_none());
    }

    #[test]
    fn default_user_agent_names_the_crate() {
        assert!(config().effective_user_agent().starts_with("reporting/"));
        assert_eq!(
            config().with_user_agent("ops/1.0").effective_user_agent(),
            "ops/1.0"
        );
    }
}
