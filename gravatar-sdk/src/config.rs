//! SDK configuration.
//!
//! A [`Configuration`] is a plain read-only value handed to services at
//! construction. For apps that prefer not to thread it around, one value can
//! be installed process-wide with [`Configuration::init_global`].
//!
//! # Global configuration
//! - Install it **once**, during startup, before any service is built.
//! - Later calls are rejected: the rejected value is handed back as the error.
//!   Reconfiguring a running process is not supported.
//! - Reads are lock-free and safe from any number of threads.
//! - Services copy the configuration when they are built, so they never
//!   observe a change mid-flight.

use std::fmt;
use std::sync::OnceLock;
use std::time::Duration;

use url::Url;

/// Base URL of the REST API.
pub const DEFAULT_API_BASE: &str = "https://api.gravatar.com/";
/// Base URL of avatar images.
pub const DEFAULT_AVATAR_BASE: &str = gravatar_common::constants::DEFAULT_AVATAR_BASE;
/// Base URL of the legacy JSON profiles.
pub const DEFAULT_LEGACY_PROFILE_BASE: &str = "https://en.gravatar.com/";

static GLOBAL_CONFIGURATION: OnceLock<Configuration> = OnceLock::new();

fn parse_constant(url: &str) -> Url {
    Url::parse(url).expect("default base URLs are valid")
}

/// Read-only SDK configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct Configuration {
    api_key: Option<String>,
    api_base: Url,
    avatar_base: Url,
    legacy_profile_base: Url,
    request_timeout: Option<Duration>,
    user_agent_extra: Option<String>,
}

impl Configuration {
    /// Returns a builder starting from the defaults.
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::default()
    }

    /// Install `config` as the process-wide configuration.
    ///
    /// Only the first call succeeds; later calls return the rejected value.
    pub fn init_global(config: Configuration) -> Result<(), Configuration> {
        GLOBAL_CONFIGURATION.set(config).inspect(|_| {
            tracing::debug!("global configuration installed");
        })
    }

    /// The process-wide configuration, or the defaults if none was installed.
    pub fn global() -> Configuration {
        GLOBAL_CONFIGURATION.get().cloned().unwrap_or_default()
    }

    /// API key sent as a bearer token on profile requests, if any.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Base URL of the REST API.
    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Base URL of avatar images.
    pub fn avatar_base(&self) -> &Url {
        &self.avatar_base
    }

    /// Base URL of the legacy JSON profiles.
    pub fn legacy_profile_base(&self) -> &Url {
        &self.legacy_profile_base
    }

    /// Request timeout applied by clients built from this configuration.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    /// Extra user-agent segment.
    pub fn user_agent_extra(&self) -> Option<&str> {
        self.user_agent_extra.as_deref()
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: parse_constant(DEFAULT_API_BASE),
            avatar_base: parse_constant(DEFAULT_AVATAR_BASE),
            legacy_profile_base: parse_constant(DEFAULT_LEGACY_PROFILE_BASE),
            request_timeout: None,
            user_agent_extra: None,
        }
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base", &self.api_base.as_str())
            .field("avatar_base", &self.avatar_base.as_str())
            .field("legacy_profile_base", &self.legacy_profile_base.as_str())
            .field("request_timeout", &self.request_timeout)
            .field("user_agent_extra", &self.user_agent_extra)
            .finish()
    }
}

/// Builds a [`Configuration`].
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct ConfigurationBuilder {
    config: Configuration,
}

impl ConfigurationBuilder {
    /// API key sent as a bearer token on profile requests. Blank keys are ignored.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.config.api_key = (!key.trim().is_empty()).then_some(key);
        self
    }

    /// Base URL of the REST API.
    pub fn api_base(mut self, url: Url) -> Self {
        self.config.api_base = url;
        self
    }

    /// Base URL of avatar images.
    pub fn avatar_base(mut self, url: Url) -> Self {
        self.config.avatar_base = url;
        self
    }

    /// Base URL of the legacy JSON profiles.
    pub fn legacy_profile_base(mut self, url: Url) -> Self {
        self.config.legacy_profile_base = url;
        self
    }

    /// Request timeout for clients built from this configuration.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = Some(timeout);
        self
    }

    /// Extra user-agent segment.
    pub fn user_agent_extra(mut self, extra: impl Into<String>) -> Self {
        self.config.user_agent_extra = Some(extra.into());
        self
    }

    /// Finish building.
    pub fn build(self) -> Configuration {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Configuration::default();
        assert_eq!(config.api_key(), None);
        assert_eq!(config.api_base().as_str(), "https://api.gravatar.com/");
        assert_eq!(config.avatar_base().as_str(), "https://gravatar.com/avatar/");
        assert_eq!(
            config.legacy_profile_base().as_str(),
            "https://en.gravatar.com/"
        );
    }

    #[test]
    fn blank_api_key_is_ignored() {
        assert_eq!(Configuration::builder().api_key("  ").build().api_key(), None);
        assert_eq!(
            Configuration::builder().api_key("k").build().api_key(),
            Some("k")
        );
    }

    #[test]
    fn debug_redacts_the_api_key() {
        let config = Configuration::builder().api_key("super-secret").build();
        let printed = format!("{config:?}");
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn global_is_set_once() {
        let first = Configuration::builder().api_key("first").build();
        let second = Configuration::builder().api_key("second").build();

        // Other tests in this binary never install a global, so the first call wins.
        Configuration::init_global(first).unwrap();
        let rejected = Configuration::init_global(second).unwrap_err();
        assert_eq!(rejected.api_key(), Some("second"));
        assert_eq!(Configuration::global().api_key(), Some("first"));
    }
}
