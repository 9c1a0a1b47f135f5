//! Configuration file of the command line client.
//!
//! Every key is optional; a missing file is the same as an empty one. Values
//! are layered as: command line flags, then this file, then the environment
//! (for the API key only), then the SDK defaults.

use std::{fs, num::NonZeroU64, path::Path, str::FromStr, time::Duration};

use gravatar::Configuration;
use serde::{Deserialize, Serialize};
use url::Url;

/// Example configuration file.
pub const SAMPLE_CONFIG: &str = include_str!("../config.sample.toml");

/// Environment variable consulted for the API key when neither a flag nor the
/// file sets one.
pub const API_KEY_ENV: &str = "GRAVATAR_API_KEY";

/// Error that can occur when reading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigReadError {
    /// The file could not be read.
    #[error("config file could not be read: {0}")]
    ConfigFileNotFound(#[from] std::io::Error),
    /// The TOML was syntactically invalid or had unknown keys.
    #[error("config file is not valid TOML: {0}")]
    ConfigFileNotValid(#[from] toml::de::Error),
}

/// `[logging]` section. Values are `tracing` filter directives, checked when
/// the subscriber is installed.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LoggingToml {
    /// Level applied to every target, e.g. `info`.
    #[serde(default = "default_level")]
    pub level: String,
    /// Per-target overrides, e.g. `gravatar=debug`.
    #[serde(default)]
    pub module_levels: Vec<String>,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingToml {
    fn default() -> Self {
        Self {
            level: default_level(),
            module_levels: Vec::new(),
        }
    }
}

impl LoggingToml {
    /// All directives as one comma separated filter string, global level first.
    pub fn directives(&self) -> String {
        std::iter::once(self.level.trim())
            .chain(self.module_levels.iter().map(|d| d.trim()))
            .filter(|d| !d.is_empty())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// The whole configuration file.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigToml {
    pub api_key: Option<String>,
    pub api_base: Option<Url>,
    pub avatar_base: Option<Url>,
    pub legacy_profile_base: Option<Url>,
    pub request_timeout_secs: Option<NonZeroU64>,
    pub user_agent_extra: Option<String>,
    pub logging: Option<LoggingToml>,
}

/// Values given on the command line. `None` keeps the file value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub api_base: Option<Url>,
    pub request_timeout_secs: Option<NonZeroU64>,
}

impl ConfigToml {
    /// Read and parse a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigReadError> {
        let raw = fs::read_to_string(path)?;
        Ok(Self::from_str(&raw)?)
    }

    /// Layer command line values over the file and fill the API key from
    /// `env_api_key` if still unset.
    pub fn with_overrides(mut self, overrides: Overrides, env_api_key: Option<String>) -> Self {
        if overrides.api_key.is_some() {
            self.api_key = overrides.api_key;
        }
        if overrides.api_base.is_some() {
            self.api_base = overrides.api_base;
        }
        if overrides.request_timeout_secs.is_some() {
            self.request_timeout_secs = overrides.request_timeout_secs;
        }
        if self.api_key.as_deref().is_none_or(|key| key.trim().is_empty()) {
            self.api_key = env_api_key.filter(|key| !key.trim().is_empty());
        }
        self
    }

    /// The SDK configuration described by this file.
    pub fn to_configuration(&self) -> Configuration {
        let mut builder = Configuration::builder();
        if let Some(key) = &self.api_key {
            builder = builder.api_key(key.clone());
        }
        if let Some(url) = &self.api_base {
            builder = builder.api_base(url.clone());
        }
        if let Some(url) = &self.avatar_base {
            builder = builder.avatar_base(url.clone());
        }
        if let Some(url) = &self.legacy_profile_base {
            builder = builder.legacy_profile_base(url.clone());
        }
        if let Some(secs) = self.request_timeout_secs {
            builder = builder.request_timeout(Duration::from_secs(secs.get()));
        }
        if let Some(extra) = &self.user_agent_extra {
            builder = builder.user_agent_extra(extra.clone());
        }
        builder.build()
    }
}

impl FromStr for ConfigToml {
    type Err = toml::de::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn sample_config_is_valid() {
        let config = ConfigToml::from_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(config.api_key, None);
        assert_eq!(config.request_timeout_secs, NonZeroU64::new(30));
        let logging = config.logging.unwrap();
        assert_eq!(
            logging,
            LoggingToml {
                level: "info".into(),
                module_levels: vec!["gravatar=info".into(), "gravatar_cli=info".into()],
            }
        );
        assert_eq!(logging.directives(), "info,gravatar=info,gravatar_cli=info");
    }

    #[test]
    fn empty_config_is_the_sdk_default() {
        let config = ConfigToml::from_str("").unwrap();
        assert_eq!(config, ConfigToml::default());
        assert_eq!(config.to_configuration(), Configuration::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(ConfigToml::from_str("api_kee = \"typo\"").is_err());
        assert!(ConfigToml::from_str("request_timeout_secs = 0").is_err());
    }

    #[test]
    fn logging_defaults_and_directives() {
        let config = ConfigToml::from_str(
            r#"
            [logging]
            module_levels = [" gravatar=debug ", ""]
            "#,
        )
        .unwrap();
        let logging = config.logging.unwrap();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.directives(), "info,gravatar=debug");

        let quiet = LoggingToml {
            level: String::new(),
            module_levels: vec![],
        };
        assert_eq!(quiet.directives(), "");
    }

    #[test]
    fn file_values_reach_the_sdk_configuration() {
        let config = ConfigToml::from_str(
            r#"
            api_key = "file-key"
            api_base = "http://localhost:8080/"
            request_timeout_secs = 7
            user_agent_extra = "test/1"
            "#,
        )
        .unwrap()
        .to_configuration();

        assert_eq!(config.api_key(), Some("file-key"));
        assert_eq!(config.api_base().as_str(), "http://localhost:8080/");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(7)));
        assert_eq!(config.user_agent_extra(), Some("test/1"));
    }

    #[test]
    fn override_precedence() {
        let file = ConfigToml {
            api_key: Some("file-key".into()),
            ..Default::default()
        };

        // Flag beats file.
        let flagged = file.clone().with_overrides(
            Overrides {
                api_key: Some("flag-key".into()),
                ..Default::default()
            },
            Some("env-key".into()),
        );
        assert_eq!(flagged.api_key.as_deref(), Some("flag-key"));

        // File beats environment.
        let from_file = file.with_overrides(Overrides::default(), Some("env-key".into()));
        assert_eq!(from_file.api_key.as_deref(), Some("file-key"));

        // Environment only when nothing else is set.
        let from_env =
            ConfigToml::default().with_overrides(Overrides::default(), Some("env-key".into()));
        assert_eq!(from_env.api_key.as_deref(), Some("env-key"));

        let blank_env =
            ConfigToml::default().with_overrides(Overrides::default(), Some(" ".into()));
        assert_eq!(blank_env.api_key, None);
    }

    #[test]
    fn read_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_key = \"from-disk\"").unwrap();

        let config = ConfigToml::from_file(file.path()).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("from-disk"));

        assert!(matches!(
            ConfigToml::from_file("/definitely/not/here.toml"),
            Err(ConfigReadError::ConfigFileNotFound(_))
        ));
    }
}
