use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Error type for loading a [`ReadinessConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Deployment settings of the questionnaire.
///
/// Every field has a default, so an empty file (or none at all) is a valid
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadinessConfig {
    /// Suffix the contact address must end with to unlock the export.
    pub email_domain_suffix: String,

    /// Recipient of the email draft.
    pub recipient: String,

    /// Prefix of every secure store entry name.
    pub secure_key_prefix: String,

    /// Title used for the email subject and the report heading.
    pub report_title: String,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            email_domain_suffix: "@db.com".to_string(),
            recipient: "sre-readiness@db.com".to_string(),
            secure_key_prefix: "secure_".to_string(),
            report_title: "SRE Readiness Assessment".to_string(),
        }
    }
}

impl ReadinessConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Name of the secure store entry holding `field`.
    pub fn secure_name(&self, field: &str) -> String {
        format!("{}{field}", self.secure_key_prefix)
    }

    /// Check a contact address against the required domain suffix.
    pub fn accepts_email(&self, address: &str) -> bool {
        address.trim().ends_with(&self.email_domain_suffix)
    }

    pub fn with_email_domain_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.email_domain_suffix = suffix.into();
        self
    }

    pub fn with_recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = recipient.into();
        self
    }

    pub fn with_secure_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.secure_key_prefix = prefix.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        let config = ReadinessConfig::from_toml_str("").unwrap();
        assert_eq!(config, ReadinessConfig::default());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = ReadinessConfig::from_toml_str(
            r#"
            email_domain_suffix = "@example.org"
            "#,
        )
        .unwrap();
        assert_eq!(config.email_domain_suffix, "@example.org");
        assert_eq!(config.secure_key_prefix, "secure_");
    }

    #[test]
    fn invalid_toml() {
        let err = ReadinessConfig::from_toml_str("recipient = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file() {
        let err = ReadinessConfig::load("/nonexistent/readiness.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn email_suffix_check() {
        let config = ReadinessConfig::default();
        assert!(config.accepts_email("jane.doe@db.com"));
        assert!(config.accepts_email(" ops@db.com "));
        assert!(!config.accepts_email("jane@DB.com"));
        assert!(!config.accepts_email("jane@db.com.evil"));
        assert!(!config.accepts_email(""));
    }

    #[test]
    fn secure_names() {
        let config = ReadinessConfig::default().with_secure_key_prefix("x_");
        assert_eq!(config.secure_name("nar_id"), "x_nar_id");
    }
}
