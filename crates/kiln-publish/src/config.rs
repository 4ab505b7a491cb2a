//! Publish workflow configuration

use serde::{Deserialize, Serialize};

use crate::error::PublishError;

/// Placeholder replaced by the published URL in [`PublishConfig::success_template`]
pub const URL_PLACEHOLDER: &str = "{url}";

/// Configuration for [`PublishWorkflow`](crate::PublishWorkflow)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    /// Version label marking a page published
    pub published_version: String,
    /// Success message; `{url}` is replaced by the published URL
    pub success_template: String,
    /// Message shown when the publisher fails
    pub server_error_message: String,
    /// Seconds to wait for the publisher before giving up
    pub publish_timeout_secs: u64,
}

impl PublishConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a different published version label
    #[inline]
    #[must_use]
    pub fn with_published_version(mut self, version: impl Into<String>) -> Self {
        self.published_version = version.into();
        self
    }

    /// Parse and validate a TOML document
    ///
    /// # Errors
    /// Returns [`PublishError::Config`] if the document is malformed or fails
    /// [`validate`](Self::validate).
    pub fn from_toml_str(source: &str) -> Result<Self, PublishError> {
        let config: Self = toml::from_str(source).map_err(|e| PublishError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the published version label and the timeout
    ///
    /// # Errors
    /// Returns [`PublishError::Config`] for an empty label, a label containing
    /// `@`, or a zero timeout.
    pub fn validate(&self) -> Result<(), PublishError> {
        if self.published_version.is_empty() {
            return Err(PublishError::Config("published_version is empty".to_string()));
        }
        if self.publish_timeout_secs == 0 {
            return Err(PublishError::Config("publish_timeout_secs must be positive".to_string()));
        }
        if self.published_version.contains('@') {
            return Err(PublishError::Config(format!(
                "published_version may not contain '@': {}",
                self.published_version
            )));
        }
        Ok(())
    }

    /// Success message for a published URL
    #[must_use]
    pub fn success_message(&self, url: &str) -> String {
        self.success_template.replace(URL_PLACEHOLDER, url)
    }
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            published_version: "published".to_string(),
            success_template: r#"Published! <a href="{url}" target="_blank">View Article</a>"#
                .to_string(),
            server_error_message: "A server error occurred. Please try again.".to_string(),
            publish_timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_messages() {
        let config = PublishConfig::new();

        assert_eq!(config.published_version, "published");
        assert_eq!(
            config.success_message("http://d.com/foo.html"),
            r#"Published! <a href="http://d.com/foo.html" target="_blank">View Article</a>"#
        );
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = PublishConfig::from_toml_str("published_version = \"live\"\n").unwrap();

        assert_eq!(config.published_version, "live");
        assert_eq!(config.server_error_message, PublishConfig::new().server_error_message);
    }

    #[test]
    fn rejects_versions_with_separator() {
        let err = PublishConfig::from_toml_str("published_version = \"a@b\"\n").unwrap_err();
        assert!(matches!(err, PublishError::Config(_)));

        let err = PublishConfig::from_toml_str("published_version = \"\"\n").unwrap_err();
        assert!(matches!(err, PublishError::Config(_)));
    }
}
