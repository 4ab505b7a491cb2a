//! Resolver configuration
//!
//! Loaded from TOML:
//!
//! ```toml
//! [extensions]
//! policy = "known"
//! extensions = ["html", "json"]
//! ```
//!
//! A missing `[extensions]` table means any `.` starts an extension.

use serde::{Deserialize, Serialize};

use crate::error::ReferenceError;
use crate::extension::ExtensionSet;

/// Configuration for a [`Resolver`](crate::Resolver)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Extension recognition policy
    pub extensions: ExtensionSet,
}

impl ResolverConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With an explicit extension policy
    #[inline]
    #[must_use]
    pub fn with_extensions(mut self, extensions: ExtensionSet) -> Self {
        self.extensions = extensions;
        self
    }

    /// Parse and validate a TOML document
    ///
    /// # Errors
    /// Returns [`ReferenceError::Config`] if the document is malformed or lists
    /// unusable extensions.
    pub fn from_toml_str(source: &str) -> Result<Self, ReferenceError> {
        let config: Self =
            toml::from_str(source).map_err(|e| ReferenceError::Config(e.to_string()))?;
        config.extensions.validate()?;
        Ok(config)
    }
}
