//! File-format extension recognition
//!
//! Provides [`ExtensionSet`], the policy deciding which `.suffix` on a name or
//! instance segment is presentational and therefore not part of the value.

use serde::{Deserialize, Serialize};

use crate::error::ReferenceError;

/// Extension recognition policy
///
/// The extension of a segment starts at the first `.` whose remainder is made
/// up entirely of recognized extensions. Under [`ExtensionSet::Any`] every
/// remainder is recognized, so the first `.` always starts the extension.
///
/// # Examples
/// - `Any`: `base.html` → (`base`, `html`), `base.v2.json` → (`base`, `v2.json`)
/// - `Known([html])`: `base.v2.html` → (`base.v2`, `html`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum ExtensionSet {
    /// Any `.` starts an extension
    #[default]
    Any,
    /// Only the listed extensions (without leading dot) are recognized
    Known {
        /// Recognized extensions, e.g. `["html", "json"]`
        extensions: Vec<String>,
    },
}

impl ExtensionSet {
    /// Policy recognizing only the given extensions
    ///
    /// Leading dots are ignored, so `".html"` and `"html"` are equivalent.
    #[must_use]
    pub fn known<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::Known {
            extensions: extensions
                .into_iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_string())
                .collect(),
        }
    }

    /// Check that every listed extension is a usable suffix
    ///
    /// # Errors
    /// Returns [`ReferenceError::Config`] for empty entries or entries
    /// containing `/`, `@` or `.`.
    pub fn validate(&self) -> Result<(), ReferenceError> {
        let Self::Known { extensions } = self else {
            return Ok(());
        };

        for ext in extensions {
            let ext = ext.trim_start_matches('.');
            if ext.is_empty() {
                return Err(ReferenceError::Config("empty extension".to_string()));
            }
            if ext.contains(['/', '@', '.']) {
                return Err(ReferenceError::Config(format!(
                    "extension may not contain '/', '@' or '.': {ext}"
                )));
            }
        }
        Ok(())
    }

    /// Whether a single dot-free suffix is recognized
    #[must_use]
    pub fn recognizes(&self, suffix: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Known { extensions } => extensions
                .iter()
                .any(|ext| ext.trim_start_matches('.') == suffix),
        }
    }

    /// Split a segment into its value and its extension (without the dot)
    #[must_use]
    pub fn split<'a>(&self, segment: &'a str) -> (&'a str, Option<&'a str>) {
        for (dot, _) in segment.match_indices('.') {
            let remainder = &segment[dot + 1..];
            if remainder.split('.').all(|suffix| self.recognizes(suffix)) {
                return (&segment[..dot], Some(remainder));
            }
        }
        (segment, None)
    }

    /// Segment with its extension removed
    #[inline]
    #[must_use]
    pub fn strip<'a>(&self, segment: &'a str) -> &'a str {
        self.split(segment).0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_splits_at_first_dot() {
        let set = ExtensionSet::Any;
        assert_eq!(set.split("base.html"), ("base", Some("html")));
        assert_eq!(set.split("base.v2.json"), ("base", Some("v2.json")));
        assert_eq!(set.split("base"), ("base", None));
    }

    #[test]
    fn known_keeps_unrecognized_dots() {
        let set = ExtensionSet::known(["html", ".json"]);
        assert_eq!(set.split("base.v2.html"), ("base.v2", Some("html")));
        assert_eq!(set.split("base.json.html"), ("base", Some("json.html")));
        assert_eq!(set.split("base.v2"), ("base.v2", None));
    }

    #[test]
    fn strip_is_idempotent() {
        for set in [ExtensionSet::Any, ExtensionSet::known(["html", "json"])] {
            for segment in ["base.html", "base.json.json", "a.b.c", "plain", ".html"] {
                let once = set.strip(segment);
                assert_eq!(set.strip(once), once, "{set:?} on {segment}");
            }
        }
    }

    #[test]
    fn validate_rejects_bad_entries() {
        assert!(ExtensionSet::known(["html"]).validate().is_ok());
        assert!(ExtensionSet::known([""]).validate().is_err());
        assert!(ExtensionSet::known(["a/b"]).validate().is_err());
        assert!(ExtensionSet::known(["tar.gz"]).validate().is_err());
    }
}
