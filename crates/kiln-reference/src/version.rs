//! Version qualifier extraction and rewriting
//!
//! The version is everything after the first `@`. It has no further
//! structure, and extraction is the same for every kind of reference.

use serde_json::Value;

use crate::error::ReferenceError;
use crate::parse::{split_version, VERSION_MARKER};

/// Everything after the first `@`, or `None` if there is no `@`
///
/// `foo@` has the (present, empty) version `""`.
#[inline]
#[must_use]
pub fn get_version(reference: &str) -> Option<&str> {
    split_version(reference).1
}

/// Version of a component reference; identical to [`get_version`]
#[inline]
#[must_use]
pub fn get_component_version(reference: &str) -> Option<&str> {
    get_version(reference)
}

/// Reference with any `@…` suffix removed
#[inline]
#[must_use]
pub fn strip_version(reference: &str) -> &str {
    split_version(reference).0
}

/// Add, replace, or remove the version qualifier
///
/// - no `@` and a version: append `@version`
/// - existing `@…` and a version: replace the suffix
/// - `None` or `""`: strip the suffix
///
/// Everything before the `@` is preserved byte for byte.
///
/// # Example
/// ```
/// use kiln_reference::replace_version;
///
/// let published = replace_version("domain.com/pages/foo", Some("published"));
/// assert_eq!(published, "domain.com/pages/foo@published");
/// assert_eq!(replace_version(&published, None), "domain.com/pages/foo");
/// ```
#[must_use]
pub fn replace_version(reference: &str, version: Option<&str>) -> String {
    let base = strip_version(reference);

    match version.filter(|v| !v.is_empty()) {
        Some(version) => {
            let mut out = String::with_capacity(base.len() + 1 + version.len());
            out.push_str(base);
            out.push(VERSION_MARKER);
            out.push_str(version);
            out
        }
        None => base.to_string(),
    }
}

/// [`replace_version`] for untyped input
///
/// # Errors
/// Returns [`ReferenceError::InvalidArgument`] naming the JSON type when
/// `reference` is not a string.
pub fn replace_version_value(
    reference: &Value,
    version: Option<&str>,
) -> Result<String, ReferenceError> {
    match reference {
        Value::String(reference) => Ok(replace_version(reference, version)),
        other => {
            let err = ReferenceError::invalid_argument(other);
            tracing::debug!("rejected untyped reference: {}", err);
            Err(err)
        }
    }
}
