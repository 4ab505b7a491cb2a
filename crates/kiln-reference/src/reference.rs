//! Owned reference text
//!
//! [`Reference`] is the typed boundary for reference arguments. Inside the
//! program a reference is always text, so the non-string case can only arise
//! when untyped input is ingested; [`Reference::from_value`] and the
//! `Deserialize` impl reject it there, once.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::ReferenceError;
use crate::kind::Kind;
use crate::parse::{ReferenceParts, INSTANCES_MARKER, PATH_SEPARATOR};
use crate::resolver::Resolver;
use crate::version::{get_version, replace_version, strip_version};

/// Immutable reference to a content entity
///
/// # Format
/// `[domain]/<kind>/<name>[/instances/<id>][.<ext>][@<version>]`
///
/// # Example
/// ```
/// use kiln_reference::Reference;
///
/// let instance = Reference::instance("domain.com", "paragraph", "abc");
/// assert_eq!(instance.as_str(), "domain.com/components/paragraph/instances/abc");
///
/// let published = instance.with_version("published");
/// assert_eq!(published.version(), Some("published"));
/// assert_eq!(published.without_version(), instance);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Reference(String);

impl Reference {
    /// Wrap reference text
    #[inline]
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Accept an untyped value as a reference
    ///
    /// # Errors
    /// Returns [`ReferenceError::InvalidArgument`] if `value` is not a string.
    pub fn from_value(value: &Value) -> Result<Self, ReferenceError> {
        match value {
            Value::String(text) => Ok(Self(text.clone())),
            other => Err(ReferenceError::invalid_argument(other)),
        }
    }

    fn build(domain: &str, kind: Kind, name: &str) -> String {
        let mut out = String::with_capacity(domain.len() + kind.marker().len() + name.len() + 2);
        out.push_str(domain.trim_end_matches(PATH_SEPARATOR));
        out.push(PATH_SEPARATOR);
        out.push_str(kind.marker());
        out.push(PATH_SEPARATOR);
        out.push_str(name);
        out
    }

    /// Default reference for a component type
    #[must_use]
    pub fn component(domain: &str, name: &str) -> Self {
        Self(Self::build(domain, Kind::Component, name))
    }

    /// Reference to a placed component instance
    #[must_use]
    pub fn instance(domain: &str, name: &str, id: &str) -> Self {
        let mut text = Self::build(domain, Kind::Component, name);
        text.push_str(INSTANCES_MARKER);
        text.push_str(id);
        Self(text)
    }

    /// Page reference
    #[must_use]
    pub fn page(domain: &str, id: &str) -> Self {
        Self(Self::build(domain, Kind::Page, id))
    }

    /// User reference
    #[must_use]
    pub fn user(domain: &str, id: &str) -> Self {
        Self(Self::build(domain, Kind::User, id))
    }

    /// Reference text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the underlying text
    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Parsed parts using the default extension policy
    #[inline]
    #[must_use]
    pub fn parts(&self) -> ReferenceParts<'_> {
        crate::resolver::parse(&self.0)
    }

    /// Kind of the first marker
    #[inline]
    #[must_use]
    pub fn kind(&self) -> Option<Kind> {
        Resolver::new().classify(&self.0)
    }

    /// See [`Resolver::is_component`]
    #[inline]
    #[must_use]
    pub fn is_component(&self) -> bool {
        Resolver::new().is_component(&self.0)
    }

    /// See [`Resolver::is_page`]
    #[inline]
    #[must_use]
    pub fn is_page(&self) -> bool {
        Resolver::new().is_page(&self.0)
    }

    /// See [`Resolver::component_name`]
    #[inline]
    #[must_use]
    pub fn component_name(&self) -> Option<&str> {
        Resolver::new().component_name(&self.0)
    }

    /// See [`Resolver::component_instance`]
    #[inline]
    #[must_use]
    pub fn component_instance(&self) -> Option<&str> {
        Resolver::new().component_instance(&self.0)
    }

    /// Everything after the first `@`
    #[inline]
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        get_version(&self.0)
    }

    /// Copy with the version set to `version`
    #[inline]
    #[must_use]
    pub fn with_version(&self, version: &str) -> Self {
        Self(replace_version(&self.0, Some(version)))
    }

    /// Copy with any version removed
    #[inline]
    #[must_use]
    pub fn without_version(&self) -> Self {
        Self(strip_version(&self.0).to_string())
    }
}

impl Display for Reference {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Reference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Reference {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Reference {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl FromStr for Reference {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl Serialize for Reference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

struct ReferenceVisitor;

impl ReferenceVisitor {
    fn reject<E: de::Error>(actual: &'static str) -> Result<Reference, E> {
        Err(E::custom(ReferenceError::InvalidArgument { actual }))
    }
}

impl<'de> Visitor<'de> for ReferenceVisitor {
    type Value = Reference;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("a reference string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Reference, E> {
        Ok(Reference::new(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Reference, E> {
        Ok(Reference(v))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Reference, E> {
        Self::reject("boolean")
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Reference, E> {
        Self::reject("number")
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Reference, E> {
        Self::reject("number")
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Reference, E> {
        Self::reject("number")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Reference, E> {
        Self::reject("null")
    }

    fn visit_none<E: de::Error>(self) -> Result<Reference, E> {
        Self::reject("null")
    }

    fn visit_seq<A: de::SeqAccess<'de>>(self, _: A) -> Result<Reference, A::Error> {
        Self::reject("array")
    }

    fn visit_map<A: de::MapAccess<'de>>(self, _: A) -> Result<Reference, A::Error> {
        Self::reject("object")
    }
}

impl<'de> Deserialize<'de> for Reference {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ReferenceVisitor)
    }
}
