//! Reference classification and segment extraction
//!
//! [`Resolver`] carries the extension policy; the free functions in this
//! module use the default policy ([`ExtensionSet::Any`]).

use crate::config::ResolverConfig;
use crate::extension::ExtensionSet;
use crate::kind::Kind;
use crate::parse::{
    bound_segment, find_instance_marker, locate_kind, non_empty, split_version, ReferenceParts,
};

/// Stateless reference resolver
///
/// Every method computes its answer from the input text alone; a `Resolver`
/// can be shared freely between threads.
///
/// # Example
/// ```
/// use kiln_reference::Resolver;
///
/// let resolver = Resolver::new();
/// let reference = "nymag.com/press/components/base/instances/foo@published";
///
/// assert!(resolver.is_component(reference));
/// assert_eq!(resolver.component_name(reference), Some("base"));
/// assert_eq!(resolver.component_instance(reference), Some("foo"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolver {
    extensions: ExtensionSet,
}

impl Resolver {
    /// Resolver recognizing any extension
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            extensions: ExtensionSet::Any,
        }
    }

    /// Resolver with an explicit extension policy
    #[inline]
    #[must_use]
    pub fn with_extensions(extensions: ExtensionSet) -> Self {
        Self { extensions }
    }

    /// Resolver built from loaded configuration
    #[inline]
    #[must_use]
    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::with_extensions(config.extensions.clone())
    }

    /// Extension policy in use
    #[inline]
    #[must_use]
    pub fn extensions(&self) -> &ExtensionSet {
        &self.extensions
    }

    /// Parse all parts of a reference
    #[inline]
    #[must_use]
    pub fn parse<'a>(&self, reference: &'a str) -> ReferenceParts<'a> {
        ReferenceParts::parse(reference, &self.extensions)
    }

    /// Kind of the first marker in the reference
    #[must_use]
    pub fn classify(&self, reference: &str) -> Option<Kind> {
        let (base, _) = split_version(reference);
        locate_kind(base).map(|(kind, _)| kind)
    }

    /// Name following the marker for `kind`, without extension or version
    ///
    /// `None` unless `kind` is the reference's kind, i.e. the earliest marker.
    #[must_use]
    pub fn name_of<'a>(&self, reference: &'a str, kind: Kind) -> Option<&'a str> {
        let (base, _) = split_version(reference);
        let start = name_start(base, kind)?;
        non_empty(self.extensions.strip(bound_segment(&base[start..])))
    }

    /// Whether the reference addresses a component, default or placed
    #[inline]
    #[must_use]
    pub fn is_component(&self, reference: &str) -> bool {
        self.component_name(reference).is_some()
    }

    /// Whether the reference addresses a page
    #[inline]
    #[must_use]
    pub fn is_page(&self, reference: &str) -> bool {
        self.name_of(reference, Kind::Page).is_some()
    }

    /// Whether the reference addresses a user
    #[inline]
    #[must_use]
    pub fn is_user(&self, reference: &str) -> bool {
        self.name_of(reference, Kind::User).is_some()
    }

    /// Whether the reference addresses a placed component instance
    #[inline]
    #[must_use]
    pub fn is_instance(&self, reference: &str) -> bool {
        self.component_instance(reference).is_some()
    }

    /// Whether the reference addresses a component's default data
    #[inline]
    #[must_use]
    pub fn is_default_component(&self, reference: &str) -> bool {
        self.is_component(reference) && !self.is_instance(reference)
    }

    /// Component type name
    ///
    /// Stops at the next `/`, the `@` version marker, or a recognized
    /// extension. `None` when there is no `components` marker.
    #[inline]
    #[must_use]
    pub fn component_name<'a>(&self, reference: &'a str) -> Option<&'a str> {
        self.name_of(reference, Kind::Component)
    }

    /// Page identifier
    #[inline]
    #[must_use]
    pub fn page_name<'a>(&self, reference: &'a str) -> Option<&'a str> {
        self.name_of(reference, Kind::Page)
    }

    /// Component instance id
    ///
    /// `None` for default references: the id is only read from an
    /// `/instances/` segment directly after the component name.
    #[must_use]
    pub fn component_instance<'a>(&self, reference: &'a str) -> Option<&'a str> {
        let (base, _) = split_version(reference);
        let start = name_start(base, Kind::Component)?;
        let name_end = start + bound_segment(&base[start..]).len();
        let instance_start = name_end + find_instance_marker(&base[name_end..])?;
        non_empty(self.extensions.strip(bound_segment(&base[instance_start..])))
    }

    /// Extension of the final name or instance segment
    #[inline]
    #[must_use]
    pub fn extension<'a>(&self, reference: &'a str) -> Option<&'a str> {
        self.parse(reference).extension()
    }

    /// Reference with its extension removed; the version suffix is kept
    #[inline]
    #[must_use]
    pub fn strip_extension(&self, reference: &str) -> String {
        self.parse(reference).without_extension()
    }

    /// Human-facing label for the addressed component
    #[inline]
    #[must_use]
    pub fn component_label(&self, reference: &str) -> Option<String> {
        self.component_name(reference).map(label)
    }
}

/// Byte offset of the name, if the earliest kind marker in `base` is `kind`
fn name_start(base: &str, kind: Kind) -> Option<usize> {
    let (found, segment) = locate_kind(base)?;
    (found == kind).then(|| segment + kind.marker().len() + 1)
}

/// Title-case a component name: `paragraph-text` → `Paragraph Text`
#[must_use]
pub fn label(name: &str) -> String {
    name.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether the reference addresses a component
///
/// Never fails: malformed input is simply not a component.
#[inline]
#[must_use]
pub fn is_component(reference: &str) -> bool {
    Resolver::new().is_component(reference)
}

/// Whether the reference addresses a page
#[inline]
#[must_use]
pub fn is_page(reference: &str) -> bool {
    Resolver::new().is_page(reference)
}

/// Whether the reference addresses a user
#[inline]
#[must_use]
pub fn is_user(reference: &str) -> bool {
    Resolver::new().is_user(reference)
}

/// Kind of the first marker in the reference
#[inline]
#[must_use]
pub fn classify(reference: &str) -> Option<Kind> {
    Resolver::new().classify(reference)
}

/// Component type name, see [`Resolver::component_name`]
#[inline]
#[must_use]
pub fn get_component_name(reference: &str) -> Option<&str> {
    Resolver::new().component_name(reference)
}

/// Page identifier, see [`Resolver::page_name`]
#[inline]
#[must_use]
pub fn get_page_name(reference: &str) -> Option<&str> {
    Resolver::new().page_name(reference)
}

/// Component instance id, see [`Resolver::component_instance`]
#[inline]
#[must_use]
pub fn get_component_instance(reference: &str) -> Option<&str> {
    Resolver::new().component_instance(reference)
}

/// Extension of the final segment
#[inline]
#[must_use]
pub fn get_extension(reference: &str) -> Option<&str> {
    Resolver::new().extension(reference)
}

/// Reference without its extension
#[inline]
#[must_use]
pub fn strip_extension(reference: &str) -> String {
    Resolver::new().strip_extension(reference)
}

/// Human-facing component label
#[inline]
#[must_use]
pub fn component_label(reference: &str) -> Option<String> {
    Resolver::new().component_label(reference)
}

/// Parse a reference with the default extension policy
#[inline]
#[must_use]
pub fn parse(reference: &str) -> ReferenceParts<'_> {
    ReferenceParts::parse(reference, &ExtensionSet::Any)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_component_matches_default_and_instance() {
        assert!(is_component("domain.com/components/foo"));
        assert!(is_component("domain.com/components/foo/instances/bar"));
    }

    #[test]
    fn is_component_rejects_other_kinds() {
        assert!(!is_component("domain.com/users/foo"));
        assert!(!is_component("domain.com/pages/foo"));
        assert!(!is_component(""));
        assert!(!is_component("/components/"));
        assert!(!is_component("@components/foo"));
    }

    #[test]
    fn only_the_earliest_marker_decides_the_kind() {
        let r = "domain.com/pages/components/foo";
        assert_eq!(classify(r), Some(Kind::Page));
        assert!(is_page(r));
        assert!(!is_component(r));
        assert_eq!(get_component_name(r), None);
        assert_eq!(get_page_name(r), Some("components"));

        let r = "d.com/components/x/pages/y";
        assert_eq!(classify(r), Some(Kind::Component));
        assert!(is_component(r));
        assert!(!is_page(r));
        assert_eq!(get_page_name(r), None);

        let r = "d.com/users/u/components/c/instances/i";
        assert!(is_user(r));
        assert!(!is_component(r));
        assert_eq!(get_component_instance(r), None);
    }

    #[test]
    fn name_extraction() {
        assert_eq!(get_component_name("/components/base"), Some("base"));
        assert_eq!(get_component_name("/components/base/instances/0"), Some("base"));
        assert_eq!(get_component_name("/components/base/instances/0@published"), Some("base"));
        assert_eq!(get_component_name("/components/base.html"), Some("base"));
        assert_eq!(get_component_name("/components/base.json"), Some("base"));
        assert_eq!(get_component_name("/components/base@published"), Some("base"));
        assert_eq!(
            get_component_name("nymag.com/press/components/base/instances/foobarbaz@published"),
            Some("base")
        );
        assert_eq!(get_component_name("domain.com/pages/foo"), None);
    }

    #[test]
    fn instance_extraction() {
        assert_eq!(get_component_instance("/components/base/instances/0"), Some("0"));
        assert_eq!(get_component_instance("/components/base/instances/0.html"), Some("0"));
        assert_eq!(get_component_instance("/components/base/instances/0@published"), Some("0"));
        assert_eq!(
            get_component_instance("nymag.com/press/components/base/instances/foobarbaz@published"),
            Some("foobarbaz")
        );
    }

    #[test]
    fn default_reference_has_no_instance() {
        assert_eq!(get_component_instance("/components/base"), None);
        assert_eq!(get_component_instance("/components/instances"), None);
        assert_eq!(get_component_instance("/components/base@instances/0"), None);
    }

    #[test]
    fn known_extension_policy_keeps_dotted_names() {
        let resolver = Resolver::with_extensions(ExtensionSet::known(["html", "json"]));

        assert_eq!(resolver.component_name("/components/base.v2.html"), Some("base.v2"));
        assert_eq!(resolver.component_name("/components/base.v2"), Some("base.v2"));
        assert_eq!(get_component_name("/components/base.v2"), Some("base"));
    }

    #[test]
    fn classification_helpers() {
        assert_eq!(classify("d.com/users/u"), Some(Kind::User));
        assert!(is_page("d.com/pages/p@published"));
        assert!(is_user("d.com/users/u"));
        assert!(Resolver::new().is_default_component("/components/a"));
        assert!(!Resolver::new().is_default_component("/components/a/instances/b"));
        assert!(Resolver::new().is_instance("/components/a/instances/b"));
    }

    #[test]
    fn page_name_extraction() {
        assert_eq!(get_page_name("domain.com/pages/foo.html@published"), Some("foo"));
        assert_eq!(get_page_name("/components/foo"), None);
    }

    #[test]
    fn extension_helpers() {
        assert_eq!(get_extension("/components/a/instances/b.json@x"), Some("json"));
        assert_eq!(get_extension("domain.com/pages/foo"), None);
        assert_eq!(strip_extension("/components/a.html@x"), "/components/a@x");
        assert_eq!(strip_extension("domain.com"), "domain.com");
    }

    #[test]
    fn labels() {
        assert_eq!(label("paragraph"), "Paragraph");
        assert_eq!(label("paragraph-text"), "Paragraph Text");
        assert_eq!(label("image_gallery"), "Image Gallery");
        assert_eq!(component_label("/components/related-links/instances/a"), Some("Related Links".to_string()));
        assert_eq!(component_label("/pages/a"), None);
    }
}
