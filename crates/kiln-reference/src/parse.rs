//! Reference parsing steps
//!
//! Parsing is split into named steps so each terminator policy can be
//! exercised on its own:
//!
//! 1. [`split_version`]: split at the first `@`
//! 2. [`find_kind_marker`]: locate `<kind>/` at a segment boundary
//! 3. [`bound_segment`]: take the name up to the next `/`
//! 4. [`find_instance_marker`]: `/instances/` directly after the name
//! 5. [`bound_segment`] again for the instance
//! 6. [`ExtensionSet::split`]: strip the recognized extension
//!
//! All steps operate on the text before the `@`; the version carries no
//! structure and is never searched for markers.

use std::ops::Range;

use crate::extension::ExtensionSet;
use crate::kind::Kind;

/// Version separator
pub const VERSION_MARKER: char = '@';

/// Path separator
pub const PATH_SEPARATOR: char = '/';

/// Segment introducing a component instance
pub const INSTANCES_MARKER: &str = "/instances/";

/// Split a reference into its base and the text after the first `@`
#[inline]
#[must_use]
pub fn split_version(reference: &str) -> (&str, Option<&str>) {
    match reference.split_once(VERSION_MARKER) {
        Some((base, version)) => (base, Some(version)),
        None => (reference, None),
    }
}

/// Byte offset at which the marker segment for `kind` starts
///
/// The marker must begin the text or follow a `/`, and must itself be followed
/// by a `/`. Matching is literal and case-sensitive.
#[must_use]
pub fn find_kind_segment(base: &str, kind: Kind) -> Option<usize> {
    let marker = kind.marker();
    let bytes = base.as_bytes();

    base.match_indices(marker).map(|(start, _)| start).find(|&start| {
        let at_boundary = start == 0 || bytes[start - 1] == b'/';
        let followed_by_separator = bytes.get(start + marker.len()) == Some(&b'/');
        at_boundary && followed_by_separator
    })
}

/// Byte offset of the name following the `kind` marker
#[inline]
#[must_use]
pub fn find_kind_marker(base: &str, kind: Kind) -> Option<usize> {
    find_kind_segment(base, kind).map(|start| start + kind.marker().len() + 1)
}

/// Earliest kind marker in `base`, with its segment offset
#[must_use]
pub fn locate_kind(base: &str) -> Option<(Kind, usize)> {
    Kind::ALL
        .into_iter()
        .filter_map(|kind| find_kind_segment(base, kind).map(|start| (kind, start)))
        .min_by_key(|&(_, start)| start)
}

/// Leading segment of `rest`, up to the next `/`
#[inline]
#[must_use]
pub fn bound_segment(rest: &str) -> &str {
    rest.split(PATH_SEPARATOR).next().unwrap_or(rest)
}

/// Byte offset of the instance id, if `after_name` starts with `/instances/`
#[inline]
#[must_use]
pub fn find_instance_marker(after_name: &str) -> Option<usize> {
    after_name
        .starts_with(INSTANCES_MARKER)
        .then_some(INSTANCES_MARKER.len())
}

#[inline]
pub(crate) fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

/// Semantic parts of a reference
///
/// Borrowed from the input string; computed fresh on every call and never
/// cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceParts<'a> {
    source: &'a str,
    domain: &'a str,
    domain_separated: bool,
    kind: Option<Kind>,
    name: Option<&'a str>,
    instance: Option<&'a str>,
    extension: Option<&'a str>,
    extension_span: Option<Range<usize>>,
    version: Option<&'a str>,
}

impl<'a> ReferenceParts<'a> {
    /// Parse `reference` using the given extension policy
    #[must_use]
    pub fn parse(reference: &'a str, extensions: &ExtensionSet) -> Self {
        let (base, version) = split_version(reference);

        let Some((kind, marker_start)) = locate_kind(base) else {
            return Self {
                source: reference,
                domain: base,
                domain_separated: false,
                kind: None,
                name: None,
                instance: None,
                extension: None,
                extension_span: None,
                version,
            };
        };

        let prefix = &base[..marker_start];
        let (domain, domain_separated) = match prefix.strip_suffix(PATH_SEPARATOR) {
            Some(domain) => (domain, true),
            None => (prefix, false),
        };

        let name_start = marker_start + kind.marker().len() + 1;
        let name_segment = bound_segment(&base[name_start..]);
        let (name, name_ext) = extensions.split(name_segment);
        let name_end = name_start + name_segment.len();

        // Only the final segment carries a reportable extension
        let mut last = (name_start, name_segment.len(), name.len(), name_ext);
        let mut instance = None;

        if kind == Kind::Component {
            if let Some(offset) = find_instance_marker(&base[name_end..]) {
                let instance_start = name_end + offset;
                let instance_segment = bound_segment(&base[instance_start..]);
                let (id, id_ext) = extensions.split(instance_segment);
                instance = non_empty(id);
                last = (instance_start, instance_segment.len(), id.len(), id_ext);
            }
        }

        let (segment_start, segment_len, value_len, ext) = last;
        let is_final = segment_start + segment_len == base.len();
        let (extension, extension_span) = match ext {
            Some(ext) if is_final => (
                Some(ext),
                Some(segment_start + value_len..segment_start + segment_len),
            ),
            _ => (None, None),
        };

        Self {
            source: reference,
            domain,
            domain_separated,
            kind: Some(kind),
            name: non_empty(name),
            instance,
            extension,
            extension_span,
            version,
        }
    }

    /// Original reference text
    #[inline]
    #[must_use]
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Host/site segment preceding the kind marker
    ///
    /// For text without any kind marker this is the whole text before `@`.
    #[inline]
    #[must_use]
    pub fn domain(&self) -> &'a str {
        self.domain
    }

    /// First kind marker found
    #[inline]
    #[must_use]
    pub fn kind(&self) -> Option<Kind> {
        self.kind
    }

    /// Name following the kind marker, without extension
    #[inline]
    #[must_use]
    pub fn name(&self) -> Option<&'a str> {
        self.name
    }

    /// Component instance id, without extension
    #[inline]
    #[must_use]
    pub fn instance(&self) -> Option<&'a str> {
        self.instance
    }

    /// Extension of the final segment, without the dot
    #[inline]
    #[must_use]
    pub fn extension(&self) -> Option<&'a str> {
        self.extension
    }

    /// Everything after the first `@`
    #[inline]
    #[must_use]
    pub fn version(&self) -> Option<&'a str> {
        self.version
    }

    /// Source text with the extension (and its dot) removed
    #[must_use]
    pub fn without_extension(&self) -> String {
        match &self.extension_span {
            Some(span) => {
                let mut out = String::with_capacity(self.source.len() - span.len());
                out.push_str(&self.source[..span.start]);
                out.push_str(&self.source[span.end..]);
                out
            }
            None => self.source.to_string(),
        }
    }

    /// Canonical reference string rebuilt from the parts
    ///
    /// Format: `domain/kind/name[/instances/id][.ext][@version]`. The `/`
    /// before the kind is written only if the source had one, so
    /// `components/x` stays `components/x`. Segments past the name or
    /// instance are not retained.
    #[must_use]
    pub fn to_reference(&self) -> String {
        let mut out = String::from(self.domain);

        if let Some(kind) = self.kind {
            if self.domain_separated {
                out.push(PATH_SEPARATOR);
            }
            out.push_str(kind.marker());
            out.push(PATH_SEPARATOR);
            out.push_str(self.name.unwrap_or_default());

            if let Some(instance) = self.instance {
                out.push_str(INSTANCES_MARKER);
                out.push_str(instance);
            }
            if let Some(ext) = self.extension {
                out.push('.');
                out.push_str(ext);
            }
        }

        if let Some(version) = self.version {
            out.push(VERSION_MARKER);
            out.push_str(version);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(reference: &str) -> ReferenceParts<'_> {
        ReferenceParts::parse(reference, &ExtensionSet::Any)
    }

    #[test]
    fn split_version_uses_first_at() {
        assert_eq!(split_version("a/pages/b@c@d"), ("a/pages/b", Some("c@d")));
        assert_eq!(split_version("a/pages/b"), ("a/pages/b", None));
        assert_eq!(split_version("a/pages/b@"), ("a/pages/b", Some("")));
    }

    #[test]
    fn kind_marker_requires_segment_boundaries() {
        assert_eq!(find_kind_marker("/components/x", Kind::Component), Some(12));
        assert_eq!(find_kind_marker("components/x", Kind::Component), Some(11));
        assert_eq!(find_kind_marker("/mycomponents/x", Kind::Component), None);
        assert_eq!(find_kind_marker("/components", Kind::Component), None);
        assert_eq!(find_kind_marker("/Components/x", Kind::Component), None);
    }

    #[test]
    fn kind_marker_skips_false_matches() {
        let base = "site.com/mycomponents/components/x";
        let offset = find_kind_marker(base, Kind::Component).unwrap();
        assert_eq!(&base[offset..], "x");
    }

    #[test]
    fn locate_kind_picks_earliest() {
        assert_eq!(locate_kind("d/pages/components/x").map(|(k, _)| k), Some(Kind::Page));
        assert_eq!(locate_kind("d/users/x").map(|(k, _)| k), Some(Kind::User));
        assert_eq!(locate_kind("d/lists/x"), None);
    }

    #[test]
    fn bound_segment_stops_at_separator() {
        assert_eq!(bound_segment("base/instances/0"), "base");
        assert_eq!(bound_segment("base"), "base");
        assert_eq!(bound_segment(""), "");
    }

    #[test]
    fn instance_marker_must_follow_name() {
        assert_eq!(find_instance_marker("/instances/0"), Some(11));
        assert_eq!(find_instance_marker("/other/instances/0"), None);
        assert_eq!(find_instance_marker(""), None);
    }

    #[test]
    fn parse_full_instance_reference() {
        let parts = parse("nymag.com/press/components/base/instances/foo.html@published");

        assert_eq!(parts.domain(), "nymag.com/press");
        assert_eq!(parts.kind(), Some(Kind::Component));
        assert_eq!(parts.name(), Some("base"));
        assert_eq!(parts.instance(), Some("foo"));
        assert_eq!(parts.extension(), Some("html"));
        assert_eq!(parts.version(), Some("published"));
    }

    #[test]
    fn parse_default_component() {
        let parts = parse("/components/base.json");

        assert_eq!(parts.domain(), "");
        assert_eq!(parts.name(), Some("base"));
        assert_eq!(parts.instance(), None);
        assert_eq!(parts.extension(), Some("json"));
        assert_eq!(parts.version(), None);
    }

    #[test]
    fn parse_page_has_no_instance() {
        let parts = parse("domain.com/pages/foo/instances/bar");

        assert_eq!(parts.kind(), Some(Kind::Page));
        assert_eq!(parts.name(), Some("foo"));
        assert_eq!(parts.instance(), None);
    }

    #[test]
    fn parse_unstructured_text() {
        let parts = parse("just-text@v1");

        assert_eq!(parts.kind(), None);
        assert_eq!(parts.domain(), "just-text");
        assert_eq!(parts.name(), None);
        assert_eq!(parts.version(), Some("v1"));
    }

    #[test]
    fn extension_only_reported_on_final_segment() {
        let parts = parse("/components/base.html/instances/0");

        assert_eq!(parts.name(), Some("base"));
        assert_eq!(parts.instance(), Some("0"));
        assert_eq!(parts.extension(), None);
    }

    #[test]
    fn without_extension_keeps_version() {
        let parts = parse("d.com/components/a/instances/b.html@published");
        assert_eq!(parts.without_extension(), "d.com/components/a/instances/b@published");
    }

    #[test]
    fn to_reference_rebuilds_canonical_text() {
        for reference in [
            "d.com/components/a/instances/b.html@published",
            "/components/base",
            "components/base",
            "pages/p.html@v",
            "d.com/pages/p@v",
            "d.com/users/u.json",
            "unstructured@x",
        ] {
            assert_eq!(parse(reference).to_reference(), reference);
        }
    }
}
