//! Entity kinds encoded in references

use std::fmt::{self, Display, Formatter};

/// Entity category addressed by a reference
///
/// Each kind is encoded by a literal, case-sensitive path segment:
/// `components`, `pages`, or `users`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    /// `…/components/<name>[/instances/<id>]`
    Component,
    /// `…/pages/<id>`
    Page,
    /// `…/users/<id>`
    User,
}

impl Kind {
    /// All kinds, in marker-search order
    pub const ALL: [Self; 3] = [Self::Component, Self::Page, Self::User];

    /// Literal path segment for this kind
    #[inline]
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Component => "components",
            Self::Page => "pages",
            Self::User => "users",
        }
    }

    /// Kind for a literal path segment, if it is one
    #[must_use]
    pub fn from_marker(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.marker() == segment)
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}
