//! Kiln References
//!
//! Parsing, classification and version rewriting for content entity
//! references.
//!
//! # Overview
//!
//! Every editable entity has a canonical reference string:
//!
//! ```text
//! [domain]/<kind>/<name>[/instances/<id>][.<ext>][@<version>]
//! ```
//!
//! - **Resolver**: classifies references and extracts name, instance,
//!   extension and version
//! - **Version rewriting**: add, replace or strip the `@version` suffix
//! - **Reference**: owned reference text, validated once at untyped boundaries
//!
//! All operations are pure functions over immutable input.
//!
//! # Example
//!
//! ```rust
//! use kiln_reference::{get_component_instance, get_component_name, is_component, replace_version};
//!
//! let r = "nymag.com/press/components/base/instances/foobarbaz@published";
//! assert!(is_component(r));
//! assert_eq!(get_component_name(r), Some("base"));
//! assert_eq!(get_component_instance(r), Some("foobarbaz"));
//!
//! assert_eq!(replace_version("domain.com/pages/foo", Some("bar")), "domain.com/pages/foo@bar");
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod extension;
pub mod kind;
pub mod parse;
pub mod reference;
pub mod resolver;
pub mod version;

// Re-exports
pub use config::ResolverConfig;
pub use error::{json_type_name, ReferenceError};
pub use extension::ExtensionSet;
pub use kind::Kind;
pub use parse::ReferenceParts;
pub use reference::Reference;
pub use resolver::{
    classify, component_label, get_component_instance, get_component_name, get_extension,
    get_page_name, is_component, is_page, is_user, label, parse, strip_extension, Resolver,
};
pub use version::{
    get_component_version, get_version, replace_version, replace_version_value, strip_version,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for reference handling
    pub use crate::{
        get_component_instance, get_component_name, get_version, is_component, replace_version,
        Kind, Reference, ReferenceError, ReferenceParts, Resolver,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
