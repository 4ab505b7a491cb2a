//! Kiln Publish
//!
//! Page publish workflow built on [`kiln_reference`]:
//! - Validates the page and its components against [`Rule`]s
//! - Marks the page reference published (`…/pages/foo@published`)
//! - Hands it to a [`PagePublisher`] and reports progress
//!
//! Network transport and the editor UI stay outside this crate, behind the
//! [`PagePublisher`] and [`ProgressReporter`] traits.
//!
//! # Example
//!
//! ```
//! use async_trait::async_trait;
//! use kiln_publish::{
//!     PagePublisher, PageState, PublishError, PublishWorkflow, RequiredFields, TracingProgress,
//!     Validator,
//! };
//! use kiln_reference::Reference;
//!
//! struct StaticSite;
//!
//! #[async_trait]
//! impl PagePublisher for StaticSite {
//!     async fn publish(&self, page: &Reference) -> Result<String, PublishError> {
//!         Ok(format!("https://{}.html", page.without_version()))
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), PublishError> {
//! let validator = Validator::new().with_rule(RequiredFields::new().require("title", ["text"]));
//! let workflow = PublishWorkflow::new(StaticSite, TracingProgress, validator);
//!
//! let state = PageState::new(Reference::page("domain.com", "foo"));
//! let outcome = workflow.publish(&state).await?;
//! assert!(outcome.is_published());
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod progress;
pub mod validation;
pub mod workflow;

// Re-exports for convenience
pub use config::PublishConfig;
pub use error::PublishError;
pub use progress::{Color, ProgressReporter, TracingProgress};
pub use validation::{Finding, PageState, RequiredFields, Rule, RuleViolation, Validator};
pub use workflow::{PagePublisher, PublishOutcome, PublishWorkflow};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for publishing
    pub use crate::{
        Color, PagePublisher, PageState, ProgressReporter, PublishConfig, PublishError,
        PublishOutcome, PublishWorkflow, Rule, Validator,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
