//! Error types for the publish workflow
//!
//! Validation failures and publisher failures are reported as
//! [`PublishOutcome`](crate::PublishOutcome) variants, not errors; errors
//! here mean the workflow could not run at all.

use kiln_reference::{Reference, ReferenceError};

/// Main publish error type
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// The reference handed to the workflow does not address a page
    #[error("not a page reference: {0}")]
    NotAPage(Reference),

    /// The page publisher failed
    #[error("publisher failed: {0}")]
    Publisher(String),

    /// The publisher did not answer in time
    #[error("publish timed out after {duration_secs}s")]
    Timeout {
        /// Configured timeout
        duration_secs: u64,
    },

    /// Untyped input carried an invalid reference
    #[error("reference error: {0}")]
    Reference(#[from] ReferenceError),

    /// Malformed page state payload
    #[error("invalid page state: {0}")]
    InvalidState(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl PublishError {
    /// Check if the user may simply try again
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Publisher(_) | Self::Timeout { .. })
    }
}
