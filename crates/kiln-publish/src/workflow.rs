//! Page publish workflow
//!
//! Validates the page, marks its reference published, and hands it to the
//! [`PagePublisher`]:
//!
//! 1. start progress
//! 2. run validation; stop with [`PublishOutcome::Invalid`] on violations
//! 3. rewrite the page version to the published label
//! 4. publish; report the URL or a generic server error

use std::time::Duration;

use async_trait::async_trait;
use kiln_reference::Reference;

use crate::config::PublishConfig;
use crate::error::PublishError;
use crate::progress::{Color, ProgressReporter};
use crate::validation::{PageState, RuleViolation, Validator};

/// Backend that makes a page public
///
/// Receives the page reference with the published version already applied
/// and returns the public URL.
#[async_trait]
pub trait PagePublisher: Send + Sync {
    /// Publish the page
    async fn publish(&self, page: &Reference) -> Result<String, PublishError>;
}

/// Result of one publish attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The page is live
    Published {
        /// Published page reference, e.g. `domain.com/pages/foo@published`
        reference: Reference,
        /// Public URL returned by the publisher
        url: String,
    },
    /// Validation failed; nothing was published
    Invalid(Vec<RuleViolation>),
    /// The publisher failed; the user was asked to try again
    ServerError {
        /// Publisher error, for logs only
        message: String,
    },
}

impl PublishOutcome {
    /// Whether the page went live
    #[inline]
    #[must_use]
    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published { .. })
    }
}

/// Publish orchestration over a publisher and a progress reporter
pub struct PublishWorkflow<P, R> {
    publisher: P,
    progress: R,
    validator: Validator,
    config: PublishConfig,
}

impl<P: PagePublisher, R: ProgressReporter> PublishWorkflow<P, R> {
    /// Create a workflow with default configuration
    #[must_use]
    pub fn new(publisher: P, progress: R, validator: Validator) -> Self {
        Self {
            publisher,
            progress,
            validator,
            config: PublishConfig::default(),
        }
    }

    /// With explicit configuration
    #[inline]
    #[must_use]
    pub fn with_config(mut self, config: PublishConfig) -> Self {
        self.config = config;
        self
    }

    /// Get configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &PublishConfig {
        &self.config
    }

    /// Get the progress reporter
    #[inline]
    #[must_use]
    pub fn progress(&self) -> &R {
        &self.progress
    }

    /// Get the publisher
    #[inline]
    #[must_use]
    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Reference the page will be published under
    ///
    /// # Errors
    /// Returns [`PublishError::Config`] if the configuration fails
    /// [`PublishConfig::validate`], or [`PublishError::NotAPage`] if `page`
    /// does not address a page.
    pub fn published_reference(&self, page: &Reference) -> Result<Reference, PublishError> {
        self.config.validate()?;
        if !page.is_page() {
            return Err(PublishError::NotAPage(page.clone()));
        }
        Ok(page.with_version(&self.config.published_version))
    }

    /// Validate and publish the page in `state`
    ///
    /// Validation and publisher failures are reported through the returned
    /// outcome and the progress reporter.
    ///
    /// # Errors
    /// Returns [`PublishError::Config`] for an invalid configuration and
    /// [`PublishError::NotAPage`] if the state's reference does not address a
    /// page. Nothing is reported to the progress reporter in either case.
    pub async fn publish(&self, state: &PageState) -> Result<PublishOutcome, PublishError> {
        let published = self.published_reference(state.page())?;
        tracing::info!("Publishing page: {}", state.page());

        self.progress.start(Color::Green);

        let violations = self.validator.validate(state);
        if !violations.is_empty() {
            tracing::warn!("Publish blocked by {} failing rule(s)", violations.len());
            self.progress.done(Some(Color::Red));
            return Ok(PublishOutcome::Invalid(violations));
        }

        let timeout = Duration::from_secs(self.config.publish_timeout_secs);
        let result = match tokio::time::timeout(timeout, self.publisher.publish(&published)).await {
            Ok(result) => result,
            Err(_) => Err(PublishError::Timeout {
                duration_secs: self.config.publish_timeout_secs,
            }),
        };

        match result {
            Ok(url) => {
                tracing::info!("Published {} at {}", published, url);
                self.progress.done(None);
                self.progress
                    .open(Color::Green, &self.config.success_message(&url));
                Ok(PublishOutcome::Published {
                    reference: published,
                    url,
                })
            }
            Err(e) => {
                tracing::error!("Publish failed: {}", e);
                self.progress.done(Some(Color::Red));
                self.progress
                    .open(Color::Red, &self.config.server_error_message);
                Ok(PublishOutcome::ServerError {
                    message: e.to_string(),
                })
            }
        }
    }
}

impl<P, R> std::fmt::Debug for PublishWorkflow<P, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublishWorkflow")
            .field("validator", &self.validator)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
