//! Testing utilities for Kiln workspace
//!
//! Shared test helpers, fixtures, and recording fakes.

#![allow(missing_docs)]

use async_trait::async_trait;
use kiln_publish::{Color, PagePublisher, PageState, ProgressReporter, PublishError};
use kiln_reference::Reference;
use parking_lot::Mutex;
use serde_json::json;
use tracing_subscriber::EnvFilter;

pub const DOMAIN: &str = "nymag.com/press";

/// Install a test-writer subscriber once; honors `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .with_test_writer()
        .try_init();
}

pub fn page_reference() -> Reference {
    Reference::page(DOMAIN, "cj2x0abc")
}

pub fn component_instance(name: &str, id: &str) -> Reference {
    Reference::instance(DOMAIN, name, id)
}

/// Page with a filled title and a paragraph whose text is blank
pub fn page_with_blank_paragraph() -> PageState {
    PageState::new(page_reference())
        .with_component(component_instance("title", "t1"), json!({ "text": "Headline" }))
        .with_component(component_instance("paragraph", "p1"), json!({ "text": "" }))
}

/// Page whose components are all filled in
pub fn complete_page() -> PageState {
    PageState::new(page_reference())
        .with_component(component_instance("title", "t1"), json!({ "text": "Headline" }))
        .with_component(component_instance("paragraph", "p1"), json!({ "text": "Body" }))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    Start(Color),
    Done(Option<Color>),
    Open(Color, String),
}

/// Progress reporter that records every call
#[derive(Debug, Default)]
pub struct RecordingProgress {
    events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().clone()
    }
}

impl ProgressReporter for RecordingProgress {
    fn start(&self, color: Color) {
        self.events.lock().push(ProgressEvent::Start(color));
    }

    fn done(&self, color: Option<Color>) {
        self.events.lock().push(ProgressEvent::Done(color));
    }

    fn open(&self, color: Color, message: &str) {
        self.events.lock().push(ProgressEvent::Open(color, message.to_string()));
    }
}

/// Publisher returning a fixed result and recording what it was asked to publish
#[derive(Debug)]
pub struct StubPublisher {
    result: Result<String, String>,
    calls: Mutex<Vec<Reference>>,
}

impl StubPublisher {
    pub fn succeeding(url: &str) -> Self {
        Self {
            result: Ok(url.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Reference> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl PagePublisher for StubPublisher {
    async fn publish(&self, page: &Reference) -> Result<String, PublishError> {
        self.calls.lock().push(page.clone());
        self.result.clone().map_err(PublishError::Publisher)
    }
}
