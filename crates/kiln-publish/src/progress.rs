//! Progress reporting seam
//!
//! The editor's progress bar and message banner live outside this crate; the
//! workflow drives them through [`ProgressReporter`].

use std::fmt::{self, Display, Formatter};

/// Progress indicator color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Normal / success
    Green,
    /// Failure
    Red,
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Green => f.write_str("green"),
            Self::Red => f.write_str("red"),
        }
    }
}

/// Receiver of progress updates
pub trait ProgressReporter: Send + Sync {
    /// Start the indicator
    fn start(&self, color: Color);

    /// Finish the indicator, optionally switching its color
    fn done(&self, color: Option<Color>);

    /// Show a message banner
    fn open(&self, color: Color, message: &str);
}

/// Reporter that only logs
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgress;

impl ProgressReporter for TracingProgress {
    fn start(&self, color: Color) {
        tracing::debug!("progress start ({})", color);
    }

    fn done(&self, color: Option<Color>) {
        match color {
            Some(color) => tracing::debug!("progress done ({})", color),
            None => tracing::debug!("progress done"),
        }
    }

    fn open(&self, color: Color, message: &str) {
        tracing::info!("progress message ({}): {}", color, message);
    }
}
