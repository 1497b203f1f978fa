//! Best-effort problem collection for parsing and resolution
//!
//! Nothing in the parser or the resolver aborts on a problem in the build
//! description. Each problem is logged through the `log` facade and recorded
//! here, and the driver checks [`Diagnostics::has_errors`] once the whole
//! model has been processed.

use log::{error, warn};

/// Severity of a recorded problem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Reported, but does not block generation.
    Warning,
    /// Sets the aggregate error flag; generation is refused.
    Error,
}

/// A single recorded problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

/// Collector threaded through every parse and resolve pass
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error and log it.
    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        error!("{}", message);
        self.entries.push(Diagnostic {
            severity: Severity::Error,
            message,
        });
    }

    /// Record a warning and log it.
    pub fn warning(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{}", message);
        self.entries.push(Diagnostic {
            severity: Severity::Warning,
            message,
        });
    }

    /// The aggregate error flag
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.entries
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Messages of the given severity, in the order they were recorded
    pub fn messages(&self, severity: Severity) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(move |d| d.severity == severity)
            .map(|d| d.message.as_str())
    }

    /// Append another collector's entries (already logged) to this one.
    pub fn absorb(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }
}
