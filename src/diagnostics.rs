//! Diagnostics emitted during evaluation
//!
//! Out-of-domain evaluation is not an error: Chebyshev polynomials stay
//! defined outside `[-1, 1]`, only accuracy is lost. Such events are handed to
//! a [`DiagnosticsSink`] injected into each approximation, so callers decide
//! whether they end up in the log, in a buffer, or nowhere.

use parking_lot::Mutex;
use std::fmt;

/// A non-fatal condition observed while evaluating an approximation
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// Some evaluation points fell outside `[0, lambda_max]`
    OutOfDomain {
        /// Smallest evaluation point
        min: f64,
        /// Largest evaluation point
        max: f64,
        /// Upper bound of the spectral domain
        lambda_max: f64,
        /// Number of points outside the domain
        count: usize,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfDomain {
                min,
                max,
                lambda_max,
                count,
            } => write!(
                f,
                "{count} point(s) in [{min:.4}, {max:.4}] lie outside the orthonormal domain [0, {lambda_max:.2}]"
            ),
        }
    }
}

/// Receiver for evaluation diagnostics
pub trait DiagnosticsSink: Send + Sync + fmt::Debug {
    /// Handle one diagnostic. Must not fail.
    fn report(&self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to `tracing` at WARN level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn report(&self, diagnostic: Diagnostic) {
        tracing::warn!(
            target: "ruvector_chebyshev",
            "Evaluating Chebyshev polynomials outside of their orthonormal domain: {}",
            diagnostic
        );
    }
}

/// Keeps every diagnostic in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Diagnostic>>,
}

impl RecordingSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded diagnostics
    pub fn events(&self) -> Vec<Diagnostic> {
        self.events.lock().clone()
    }

    /// Number of recorded diagnostics
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// True when nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Drop all recorded diagnostics
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl DiagnosticsSink for RecordingSink {
    fn report(&self, diagnostic: Diagnostic) {
        self.events.lock().push(diagnostic);
    }
}

/// Discards diagnostics
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticsSink for NullSink {
    fn report(&self, _diagnostic: Diagnostic) {}
}
