//! # Diagnostic Sinks
//!
//! Where arena failures are reported before being returned to the caller.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::ArenaError;

/// Receives every capacity, rollback and construction failure an arena hits.
///
/// Reporting never changes the outcome: the error is still returned.
pub trait DiagnosticSink {
    /// Records one failure.
    fn report(&self, error: &ArenaError);
}

/// Default sink: one `tracing` error event per failure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, error: &ArenaError) {
        match *error {
            ArenaError::CapacityExhausted {
                requested,
                cursor,
                capacity,
            } => tracing::error!(requested, cursor, capacity, "{error}"),
            ArenaError::InvalidRollback { checkpoint, cursor } => {
                tracing::error!(checkpoint, cursor, "{error}");
            }
            ArenaError::ConstructionFailed { capacity } => tracing::error!(capacity, "{error}"),
            _ => tracing::error!("{error}"),
        }
    }
}

/// Discards every report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SilentSink;

impl DiagnosticSink for SilentSink {
    #[inline]
    fn report(&self, _error: &ArenaError) {}
}

/// Keeps every report in memory.
///
/// Clones share the same log, so a test can hand one clone to an arena and
/// inspect the other.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    /// Reports in arrival order.
    log: Arc<Mutex<Vec<ArenaError>>>,
}

impl RecordingSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything reported so far.
    #[must_use]
    pub fn reports(&self) -> Vec<ArenaError> {
        self.log.lock().clone()
    }

    /// Returns the number of reports so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.log.lock().len()
    }

    /// Returns true if nothing has been reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.log.lock().is_empty()
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, error: &ArenaError) {
        self.log.lock().push(error.clone());
    }
}
