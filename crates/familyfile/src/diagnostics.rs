//! Collector for non-fatal decode problems.
//!
//! Decoders never abort the whole file for one bad record. They report the problem
//! here and carry on with whatever partial data they managed to recover.

use std::error::Error;
use std::sync::{Mutex, MutexGuard};

use log::debug;

use crate::error::Diagnostic;

/// Thread-safe, capacity-bounded sink for [`Diagnostic`]s.
///
/// A capacity of zero means unlimited.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Mutex<Vec<Diagnostic>>,
    capacity: usize,
}

impl Diagnostics {
    /// Creates a collector that stops accepting entries after `capacity`.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            capacity,
        }
    }

    /// Creates a collector with no capacity limit.
    pub fn unlimited() -> Self {
        Self::new(0)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        // A panic while holding the lock cannot leave the Vec half-written.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Records a problem. Returns `false` when the collector is already full.
    pub fn add(
        &self,
        file: &str,
        offset: Option<usize>,
        message: impl Into<String>,
        cause: Option<&dyn Error>,
    ) -> bool {
        let diagnostic = Diagnostic {
            file: file.to_string(),
            offset,
            message: message.into(),
            cause: cause.map(|e| e.to_string()),
        };

        let mut entries = self.lock();
        if self.capacity > 0 && entries.len() >= self.capacity {
            return false;
        }
        debug!("event=diagnostic module=diagnostics detail=\"{diagnostic}\"");
        entries.push(diagnostic);
        true
    }

    /// Returns true once the collector has reached its capacity.
    pub fn is_full(&self) -> bool {
        self.capacity > 0 && self.lock().len() >= self.capacity
    }

    /// Number of collected entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing has been collected.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns a snapshot copy of everything collected so far.
    pub fn drain(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    /// Renders every entry as a warning string.
    pub fn warnings(&self) -> Vec<String> {
        self.lock().iter().map(ToString::to_string).collect()
    }
}
