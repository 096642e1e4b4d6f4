use std::sync::atomic::{AtomicUsize, Ordering};

/// Advisory progress cell shared between the parser and an external
/// observer.
///
/// The parser stores the cursor position and total input length as it
/// advances; observers only ever load. The cell has no effect on parsing
/// behavior.
#[derive(Debug, Default)]
pub struct Progress {
    cursor: AtomicUsize,
    total: AtomicUsize,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current byte position of the parser within the input.
    pub fn cursor(&self) -> usize {
        self.cursor.load(Ordering::Relaxed)
    }

    /// Total input length in bytes; 0 before parsing begins.
    pub fn total(&self) -> usize {
        self.total.load(Ordering::Relaxed)
    }

    /// Completed fraction in `[0.0, 1.0]`.
    pub fn fraction(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.cursor() as f64 / total as f64
        }
    }

    pub(crate) fn begin(&self, total: usize) {
        self.total.store(total, Ordering::Relaxed);
        self.cursor.store(0, Ordering::Relaxed);
    }

    pub(crate) fn advance_to(&self, cursor: usize) {
        self.cursor.store(cursor, Ordering::Relaxed);
    }
}
