//! Single-slot memo for callers that re-diff on every keystroke.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::core::{DiffError, DiffOptions, Differ, EditScript};

#[derive(Debug)]
struct Entry {
    old: String,
    new: String,
    script: Arc<EditScript>,
}

/// A [`Differ`] that remembers the last input pair and its script.
///
/// Safe to share between threads. The lock is only held to read or replace
/// the memo, never while diffing.
#[derive(Debug, Default)]
pub struct MemoDiffer {
    differ: Differ,
    last: Mutex<Option<Entry>>,
}

impl MemoDiffer {
    /// Create a memoizing engine.
    pub fn new(options: DiffOptions) -> Self {
        Self {
            differ: Differ::new(options),
            last: Mutex::new(None),
        }
    }

    /// Compute (or reuse) the script from `a` to `b`.
    pub fn diff(&self, a: &str, b: &str) -> Result<Arc<EditScript>, DiffError> {
        if let Some(entry) = self.last.lock().as_ref() {
            if entry.old == a && entry.new == b {
                log::debug!("diff memo hit ({} + {} bytes)", a.len(), b.len());
                return Ok(Arc::clone(&entry.script));
            }
        }

        let script = Arc::new(self.differ.diff(a, b)?);
        *self.last.lock() = Some(Entry {
            old: a.to_string(),
            new: b.to_string(),
            script: Arc::clone(&script),
        });
        Ok(script)
    }

    /// Drop the memo.
    pub fn clear(&self) {
        *self.last.lock() = None;
    }

    /// Underlying engine.
    pub fn differ(&self) -> &Differ {
        &self.differ
    }
}
