//! Diff engine: edit scripts between two strings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::myers::{self, EditOp, Region};
use crate::core::{tokenize, EditScript, Granularity, SegmentTag};
use crate::metrics::Timer;

/// Default cap on edit-graph cells, roughly 32k by 32k tokens of changed middle.
///
/// The search itself runs in linear space; the cap bounds its running time.
pub const DEFAULT_MAX_CELLS: usize = 1 << 30;

/// Errors from the diff engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiffError {
    /// The edit graph would exceed the configured cap.
    #[error("input too large: alignment needs {cells} cells (limit {limit})")]
    InputTooLarge {
        /// Cells the alignment would need.
        cells: usize,
        /// Configured cap.
        limit: usize,
    },
}

/// What to do when an input pair exceeds `max_cells`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OversizePolicy {
    /// Align by lines, refining each changed block that fits.
    #[default]
    Degrade,
    /// Return [`DiffError::InputTooLarge`].
    Fail,
}

/// Engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffOptions {
    /// Token unit to align.
    pub granularity: Granularity,
    /// Largest edit graph to search, in `(n + 1) * (m + 1)` cells.
    pub max_cells: usize,
    /// Behaviour past `max_cells`.
    pub oversize: OversizePolicy,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            granularity: Granularity::Char,
            max_cells: DEFAULT_MAX_CELLS,
            oversize: OversizePolicy::Degrade,
        }
    }
}

impl DiffOptions {
    /// Set the granularity.
    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Set the edit-graph cap.
    pub fn with_max_cells(mut self, max_cells: usize) -> Self {
        self.max_cells = max_cells;
        self
    }

    /// Set the oversize policy.
    pub fn with_oversize(mut self, oversize: OversizePolicy) -> Self {
        self.oversize = oversize;
        self
    }
}

/// Compute the character-level edit script from `a` to `b`.
///
/// Never fails: inputs past [`DEFAULT_MAX_CELLS`] fall back to a line-level
/// alignment with per-block refinement.
///
/// ```
/// use textdiff::core::{compute_diff, SegmentTag};
///
/// let script = compute_diff("kitten", "sitting");
/// assert_eq!(script.old_text(), "kitten");
/// assert_eq!(script.new_text(), "sitting");
/// assert_eq!(script.segments()[0].tag, SegmentTag::Delete);
/// ```
pub fn compute_diff(a: &str, b: &str) -> EditScript {
    Differ::default().diff_degrading(a, b)
}

/// Compute an edit script with explicit options.
pub fn try_compute_diff(a: &str, b: &str, options: &DiffOptions) -> Result<EditScript, DiffError> {
    Differ::new(*options).diff(a, b)
}

/// Reusable diff engine configured by [`DiffOptions`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Differ {
    options: DiffOptions,
}

impl Differ {
    /// Create an engine.
    pub fn new(options: DiffOptions) -> Self {
        Self { options }
    }

    /// Current options.
    pub fn options(&self) -> &DiffOptions {
        &self.options
    }

    /// Compute the edit script from `a` to `b`, honouring the oversize policy.
    pub fn diff(&self, a: &str, b: &str) -> Result<EditScript, DiffError> {
        let _timer = Timer::start("diff");
        let (old, new, swapped) = canonical_order(a, b);
        let script = match self.align_within_cap(old, new, self.options.granularity) {
            Ok(script) => script,
            Err(cells) => match self.options.oversize {
                OversizePolicy::Fail => {
                    return Err(DiffError::InputTooLarge {
                        cells,
                        limit: self.options.max_cells,
                    });
                }
                OversizePolicy::Degrade => self.degrade(old, new, cells),
            },
        };
        Ok(restore_order(script, swapped))
    }

    /// Compute the edit script, degrading past the cap regardless of policy.
    pub fn diff_degrading(&self, a: &str, b: &str) -> EditScript {
        let _timer = Timer::start("diff");
        let (old, new, swapped) = canonical_order(a, b);
        let script = self
            .align_within_cap(old, new, self.options.granularity)
            .unwrap_or_else(|cells| self.degrade(old, new, cells));
        restore_order(script, swapped)
    }

    /// Minimal script at `granularity`, or the cell count that exceeded the cap.
    fn align_within_cap(
        &self,
        a: &str,
        b: &str,
        granularity: Granularity,
    ) -> Result<EditScript, usize> {
        if a == b {
            let mut script = EditScript::new();
            script.push(SegmentTag::Equal, a);
            return Ok(script);
        }

        let old = tokenize(a, granularity);
        let new = tokenize(b, granularity);
        let cells = myers::edit_graph_cells(&old, &new);
        if cells > self.options.max_cells {
            return Err(cells);
        }
        Ok(script_from_ops(&old, &new, &myers::align(&old, &new)))
    }

    fn degrade(&self, a: &str, b: &str, cells: usize) -> EditScript {
        let _timer = Timer::start("diff/degraded");
        log::debug!(
            "{} alignment needs {} cells (limit {}), falling back to lines",
            self.options.granularity,
            cells,
            self.options.max_cells
        );

        let old = tokenize(a, Granularity::Line);
        let new = tokenize(b, Granularity::Line);
        let ops = if self.options.granularity != Granularity::Line
            && myers::edit_graph_cells(&old, &new) <= self.options.max_cells
        {
            myers::align(&old, &new)
        } else {
            log::debug!("line alignment also over limit, replacing changed middle");
            myers::replace_middle(&old, &new)
        };

        let mut script = EditScript::new();
        for region in myers::regions(&ops) {
            match region {
                Region::Equal(range) => {
                    for token in &old[range] {
                        script.push(SegmentTag::Equal, token);
                    }
                }
                Region::Change { old: o, new: n } => {
                    let (removed, added) = (old[o].concat(), new[n].concat());
                    script.extend(self.refine_block(&removed, &added));
                }
            }
        }
        script
    }

    /// Align one changed line block at the configured granularity if it fits.
    fn refine_block(&self, removed: &str, added: &str) -> EditScript {
        let refinable = self.options.granularity != Granularity::Line
            && !removed.is_empty()
            && !added.is_empty();
        if refinable {
            if let Ok(script) = self.align_within_cap(removed, added, self.options.granularity) {
                return script;
            }
        }
        let mut script = EditScript::new();
        script.push(SegmentTag::Delete, removed);
        script.push(SegmentTag::Insert, added);
        script
    }
}

/// Inputs ordered so the lexicographically smaller one is aligned as `old`.
///
/// Aligning `(b, a)` then mirrors aligning `(a, b)` exactly, whatever ties
/// the search breaks along the way.
fn canonical_order<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str, bool) {
    if b < a {
        (b, a, true)
    } else {
        (a, b, false)
    }
}

fn restore_order(script: EditScript, swapped: bool) -> EditScript {
    if swapped {
        script.mirrored()
    } else {
        script
    }
}

/// Build a script from per-token ops, one Delete then one Insert per change region.
fn script_from_ops(old: &[&str], new: &[&str], ops: &[EditOp]) -> EditScript {
    let mut script = EditScript::new();
    for region in myers::regions(ops) {
        match region {
            Region::Equal(range) => {
                for token in &old[range] {
                    script.push(SegmentTag::Equal, token);
                }
            }
            Region::Change { old: o, new: n } => {
                for token in &old[o] {
                    script.push(SegmentTag::Delete, token);
                }
                for token in &new[n] {
                    script.push(SegmentTag::Insert, token);
                }
            }
        }
    }
    script
}
