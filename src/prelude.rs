//! Common re-exports for convenient importing.
//!
//! # Example
//!
//! ```rust,ignore
//! use textdiff::prelude::*;
//! ```

pub use crate::core::{
    compute_diff, try_compute_diff, DiffError, DiffOptions, Differ, EditScript, Granularity,
    MemoDiffer, OversizePolicy, Segment, SegmentTag,
};
