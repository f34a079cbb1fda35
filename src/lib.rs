//! textdiff - Character-level text diffing.
//!
//! Computes the minimal edit script between two strings as an ordered list
//! of `Equal`, `Insert` and `Delete` segments, and renders it for terminals,
//! plain text or JSON.
//!
//! # Quick Start
//!
//! ```rust
//! use textdiff::prelude::*;
//!
//! let script = compute_diff("kitten", "sitting");
//! assert_eq!(script.old_text(), "kitten");
//! assert_eq!(script.new_text(), "sitting");
//! ```

#![deny(missing_docs)]

pub mod cli;
pub mod config;
pub mod core;
pub mod metrics;
pub mod prelude;
pub mod render;
