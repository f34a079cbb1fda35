//! Core diff engine (no terminal or I/O dependencies).

mod cache;
mod diff;
mod myers;
mod script;
mod token;

pub use cache::*;
pub use diff::*;
pub use script::*;
pub use token::*;
