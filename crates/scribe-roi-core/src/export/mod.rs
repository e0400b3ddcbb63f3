//! Report formatting and export.

mod format;
mod summary;

pub use format::*;
pub use summary::*;
