//! Domain models for the Scribe ROI calculator.

mod practice;
mod roi;

pub use practice::*;
pub use roi::*;
