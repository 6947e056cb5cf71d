//! Output module
//!
//! Renders retrieved leases and the run summary for stdout

pub mod render;

pub use render::*;
