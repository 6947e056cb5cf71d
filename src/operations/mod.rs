//! Operations module
//!
//! Coordinates a lease retrieval run: argument validation, strategy selection and timing

pub mod retrieve;

pub use retrieve::*;
