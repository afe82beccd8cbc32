//! Comparison areas
//!
//! - `tree`: one side of a comparison, a directory of extracted files
//! - `comparison`: shared state of the commands (output, normalizer, options)

pub mod comparison;
pub mod tree;
