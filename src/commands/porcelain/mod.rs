//! Porcelain commands
//!
//! - `diff`: compare two trees, two archives or two files and print the report

pub mod diff;
