//! Plumbing commands
//!
//! Low-level building blocks exposed for scripting and debugging:
//!
//! - `fmt`: print the canonical form of a single file
//! - `cmp`: byte-exact equality of two files, reported through the exit status

pub mod cmp;
pub mod fmt;
