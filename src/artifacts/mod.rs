//! Building blocks of a comparison
//!
//! - `archive`: zip extraction into a temporary working directory
//! - `compare`: byte-exact stream equality
//! - `core`: output plumbing (pager adapter)
//! - `diff`: tree reconciliation, rendering and report assembly
//! - `format`: file classification and canonicalization

pub mod archive;
pub mod compare;
pub mod core;
pub mod diff;
pub mod format;
