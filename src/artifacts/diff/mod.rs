//! Tree reconciliation and diff assembly
//!
//! - `reconcile`: splits two trees into added, removed and existing paths
//! - `classification`: per-path outcome and the `A`/`D`/`M` report filter
//! - `diff_entry`: display labels and the per-file `diff <a> <b>` entry
//! - `renderer`: unified diff rendering of canonical text
//! - `assembler`: turns a reconciliation into the combined report

pub mod assembler;
pub mod classification;
pub mod diff_entry;
pub mod reconcile;
pub mod renderer;
