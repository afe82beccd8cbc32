//! Command implementations
//!
//! Commands are methods on [`Comparison`](crate::areas::comparison::Comparison),
//! split the way git splits them:
//!
//! - `plumbing`: single-file building blocks (`fmt`, `cmp`)
//! - `porcelain`: the user-facing `diff`

pub mod plumbing;
pub mod porcelain;
