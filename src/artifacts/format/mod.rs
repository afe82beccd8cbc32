//! Content classification and canonicalization
//!
//! - `file_kind`: suffix-based classification into structured text or opaque
//! - `charset`: charset detection and transcoding to UTF-8
//! - `xml`: canonical XML re-serializer
//! - `normalizer`: per-file entry point combining the above

pub mod charset;
pub mod file_kind;
pub mod normalizer;
pub mod xml;
