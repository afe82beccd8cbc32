//! Byte-exact comparison of opaque content
//!
//! - `stream_equality`: chunked equality check over two readers

pub mod stream_equality;
