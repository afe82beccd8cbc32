//! Charset detection and transcoding for markup documents
//!
//! The tokenizer works on UTF-8 only. A byte-order mark wins over the
//! `encoding="..."` pseudo-attribute of the XML declaration; with neither, the
//! document is taken to be UTF-8.

use crate::errors::CanonicalizeError;
use encoding_rs::{Encoding, UTF_8};
use regex::{Captures, Regex};
use std::borrow::Cow;

const DECLARATION_SCAN_LIMIT: usize = 1024;

const ENCODING_DECL_REGEX: &str =
    r#"^\s*<\?xml\s[^>]*?\bencoding\s*=\s*["']([A-Za-z][A-Za-z0-9._:\-]*)["']"#;

const DECLARATION_LABEL_REGEX: &str =
    r#"(\bencoding\s*=\s*)(["'])([A-Za-z][A-Za-z0-9._:\-]*)["']"#;

/// Point the `encoding` pseudo-attribute of a transcoded declaration at UTF-8
///
/// Labels that already name UTF-8 are left as written.
pub fn relabel_as_utf8(declaration: &str) -> Cow<'_, str> {
    let Ok(regex) = Regex::new(DECLARATION_LABEL_REGEX) else {
        return Cow::Borrowed(declaration);
    };

    regex.replace(declaration, |captures: &Captures| {
        match Encoding::for_label(captures[3].as_bytes()) {
            Some(encoding) if encoding == UTF_8 => captures[0].to_string(),
            _ => format!("{}{quote}UTF-8{quote}", &captures[1], quote = &captures[2]),
        }
    })
}

/// Label from the XML declaration, if the document starts with one
pub fn declared_charset(bytes: &[u8]) -> Option<String> {
    let head = &bytes[..bytes.len().min(DECLARATION_SCAN_LIMIT)];
    let captures = regex::bytes::Regex::new(ENCODING_DECL_REGEX)
        .ok()?
        .captures(head)?;

    captures
        .get(1)
        .map(|label| String::from_utf8_lossy(label.as_bytes()).into_owned())
}

pub fn detect_encoding(bytes: &[u8]) -> Result<(&'static Encoding, usize), CanonicalizeError> {
    if let Some((encoding, bom_length)) = Encoding::for_bom(bytes) {
        return Ok((encoding, bom_length));
    }

    match declared_charset(bytes) {
        Some(label) => Encoding::for_label(label.as_bytes())
            .map(|encoding| (encoding, 0))
            .ok_or(CanonicalizeError::UnknownCharset(label)),
        None => Ok((UTF_8, 0)),
    }
}

/// Transcode a whole document to UTF-8, rejecting malformed sequences
pub fn decode_document(bytes: &[u8]) -> Result<String, CanonicalizeError> {
    let (encoding, bom_length) = detect_encoding(bytes)?;
    let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_length..]);

    if had_errors {
        return Err(CanonicalizeError::Undecodable(encoding.name()));
    }

    Ok(text.into_owned())
}
