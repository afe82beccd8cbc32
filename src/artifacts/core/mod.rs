//! Output plumbing shared by the commands

use minus::Pager;
use std::io::{self, Write};

/// `Write` adapter feeding the `minus` pager
///
/// Bytes are forwarded as text. A multi-byte character split across two writes
/// is held back until its remaining bytes arrive.
pub struct PagerWriter {
    pager: Pager,
    pending: Vec<u8>,
}

impl PagerWriter {
    pub fn new(pager: Pager) -> Self {
        PagerWriter {
            pager,
            pending: Vec::new(),
        }
    }
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);

        let valid = match std::str::from_utf8(&self.pending) {
            Ok(text) => text.len(),
            Err(e) if e.error_len().is_none() => e.valid_up_to(),
            Err(e) => return Err(io::Error::new(io::ErrorKind::InvalidData, e)),
        };

        let text = String::from_utf8_lossy(&self.pending[..valid]).into_owned();
        self.pager.push_str(text).map_err(io::Error::other)?;
        self.pending.drain(..valid);

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
