//! Chunked byte-stream equality
//!
//! Two streams are equal when they yield the same bytes and reach end-of-stream
//! at the same offset. Neither stream is ever held in memory as a whole: A is
//! read one chunk at a time and B is asked for exactly as many bytes as A just
//! produced.
//!
//! ## Verdicts
//!
//! - B runs dry while matching a chunk of A: A had more data, unequal
//! - A hits end-of-stream but B still yields bytes: B had more data, unequal
//! - any I/O error: no verdict, the error is returned

use crate::errors::{DiffError, DiffResult};
use derive_new::new;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

pub const DEFAULT_CHUNK_SIZE: usize = 32 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct StreamComparator {
    chunk_size: usize,
}

impl Default for StreamComparator {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl StreamComparator {
    pub fn chunk_size(&self) -> usize {
        self.chunk_size.max(1)
    }

    pub fn equal<A: Read, B: Read>(&self, mut a: A, mut b: B) -> io::Result<bool> {
        let size = self.chunk_size();
        let mut chunk_a = vec![0u8; size];
        let mut chunk_b = vec![0u8; size];

        loop {
            let read_a = read_some(&mut a, &mut chunk_a)?;

            if read_a == 0 {
                // one more bounded read: anything but end-of-stream means B is longer
                return Ok(read_some(&mut b, &mut chunk_b)? == 0);
            }

            if !fill_exact(&mut b, &mut chunk_b[..read_a])? {
                return Ok(false);
            }

            if chunk_a[..read_a] != chunk_b[..read_a] {
                return Ok(false);
            }
        }
    }

    /// Compare two files on disk; both handles are closed before returning
    pub fn equal_files(&self, path_a: &Path, path_b: &Path) -> DiffResult<bool> {
        let file_a = File::open(path_a).map_err(|source| DiffError::ContentRead {
            path: path_a.to_path_buf(),
            source,
        })?;
        let file_b = File::open(path_b).map_err(|source| DiffError::ContentRead {
            path: path_b.to_path_buf(),
            source,
        })?;

        self.equal(file_a, file_b)
            .map_err(|source| DiffError::StreamMismatch {
                path_a: path_a.to_path_buf(),
                path_b: path_b.to_path_buf(),
                source,
            })
    }
}

fn read_some<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    loop {
        match reader.read(buf) {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            result => return result,
        }
    }
}

// Ok(false) when the stream ends before `buf` is full
fn fill_exact<R: Read>(reader: &mut R, mut buf: &mut [u8]) -> io::Result<bool> {
    while !buf.is_empty() {
        match read_some(reader, buf)? {
            0 => return Ok(false),
            n => buf = &mut buf[n..],
        }
    }

    Ok(true)
}
