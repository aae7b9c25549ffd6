//! Positional byte sources

use alloc::vec::Vec;

use crate::read::ReadError;

/// Something that can copy bytes from an absolute position.
///
/// A short count means the source ran out of data (or failed); the readers
/// in this crate treat any short count as [`ReadError::Truncated`].
pub trait ByteSource {
    /// Copy up to `dest.len()` bytes starting at `offset` into `dest`,
    /// returning the number of bytes copied.
    fn read_at(&mut self, offset: u64, dest: &mut [u8]) -> usize;
}

impl ByteSource for [u8] {
    fn read_at(&mut self, offset: u64, dest: &mut [u8]) -> usize {
        copy_from_slice(self, offset, dest)
    }
}

impl ByteSource for &[u8] {
    fn read_at(&mut self, offset: u64, dest: &mut [u8]) -> usize {
        copy_from_slice(self, offset, dest)
    }
}

impl ByteSource for Vec<u8> {
    fn read_at(&mut self, offset: u64, dest: &mut [u8]) -> usize {
        copy_from_slice(self, offset, dest)
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read_at(&mut self, offset: u64, dest: &mut [u8]) -> usize {
        (**self).read_at(offset, dest)
    }
}

fn copy_from_slice(src: &[u8], offset: u64, dest: &mut [u8]) -> usize {
    let Some(src) = usize::try_from(offset).ok().and_then(|off| src.get(off..)) else {
        return 0;
    };
    let len = src.len().min(dest.len());
    dest[..len].copy_from_slice(&src[..len]);
    len
}

/// Largest single read. The buffer grows only as data arrives.
const READ_CHUNK: usize = 64 * 1024;

/// Read exactly `len` bytes starting at `offset`.
pub(crate) fn read_exact_at<S: ByteSource + ?Sized>(
    source: &mut S,
    offset: u64,
    len: usize,
) -> Result<Vec<u8>, ReadError> {
    let mut buf = Vec::new();
    while buf.len() < len {
        let start = buf.len();
        let chunk = (len - start).min(READ_CHUNK);
        buf.resize(start + chunk, 0);
        let got = source
            .read_at(offset.saturating_add(start as u64), &mut buf[start..])
            .min(chunk);
        buf.truncate(start + got);
        if got < chunk {
            return Err(ReadError::Truncated {
                expected: len,
                actual: buf.len(),
            });
        }
    }
    Ok(buf)
}

#[cfg(feature = "std")]
pub use io::IoSource;

#[cfg(feature = "std")]
mod io {
    use std::io::{ErrorKind, Read, Seek, SeekFrom};

    use super::ByteSource;

    /// A [`ByteSource`] backed by anything that can seek and read, such as a
    /// [`std::fs::File`].
    ///
    /// Each read seeks to the requested offset and reads until the
    /// destination is full or the stream reaches its end. Interrupted reads
    /// are retried; any other I/O error ends the read early.
    #[derive(Debug)]
    pub struct IoSource<R> {
        inner: R,
    }

    impl<R: Read + Seek> IoSource<R> {
        pub fn new(inner: R) -> Self {
            IoSource { inner }
        }

        pub fn into_inner(self) -> R {
            self.inner
        }
    }

    impl<R: Read + Seek> ByteSource for IoSource<R> {
        fn read_at(&mut self, offset: u64, dest: &mut [u8]) -> usize {
            if let Err(e) = self.inner.seek(SeekFrom::Start(offset)) {
                log::warn!("seek to {offset} failed: {e}");
                return 0;
            }
            let mut total = 0;
            while total < dest.len() {
                match self.inner.read(&mut dest[total..]) {
                    Ok(0) => break,
                    Ok(n) => total += n,
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => {
                        log::warn!("read of {} bytes at {offset} failed: {e}", dest.len());
                        break;
                    }
                }
            }
            total
        }
    }
}
