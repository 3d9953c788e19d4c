//! Sized, sliceable binary sources.

use bytes::Bytes;

/// A binary source with a known total size that can be cut into sub-ranges.
///
/// Slicing must not copy or mutate the source; it returns a new blob
/// covering `start..end` of this one.
pub trait Blob: Sized {
    /// Total length in bytes.
    fn size(&self) -> u64;

    /// Returns the half-open byte range `start..end` as a new blob.
    ///
    /// Callers guarantee `start <= end <= self.size()`.
    fn slice(&self, start: u64, end: u64) -> Self;
}

impl Blob for Bytes {
    fn size(&self) -> u64 {
        self.len() as u64
    }

    fn slice(&self, start: u64, end: u64) -> Self {
        Bytes::slice(self, start as usize..end as usize)
    }
}

impl<'a> Blob for &'a [u8] {
    fn size(&self) -> u64 {
        self.len() as u64
    }

    fn slice(&self, start: u64, end: u64) -> Self {
        let bytes: &'a [u8] = *self;
        &bytes[start as usize..end as usize]
    }
}
