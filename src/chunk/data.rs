//! The Chunk type - one decoded slice of a blob.

use bytes::Bytes;
use std::fmt;

/// A decoded slice of a blob with its position in the source.
///
/// # Example
///
/// ```
/// use blobstream::Chunk;
/// use bytes::Bytes;
///
/// let chunk = Chunk::new(Bytes::from_static(b"hello world"), 1024);
///
/// assert_eq!(chunk.len(), 11);
/// assert_eq!(chunk.range(), 1024..1035);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// The decoded chunk bytes.
    pub data: Bytes,

    /// Offset of the first byte in the source blob.
    pub offset: u64,
}

impl Chunk {
    /// Creates a new chunk starting at `offset`.
    pub fn new(data: impl Into<Bytes>, offset: u64) -> Self {
        Self {
            data: data.into(),
            offset,
        }
    }

    /// Returns the length of the chunk data.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the chunk has no data.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns a reference to the chunk data.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Returns the start offset.
    pub fn start(&self) -> u64 {
        self.offset
    }

    /// Returns the end offset (exclusive).
    pub fn end(&self) -> u64 {
        self.offset + self.data.len() as u64
    }

    /// Returns the chunk as a range.
    pub fn range(&self) -> std::ops::Range<u64> {
        self.start()..self.end()
    }

    /// Consumes the chunk and returns the underlying data.
    pub fn into_data(self) -> Bytes {
        self.data
    }
}

impl AsRef<[u8]> for Chunk {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Chunk({} bytes @ {})", self.len(), self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let chunk = Chunk::new(&b"hello"[..], 0);
        assert_eq!(chunk.len(), 5);
        assert!(!chunk.is_empty());
    }

    #[test]
    fn test_empty() {
        let chunk = Chunk::new(&b""[..], 0);
        assert!(chunk.is_empty());
        assert_eq!(chunk.range(), 0..0);
    }

    #[test]
    fn test_end() {
        let chunk = Chunk::new(&b"hello"[..], 100);
        assert_eq!(chunk.start(), 100);
        assert_eq!(chunk.end(), 105);
    }

    #[test]
    fn test_display() {
        let chunk = Chunk::new(&b"hello"[..], 100);
        let s = format!("{}", chunk);
        assert!(s.contains("5 bytes"));
        assert!(s.contains("@ 100"));
    }

    #[test]
    fn test_into_data() {
        let chunk = Chunk::new(Bytes::from_static(b"abc"), 3);
        assert_eq!(chunk.into_data(), Bytes::from_static(b"abc"));
    }
}
