//! Readable streams and the duplication capability.

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_io::AsyncRead;
use futures_util::io::{Cursor, Empty};

#[cfg(feature = "tokio")]
use std::fmt;
#[cfg(feature = "tokio")]
use std::path::{Path, PathBuf};
#[cfg(feature = "tokio")]
use tokio_util::compat::{Compat, TokioAsyncReadCompatExt};

use crate::error::ChunkError;

/// A stream whose backing resource can be reopened as an independent reader.
///
/// The duplicate starts at the beginning of the resource and shares no read
/// position with `self`; reading it must leave `self` untouched.
pub trait Duplicate {
    /// The independent reader type.
    type Reader: AsyncRead + Unpin;

    /// Opens a fresh reader over the same bytes.
    ///
    /// Streams without a reopenable resource fail with
    /// [`ChunkError::UnsupportedStream`].
    fn duplicate(&self) -> Result<Self::Reader, ChunkError>;
}

impl<T: Duplicate + ?Sized> Duplicate for &T {
    type Reader = T::Reader;

    fn duplicate(&self) -> Result<Self::Reader, ChunkError> {
        (**self).duplicate()
    }
}

/// A file-backed readable stream that remembers its path.
///
/// Reads go through [`tokio::fs::File`], so a tokio runtime must be running
/// while the stream (or a duplicate) is polled.
///
/// # Example
///
/// ```no_run
/// use blobstream::{Duplicate, FileStream};
///
/// # tokio_test::block_on(async {
/// let stream = FileStream::open("data.bin").await?;
/// let independent = stream.duplicate()?;
/// assert_eq!(stream.path().to_str(), Some("data.bin"));
/// # Ok::<(), blobstream::ChunkError>(())
/// # }).unwrap();
/// ```
#[cfg(feature = "tokio")]
pub struct FileStream {
    path: PathBuf,
    inner: Compat<tokio::fs::File>,
}

#[cfg(feature = "tokio")]
impl FileStream {
    /// Opens `path` for reading.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, ChunkError> {
        let path = path.as_ref().to_path_buf();
        let file = tokio::fs::File::open(&path).await?;
        Ok(Self {
            path,
            inner: file.compat(),
        })
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Consumes the stream and returns the open file.
    pub fn into_inner(self) -> tokio::fs::File {
        self.inner.into_inner()
    }
}

#[cfg(feature = "tokio")]
impl fmt::Debug for FileStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileStream")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "tokio")]
impl AsyncRead for FileStream {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut [u8],
    ) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.inner).poll_read(cx, buf)
    }
}

#[cfg(feature = "tokio")]
impl Duplicate for FileStream {
    type Reader = Compat<tokio::fs::File>;

    /// Reopens the backing path. Only the open itself is synchronous; all
    /// reads on the duplicate are asynchronous.
    fn duplicate(&self) -> Result<Self::Reader, ChunkError> {
        let file = std::fs::File::open(&self.path)?;
        Ok(tokio::fs::File::from_std(file).compat())
    }
}

/// An in-memory readable stream over shared [`Bytes`].
///
/// Duplicates share the same allocation and keep their own position.
#[derive(Debug, Clone)]
pub struct MemoryStream {
    inner: Cursor<Bytes>,
}

impl MemoryStream {
    /// Creates a stream positioned at the start of `data`.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            inner: Cursor::new(data.into()),
        }
    }

    /// Returns the full contents, regardless of the read position.
    pub fn bytes(&self) -> &Bytes {
        self.inner.get_ref()
    }

    /// Returns the current read position.
    pub fn position(&self) -> u64 {
        self.inner.position()
    }
}

impl AsyncRead for MemoryStream {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut [u8],
    ) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.inner).poll_read(cx, buf)
    }
}

impl Duplicate for MemoryStream {
    type Reader = Cursor<Bytes>;

    fn duplicate(&self) -> Result<Self::Reader, ChunkError> {
        Ok(Cursor::new(self.bytes().clone()))
    }
}

/// A readable stream with no reopenable backing resource (a socket, a pipe,
/// a decoder, ...).
///
/// It reads like the wrapped reader, but cannot be hashed without draining
/// it, so [`Duplicate::duplicate`] always fails.
#[derive(Debug)]
pub struct OpaqueStream<R> {
    inner: R,
}

impl<R> OpaqueStream<R> {
    /// Wraps `inner`.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Consumes the wrapper and returns the reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: AsyncRead + Unpin> AsyncRead for OpaqueStream<R> {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut [u8],
    ) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.inner).poll_read(cx, buf)
    }
}

impl<R> Duplicate for OpaqueStream<R> {
    type Reader = Empty;

    fn duplicate(&self) -> Result<Self::Reader, ChunkError> {
        Err(ChunkError::UnsupportedStream {
            message: "stream has no reopenable backing resource; \
                      only file-backed or in-memory streams can be hashed without draining them",
        })
    }
}
