//! Streaming digest computation.
//!
//! # Example
//!
//! ```no_run
//! use blobstream::{FileStream, digest_stream};
//! use sha2::Sha256;
//!
//! # tokio_test::block_on(async {
//! let stream = FileStream::open("upload.bin").await?;
//! let digest = digest_stream::<Sha256, _>(&stream).await?;
//!
//! // `stream` is still at its start and can be handed to the uploader.
//! println!("sha256 {}", hex::encode(digest));
//! # Ok::<(), blobstream::ChunkError>(())
//! # }).unwrap();
//! ```

use std::future::Future;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::ready;
use futures_io::AsyncRead;
use log::{debug, trace};
use pin_project_lite::pin_project;

use super::source::Duplicate;
use crate::buffer::Buffer;
use crate::config::DigestConfig;
use crate::error::ChunkError;
use crate::hash::HashAccumulator;

pin_project! {
    /// A future that reads an [`AsyncRead`] to its end and resolves with the
    /// digest of everything it read.
    ///
    /// Every block is fed to the accumulator in arrival order; the
    /// accumulator is finalized once, at end of stream. The first I/O error
    /// resolves the future with that error.
    #[must_use = "futures do nothing unless polled"]
    pub struct DigestFuture<R, H> {
        #[pin]
        reader: R,
        hasher: Option<H>,
        buffer: Buffer,
        total: u64,
    }
}

impl<R: AsyncRead, H: HashAccumulator> DigestFuture<R, H> {
    fn new(reader: R, config: DigestConfig) -> Self {
        Self {
            reader,
            hasher: Some(H::new()),
            buffer: Buffer::take(config.buffer_size()),
            total: 0,
        }
    }
}

impl<R: AsyncRead, H: HashAccumulator> Future for DigestFuture<R, H> {
    type Output = Result<H::Output, ChunkError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();

        loop {
            let n = match ready!(this.reader.as_mut().poll_read(cx, this.buffer.as_mut_slice())) {
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    debug!("digest read failed after {} bytes: {}", this.total, e);
                    return Poll::Ready(Err(ChunkError::Io(e)));
                }
            };

            if n == 0 {
                debug!("digest complete: {} bytes", this.total);
                let hasher = this
                    .hasher
                    .take()
                    .expect("DigestFuture polled after completion");
                return Poll::Ready(Ok(hasher.finalize()));
            }

            if let Some(hasher) = this.hasher.as_mut() {
                hasher.update(this.buffer.filled(n));
            }
            *this.total += n as u64;
            trace!("digested block of {} bytes ({} total)", n, this.total);
        }
    }
}

/// Hashes everything `reader` yields until end of stream.
///
/// This consumes `reader`. Use [`digest_stream`] to hash a stream that
/// someone else still needs.
///
/// # Errors
///
/// Returns [`ChunkError::InvalidConfig`] right away if `config` is invalid.
///
/// # Example
///
/// ```
/// use blobstream::{DigestConfig, digest_reader};
/// use sha2::Sha256;
///
/// # tokio_test::block_on(async {
/// let digest = digest_reader::<Sha256, _>(&b"abc"[..], DigestConfig::default())?.await?;
/// assert_eq!(
///     hex::encode(digest),
///     "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
/// );
/// # Ok::<(), blobstream::ChunkError>(())
/// # }).unwrap();
/// ```
pub fn digest_reader<H, R>(
    reader: R,
    config: DigestConfig,
) -> Result<DigestFuture<R, H>, ChunkError>
where
    H: HashAccumulator,
    R: AsyncRead,
{
    config.validate()?;
    Ok(DigestFuture::new(reader, config))
}

/// Computes the digest of `source` without touching `source` itself.
///
/// A duplicate of the stream is opened and read to its end; `source` is
/// never polled, read, or closed. A stream that cannot be duplicated is
/// rejected with [`ChunkError::UnsupportedStream`] before any byte is read.
///
/// Uses the default [`DigestConfig`].
pub async fn digest_stream<H, S>(source: &S) -> Result<H::Output, ChunkError>
where
    H: HashAccumulator,
    S: Duplicate + ?Sized,
{
    digest_stream_with::<H, S>(source, DigestConfig::default()).await
}

/// Like [`digest_stream`], with an explicit read configuration.
pub async fn digest_stream_with<H, S>(
    source: &S,
    config: DigestConfig,
) -> Result<H::Output, ChunkError>
where
    H: HashAccumulator,
    S: Duplicate + ?Sized,
{
    config.validate()?;

    let duplicate = match source.duplicate() {
        Ok(duplicate) => duplicate,
        Err(e) => {
            debug!("cannot digest stream: {}", e);
            return Err(e);
        }
    };

    debug!(
        "digesting duplicate stream with {} byte reads",
        config.buffer_size()
    );
    DigestFuture::<_, H>::new(duplicate, config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::async_stream::{MemoryStream, OpaqueStream};
    use sha2::{Digest, Sha256};

    #[test]
    fn test_digest_reader_empty() {
        let future = digest_reader::<Sha256, _>(&b""[..], DigestConfig::default()).unwrap();
        let digest = tokio_test::block_on(future).unwrap();
        assert_eq!(digest, Sha256::digest(b""));
    }

    #[test]
    fn test_small_buffer_matches_one_shot() {
        let data: Vec<u8> = (0..10_000).map(|i| (i * 7 + 13) as u8).collect();
        let config = DigestConfig::new(3).unwrap();
        let digest =
            tokio_test::block_on(digest_reader::<Sha256, _>(&data[..], config).unwrap()).unwrap();
        assert_eq!(digest, Sha256::digest(&data));
    }

    #[test]
    fn test_zero_buffer_rejected() {
        let config = DigestConfig::default().with_buffer_size(0);
        assert!(digest_reader::<Sha256, _>(&b"abc"[..], config).is_err());

        let stream = MemoryStream::new(&b"abc"[..]);
        let result = tokio_test::block_on(digest_stream_with::<Sha256, _>(&stream, config));
        assert!(matches!(result, Err(ChunkError::InvalidConfig { .. })));
    }

    #[test]
    fn test_memory_stream_untouched() {
        let stream = MemoryStream::new(&b"in memory payload"[..]);
        let digest = tokio_test::block_on(digest_stream::<Sha256, _>(&stream)).unwrap();
        assert_eq!(digest, Sha256::digest(b"in memory payload"));
        assert_eq!(stream.position(), 0);
    }

    #[test]
    fn test_opaque_stream_rejected() {
        let stream = OpaqueStream::new(&b"abc"[..]);
        let result = tokio_test::block_on(digest_stream::<Sha256, _>(&stream));
        assert!(matches!(result, Err(ChunkError::UnsupportedStream { .. })));
    }

    #[test]
    #[cfg(feature = "hash-blake3")]
    fn test_blake3_accumulator() {
        let stream = MemoryStream::new(&b"hello world"[..]);
        let digest =
            tokio_test::block_on(digest_stream::<crate::hash::Blake3Hasher, _>(&stream)).unwrap();
        let expected: [u8; 32] = blake3::hash(b"hello world").into();
        assert_eq!(digest, expected);
    }
}
