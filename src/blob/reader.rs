//! Sequential, size-bounded read loop over a blob.
//!
//! # Example
//!
//! ```
//! use blobstream::{Base64DataUrlReader, ReadConfig, read_blob};
//! use bytes::Bytes;
//!
//! # tokio_test::block_on(async {
//! let blob = Bytes::from_static(b"some data to read in pieces");
//! let mut total = 0;
//!
//! read_blob(
//!     blob,
//!     Base64DataUrlReader::new(),
//!     |chunk| total += chunk.len(),
//!     ReadConfig::new(8)?,
//! )
//! .await?;
//!
//! assert_eq!(total, 27);
//! # Ok::<(), blobstream::ChunkError>(())
//! # }).unwrap();
//! ```

use std::future::Future;
use std::pin::{Pin, pin};
use std::task::{Context, Poll};

use futures_core::{Stream, ready};
use futures_util::StreamExt;
use log::{debug, trace};
use pin_project_lite::pin_project;

use super::data_url::{DataUrlReader, decode_data_url};
use super::source::Blob;
use crate::chunk::Chunk;
use crate::config::ReadConfig;
use crate::error::ChunkError;

pin_project! {
    /// A stream that yields the decoded chunks of a blob in order.
    ///
    /// At most one slice is being decoded at any time, and the next slice is
    /// only requested when the stream is polled again after yielding. Chunks
    /// are contiguous, start at offset 0, and never exceed the configured
    /// chunk size. The stream ends after the last byte, or right after the
    /// first error.
    ///
    /// Dropping the stream is the only way to stop early.
    pub struct BlobChunks<B, R: DataUrlReader<B>> {
        blob: B,
        reader: R,
        config: ReadConfig,
        size: u64,
        cursor: u64,
        requested: usize,
        #[pin]
        pending: Option<R::Future>,
        finished: bool,
    }
}

impl<B: Blob, R: DataUrlReader<B>> BlobChunks<B, R> {
    /// Creates a chunk stream over `blob`, decoding slices with `reader`.
    ///
    /// Nothing is read until the stream is first polled.
    pub fn new(blob: B, reader: R, config: ReadConfig) -> Self {
        let size = blob.size();
        Self {
            blob,
            reader,
            config,
            size,
            cursor: 0,
            requested: 0,
            pending: None,
            finished: false,
        }
    }

    /// Returns the total size of the blob.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Returns the number of bytes delivered so far.
    pub fn position(&self) -> u64 {
        self.cursor
    }
}

impl<B: Blob, R: DataUrlReader<B>> Stream for BlobChunks<B, R> {
    type Item = Result<Chunk, ChunkError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.finished {
            return Poll::Ready(None);
        }

        loop {
            if let Some(decode) = this.pending.as_mut().as_pin_mut() {
                let result = ready!(decode.poll(cx));
                this.pending.set(None);

                let offset = *this.cursor;
                let requested = *this.requested;
                let chunk = result
                    .and_then(|url| decode_data_url(&url))
                    .and_then(|data| {
                        if data.len() > requested {
                            Err(ChunkError::ChunkTooLarge {
                                actual: data.len(),
                                max: requested,
                            })
                        } else if data.is_empty() {
                            Err(ChunkError::Stalled { offset })
                        } else {
                            Ok(Chunk::new(data, offset))
                        }
                    });

                return match chunk {
                    Ok(chunk) => {
                        *this.cursor += chunk.len() as u64;
                        trace!("blob chunk {}..{} of {}", offset, *this.cursor, this.size);
                        Poll::Ready(Some(Ok(chunk)))
                    }
                    Err(e) => {
                        debug!("blob read failed at offset {}: {}", offset, e);
                        *this.finished = true;
                        Poll::Ready(Some(Err(e)))
                    }
                };
            }

            if *this.cursor >= *this.size {
                debug!("blob read complete: {} bytes", this.size);
                *this.finished = true;
                return Poll::Ready(None);
            }

            if let Err(e) = this.config.validate() {
                *this.finished = true;
                return Poll::Ready(Some(Err(e)));
            }

            let start = *this.cursor;
            let end = (*this.size).min(start.saturating_add(this.config.chunk_size() as u64));
            *this.requested = (end - start) as usize;

            let slice = this.blob.slice(start, end);
            this.pending.set(Some(this.reader.read_as_data_url(slice)));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            return (0, Some(0));
        }
        let remaining = self.size - self.cursor;
        if remaining == 0 {
            (0, Some(0))
        } else {
            // Chunks may come back shorter than requested.
            (1, usize::try_from(remaining).ok())
        }
    }
}

/// Reads every byte of `blob`, calling `on_chunk` once per chunk in order.
///
/// Resolves with `Ok(())` once the whole blob has been delivered; a zero
/// sized blob resolves without calling the handler. Any decode failure ends
/// the read with that error and no further chunks are delivered.
pub async fn read_blob<B, R, F>(
    blob: B,
    reader: R,
    mut on_chunk: F,
    config: ReadConfig,
) -> Result<(), ChunkError>
where
    B: Blob,
    R: DataUrlReader<B>,
    F: FnMut(Chunk),
{
    try_read_blob(
        blob,
        reader,
        |chunk| {
            on_chunk(chunk);
            Ok::<(), ChunkError>(())
        },
        config,
    )
    .await
}

/// Like [`read_blob`], but the handler may fail.
///
/// A handler error stops the loop immediately: no further slices are
/// requested and the error is returned as is.
///
/// # Example
///
/// ```
/// use blobstream::{Base64DataUrlReader, ChunkError, ReadConfig, try_read_blob};
///
/// # tokio_test::block_on(async {
/// let mut seen = 0;
/// let result = try_read_blob(
///     &b"0123456789"[..],
///     Base64DataUrlReader::new(),
///     |_chunk| {
///         seen += 1;
///         if seen == 2 { Err(ChunkError::Aborted) } else { Ok(()) }
///     },
///     ReadConfig::new(4)?,
/// )
/// .await;
///
/// assert!(matches!(result, Err(ChunkError::Aborted)));
/// assert_eq!(seen, 2);
/// # Ok::<(), ChunkError>(())
/// # }).unwrap();
/// ```
pub async fn try_read_blob<B, R, F, E>(
    blob: B,
    reader: R,
    mut on_chunk: F,
    config: ReadConfig,
) -> Result<(), E>
where
    B: Blob,
    R: DataUrlReader<B>,
    F: FnMut(Chunk) -> Result<(), E>,
    E: From<ChunkError>,
{
    config.validate()?;

    let mut chunks = pin!(BlobChunks::new(blob, reader, config));
    debug!(
        "reading blob: {} bytes in slices of {}",
        chunks.size(),
        config.chunk_size()
    );

    while let Some(chunk) = chunks.next().await {
        on_chunk(chunk?)?;
    }

    Ok(())
}
