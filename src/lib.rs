//! blobstream
//!
//! Incremental consumption of large binary payloads for Rust.
//!
//! `blobstream` provides two small, independent primitives:
//!
//! - a chunked blob reader that walks a known-size blob in ordered,
//!   size-bounded, decoded chunks
//! - a stream digest that hashes a readable stream through an independent
//!   duplicate, leaving the original stream untouched
//!
//! The crate intentionally:
//! - does NOT implement hash algorithms (any [`digest::Digest`] works)
//! - does NOT store blobs or manage files
//! - does NOT spawn tasks or threads
//! - does NOT depend on an async runtime, except for the file-backed
//!   stream behind the `tokio` feature
//!
//! Exactly one chunk (or one read buffer) is in flight at a time.
//!
//! # Chunked blob reading
//!
//! ```
//! use blobstream::{Base64DataUrlReader, BlobChunks, ReadConfig};
//! use bytes::Bytes;
//! use futures_util::StreamExt;
//!
//! # tokio_test::block_on(async {
//! let blob = Bytes::from(vec![7u8; 3000]);
//! let mut chunks = BlobChunks::new(blob, Base64DataUrlReader::new(), ReadConfig::new(1024)?);
//!
//! while let Some(chunk) = chunks.next().await {
//!     let chunk = chunk?;
//!     println!("chunk {:?}", chunk.range());
//! }
//! # Ok::<(), blobstream::ChunkError>(())
//! # }).unwrap();
//! ```
//!
//! # Stream digest
//!
//! ```
//! use blobstream::{MemoryStream, digest_stream};
//! use sha2::Sha256;
//!
//! # tokio_test::block_on(async {
//! let stream = MemoryStream::new(&b"payload"[..]);
//! let digest = digest_stream::<Sha256, _>(&stream).await?;
//!
//! assert_eq!(digest.len(), 32);
//! assert_eq!(stream.position(), 0);
//! # Ok::<(), blobstream::ChunkError>(())
//! # }).unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod async_stream;
mod blob;
mod chunk;
mod config;
mod error;
mod hash;

mod buffer; // internal (thread-local reuse)

//
// Public surface
//

pub use async_stream::{
    DigestFuture, Duplicate, MemoryStream, OpaqueStream, digest_reader, digest_stream,
    digest_stream_with,
};
pub use blob::{
    Base64DataUrlReader, Blob, BlobChunks, DataUrlReader, decode_data_url, read_blob,
    try_read_blob,
};
pub use chunk::Chunk;
pub use config::{DEFAULT_BUFFER_SIZE, DEFAULT_CHUNK_SIZE, DigestConfig, ReadConfig};
pub use error::ChunkError;
pub use hash::HashAccumulator;

#[cfg(feature = "tokio")]
pub use async_stream::FileStream;

#[cfg(feature = "hash-blake3")]
pub use hash::Blake3Hasher;
