//! Non-destructive stream digests.
//!
//! Hashing a stream by reading it would drain it for whoever else holds it.
//! Instead the stream is asked for an independent duplicate over the same
//! backing resource and only the duplicate is read.
//!
//! - [`Duplicate`] - Capability to reopen a stream's backing resource
//! - `FileStream` / [`MemoryStream`] - Duplicatable streams (`FileStream`
//!   needs the `tokio` feature)
//! - [`OpaqueStream`] - A stream that cannot be duplicated
//! - [`digest_stream`] - Hash a stream through its duplicate
//! - [`digest_reader`] - Hash an owned reader directly

mod hasher;
mod source;

pub use self::hasher::{DigestFuture, digest_reader, digest_stream, digest_stream_with};
#[cfg(feature = "tokio")]
pub use self::source::FileStream;
pub use self::source::{Duplicate, MemoryStream, OpaqueStream};
