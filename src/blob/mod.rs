//! Chunked blob reading.
//!
//! A blob of known size is walked front to back in slices of at most
//! [`ReadConfig::chunk_size`](crate::ReadConfig::chunk_size) bytes. Each
//! slice goes through a [`DataUrlReader`] and is decoded back to raw bytes
//! before it is handed out.
//!
//! - [`Blob`] - A sized, sliceable binary source
//! - [`DataUrlReader`] - Turns a slice into a base64 data URL
//! - [`BlobChunks`] - Lazy stream of decoded chunks
//! - [`read_blob`] / [`try_read_blob`] - Callback-driven read loops

mod data_url;
mod reader;
mod source;

pub use data_url::{Base64DataUrlReader, DataUrlReader, decode_data_url};
pub use reader::{BlobChunks, read_blob, try_read_blob};
pub use source::Blob;
