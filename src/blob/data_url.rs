//! Data URL encoding and decoding of blob slices.

use std::future::{self, Future, Ready};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;

use crate::error::ChunkError;

/// Converts a blob slice into a data URL (`data:<mime>;base64,<payload>`).
///
/// This is the asynchronous binary-to-text step of the read loop. A failed
/// or aborted conversion resolves to `Err` and ends the whole read.
///
/// Any `FnMut(B) -> impl Future<Output = Result<String, ChunkError>>` is a
/// reader, which makes it easy to plug in a host primitive:
///
/// ```
/// use blobstream::{ChunkError, DataUrlReader};
/// use bytes::Bytes;
///
/// let mut reader = |_slice: Bytes| async { Err::<String, _>(ChunkError::Aborted) };
/// let _future = reader.read_as_data_url(Bytes::from_static(b"abc"));
/// ```
pub trait DataUrlReader<B> {
    /// Future resolving to the encoded slice.
    type Future: Future<Output = Result<String, ChunkError>>;

    /// Starts encoding `blob`.
    fn read_as_data_url(&mut self, blob: B) -> Self::Future;
}

impl<B, F, Fut> DataUrlReader<B> for F
where
    F: FnMut(B) -> Fut,
    Fut: Future<Output = Result<String, ChunkError>>,
{
    type Future = Fut;

    fn read_as_data_url(&mut self, blob: B) -> Self::Future {
        self(blob)
    }
}

/// In-process [`DataUrlReader`] that base64-encodes slices immediately.
///
/// # Example
///
/// ```
/// use blobstream::{Base64DataUrlReader, DataUrlReader};
///
/// # tokio_test::block_on(async {
/// let mut reader = Base64DataUrlReader::new();
/// let url = reader.read_as_data_url(&b"hi"[..]).await?;
/// assert_eq!(url, "data:application/octet-stream;base64,aGk=");
/// # Ok::<(), blobstream::ChunkError>(())
/// # }).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Base64DataUrlReader {
    mime_type: String,
}

impl Base64DataUrlReader {
    /// Creates a reader that labels payloads `application/octet-stream`.
    pub fn new() -> Self {
        Self::with_mime_type("application/octet-stream")
    }

    /// Creates a reader that labels payloads with `mime_type`.
    pub fn with_mime_type(mime_type: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
        }
    }

    /// Returns the MIME type written into the header.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }
}

impl Default for Base64DataUrlReader {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: AsRef<[u8]>> DataUrlReader<B> for Base64DataUrlReader {
    type Future = Ready<Result<String, ChunkError>>;

    fn read_as_data_url(&mut self, blob: B) -> Self::Future {
        let url = format!(
            "data:{};base64,{}",
            self.mime_type,
            STANDARD.encode(blob.as_ref())
        );
        future::ready(Ok(url))
    }
}

/// Extracts and decodes the payload of a base64 data URL.
///
/// The payload is everything after the first `,`. A string without a
/// separator is decoded whole.
///
/// # Example
///
/// ```
/// use blobstream::decode_data_url;
///
/// let data = decode_data_url("data:*/*;base64,aGVsbG8=")?;
/// assert_eq!(&data[..], b"hello");
/// # Ok::<(), blobstream::ChunkError>(())
/// ```
pub fn decode_data_url(url: &str) -> Result<Bytes, ChunkError> {
    let payload = match url.find(',') {
        Some(idx) => &url[idx + 1..],
        None => url,
    };
    let decoded = STANDARD.decode(payload)?;
    Ok(Bytes::from(decoded))
}
