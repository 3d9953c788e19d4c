//! Error types for blobstream.

use std::fmt;

/// Errors that can occur while reading blob chunks or digesting streams.
#[derive(Debug)]
pub enum ChunkError {
    /// An I/O error occurred while reading a stream.
    Io(std::io::Error),

    /// A chunk payload could not be decoded from its base64 form.
    Decode(base64::DecodeError),

    /// The decode primitive was aborted before producing a result.
    Aborted,

    /// The stream cannot be duplicated, so it cannot be hashed without
    /// draining it for every other consumer.
    UnsupportedStream {
        /// Description of why the stream was rejected.
        message: &'static str,
    },

    /// A decoded chunk was larger than the slice that was requested.
    ChunkTooLarge {
        /// The decoded size.
        actual: usize,
        /// The size of the requested slice.
        max: usize,
    },

    /// A non-empty slice decoded to zero bytes, so the cursor could not advance.
    Stalled {
        /// Offset of the slice that failed to make progress.
        offset: u64,
    },

    /// Invalid configuration parameter.
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl fmt::Display for ChunkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChunkError::Io(e) => write!(f, "io error: {}", e),
            ChunkError::Decode(e) => write!(f, "decode error: {}", e),
            ChunkError::Aborted => write!(f, "read aborted"),
            ChunkError::UnsupportedStream { message } => {
                write!(f, "unsupported stream: {}", message)
            }
            ChunkError::ChunkTooLarge { actual, max } => {
                write!(f, "chunk too large: {} bytes (max {})", actual, max)
            }
            ChunkError::Stalled { offset } => {
                write!(f, "no bytes decoded for slice at offset {}", offset)
            }
            ChunkError::InvalidConfig { message } => {
                write!(f, "invalid config: {}", message)
            }
        }
    }
}

impl std::error::Error for ChunkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChunkError::Io(e) => Some(e),
            ChunkError::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ChunkError {
    fn from(e: std::io::Error) -> Self {
        ChunkError::Io(e)
    }
}

impl From<base64::DecodeError> for ChunkError {
    fn from(e: base64::DecodeError) -> Self {
        ChunkError::Decode(e)
    }
}
