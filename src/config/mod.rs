//! Configuration for blob reading and stream digesting.
//!
//! - [`ReadConfig`] - Controls the maximum slice size requested from a blob
//! - [`DigestConfig`] - Controls the read buffer used while hashing a stream
//!
//! # Example
//!
//! ```
//! use blobstream::{DigestConfig, ReadConfig};
//!
//! // Read 256 KiB slices
//! let config = ReadConfig::new(256 * 1024)?;
//!
//! // Hash through a 16 KiB buffer
//! let config = DigestConfig::default().with_buffer_size(16 * 1024);
//! config.validate()?;
//!
//! # Ok::<(), blobstream::ChunkError>(())
//! ```

use crate::error::ChunkError;

/// Default blob slice size (1 MiB).
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// Default stream read buffer size (64 KiB).
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Configuration for chunked blob reading.
///
/// `chunk_size` bounds the length of every slice requested from the blob,
/// and therefore the length of every chunk delivered. Only one chunk is held
/// in memory at a time.
///
/// # Example
///
/// ```
/// use blobstream::ReadConfig;
///
/// let config = ReadConfig::default();
/// assert_eq!(config.chunk_size(), 1024 * 1024);
///
/// let config = ReadConfig::default().with_chunk_size(4096);
/// assert_eq!(config.chunk_size(), 4096);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReadConfig {
    /// Maximum slice length in bytes.
    chunk_size: usize,
}

impl ReadConfig {
    /// Creates a new configuration with the given slice size.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::InvalidConfig`] if `chunk_size` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use blobstream::ReadConfig;
    ///
    /// let config = ReadConfig::new(4096)?;
    /// assert_eq!(config.chunk_size(), 4096);
    /// assert!(ReadConfig::new(0).is_err());
    /// # Ok::<(), blobstream::ChunkError>(())
    /// ```
    pub fn new(chunk_size: usize) -> Result<Self, ChunkError> {
        if chunk_size == 0 {
            return Err(ChunkError::InvalidConfig {
                message: "chunk size must be non-zero",
            });
        }

        Ok(Self { chunk_size })
    }

    /// Sets the slice size.
    ///
    /// Note: This does not validate the configuration. Use [`ReadConfig::validate`]
    /// to check if the configuration is valid.
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Returns the slice size.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Validates the current configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use blobstream::ReadConfig;
    ///
    /// let config = ReadConfig::default().with_chunk_size(0);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ChunkError> {
        Self::new(self.chunk_size).map(|_| ())
    }
}

impl Default for ReadConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Configuration for stream digesting.
///
/// `buffer_size` is the most bytes read from the duplicate stream per
/// poll, i.e. the largest block fed to the hash accumulator at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DigestConfig {
    buffer_size: usize,
}

impl DigestConfig {
    /// Creates a new configuration with the given read buffer size.
    ///
    /// Returns [`ChunkError::InvalidConfig`] if `buffer_size` is zero.
    pub fn new(buffer_size: usize) -> Result<Self, ChunkError> {
        if buffer_size == 0 {
            return Err(ChunkError::InvalidConfig {
                message: "buffer size must be non-zero",
            });
        }

        Ok(Self { buffer_size })
    }

    /// Sets the read buffer size without validating it.
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Returns the read buffer size.
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Validates the current configuration.
    pub fn validate(&self) -> Result<(), ChunkError> {
        Self::new(self.buffer_size).map(|_| ())
    }
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}
