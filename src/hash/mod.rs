//! Hash accumulators fed by the stream digest.
//!
//! [`HashAccumulator`] is the narrow update-then-finalize interface the
//! digest loop drives. Every [`digest::Digest`] implementation (for example
//! `sha2::Sha256`) is an accumulator out of the box.
//!
//! - [`Blake3Hasher`] - BLAKE3 accumulator (requires `hash-blake3` feature)

#[cfg(feature = "hash-blake3")]
mod blake3;

#[cfg(feature = "hash-blake3")]
pub use blake3::Blake3Hasher;

/// Incremental hash state: fed in order, finalized exactly once.
pub trait HashAccumulator: Sized {
    /// The finalized, fixed-length digest.
    type Output: AsRef<[u8]>;

    /// Creates a fresh accumulator.
    fn new() -> Self;

    /// Feeds the next block of bytes.
    fn update(&mut self, data: &[u8]);

    /// Consumes the accumulator and returns the digest.
    fn finalize(self) -> Self::Output;
}

impl<D: digest::Digest> HashAccumulator for D {
    type Output = digest::Output<D>;

    fn new() -> Self {
        <D as digest::Digest>::new()
    }

    fn update(&mut self, data: &[u8]) {
        digest::Digest::update(self, data);
    }

    fn finalize(self) -> Self::Output {
        digest::Digest::finalize(self)
    }
}
