//! BLAKE3 hash accumulator.

use super::HashAccumulator;

/// A [`HashAccumulator`] that computes 32-byte BLAKE3 hashes.
#[derive(Debug, Clone, Default)]
pub struct Blake3Hasher {
    state: blake3::Hasher,
}

impl Blake3Hasher {
    /// Creates a new keyed hasher.
    pub fn new_keyed(key: &[u8; 32]) -> Self {
        Self {
            state: blake3::Hasher::new_keyed(key),
        }
    }
}

impl HashAccumulator for Blake3Hasher {
    type Output = [u8; 32];

    fn new() -> Self {
        Self {
            state: blake3::Hasher::new(),
        }
    }

    fn update(&mut self, data: &[u8]) {
        self.state.update(data);
    }

    fn finalize(self) -> Self::Output {
        self.state.finalize().into()
    }
}
