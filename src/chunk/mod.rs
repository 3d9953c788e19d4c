//! Chunk types.
//!
//! - [`Chunk`] - One decoded blob slice with its source offset

mod data;

pub use data::Chunk;
