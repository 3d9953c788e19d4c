//! Internal read-buffer management.
//!
//! This module provides a thread-local buffer pool so repeated stream digests
//! reuse their read buffers. It is an implementation detail and not part of
//! the public API.

mod pool;

pub(crate) use pool::Buffer;
