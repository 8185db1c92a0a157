//! Buffering policy
//!
//! Decides whether a resource may be materialized in memory at all. How the
//! bytes are obtained is up to the resource.

use serde::{Deserialize, Serialize};

/// Size threshold gating in-memory buffering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct BufferPolicy {
    max_buffer_size: i64,
}

impl BufferPolicy {
    /// Never buffer, always stream
    pub const NEVER: Self = Self { max_buffer_size: -1 };

    /// Buffer resources of at most `max_buffer_size` bytes; negative means never
    pub const fn new(max_buffer_size: i64) -> Self {
        Self { max_buffer_size }
    }

    pub const fn max_buffer_size(self) -> i64 {
        self.max_buffer_size
    }

    /// Whether a resource of `length` bytes may be buffered
    ///
    /// Unknown, empty and oversized resources are never buffered; the bound
    /// is inclusive.
    pub const fn permits(self, length: i64) -> bool {
        length > 0 && self.max_buffer_size >= length
    }
}

impl Default for BufferPolicy {
    fn default() -> Self {
        Self::NEVER
    }
}
