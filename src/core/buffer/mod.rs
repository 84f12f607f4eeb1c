//! Bounded, thread-safe byte buffering between audio producers and network
//! consumers.
//!
//! A [`ChunkWriter`] accumulates raw PCM bytes on the capture side and groups
//! them into immutable chunks; a [`ChunkReader`] serves transferred chunks back
//! to the transport as a byte stream or chunk-at-a-time. The two are
//! independent: coupling them (moving chunks from writer to reader) is the
//! session orchestrator's job, not an internal channel.
//!
//! # Backpressure
//!
//! These buffers are NOT blocking queues. A flush beyond capacity fails
//! immediately with [`BufferError::CapacityExceeded`] and a read from an empty
//! reader returns an empty result. Callers that need backpressure must poll or
//! retry externally; blocking the producer would stall upstream audio capture.

mod reader;
mod writer;

pub use reader::ChunkReader;
pub use writer::{ChunkWriter, DEFAULT_FLUSH_THRESHOLD, WriterConfig};

use thiserror::Error;

/// Errors that can occur during buffer operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// Operation attempted after the buffer was closed
    #[error("buffer is closed")]
    Closed,

    /// Flush would exceed the configured chunk capacity
    #[error("chunk capacity exceeded: {capacity} chunks")]
    CapacityExceeded {
        /// Configured maximum chunk count
        capacity: usize,
    },
}

/// Result type for buffer operations.
pub type BufferResult<T> = Result<T, BufferError>;
