//! Producer-side chunk buffer.

use bytes::Bytes;
use parking_lot::Mutex;

use super::{BufferError, BufferResult};

/// Default pending-byte threshold that triggers an automatic flush.
///
/// 32 KiB is 1/3 second of PCM 16-bit mono at 48kHz, a reasonable upper bound
/// for one network frame on the capture path.
pub const DEFAULT_FLUSH_THRESHOLD: usize = 32 * 1024;

/// Configuration for a [`ChunkWriter`].
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Maximum number of flushed chunks held at once (`None` = unbounded)
    pub capacity: Option<usize>,
    /// Flush automatically when pending bytes reach `flush_threshold`
    pub auto_flush: bool,
    /// Pending byte count that triggers an auto-flush
    pub flush_threshold: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            capacity: None,
            auto_flush: false,
            flush_threshold: DEFAULT_FLUSH_THRESHOLD,
        }
    }
}

#[derive(Debug, Default)]
struct WriterState {
    /// Bytes written but not yet flushed into a chunk
    pending: Vec<u8>,
    /// Flushed chunks in flush order
    chunks: Vec<Bytes>,
    /// Cumulative bytes accepted over the writer's lifetime (survives `clear`)
    total_bytes: u64,
    closed: bool,
}

/// Bounded producer-side byte buffer.
///
/// Accumulates raw bytes into `pending`, converts them to immutable [`Bytes`]
/// chunks on flush, and enforces an optional chunk-count ceiling. All mutating
/// operations are atomic with respect to each other; a producer thread can
/// write while another thread drains chunks without external locking.
#[derive(Debug)]
pub struct ChunkWriter {
    config: WriterConfig,
    state: Mutex<WriterState>,
}

impl ChunkWriter {
    /// Create a new writer with the given configuration.
    pub fn new(config: WriterConfig) -> Self {
        Self {
            config,
            state: Mutex::new(WriterState::default()),
        }
    }

    /// Create an unbounded writer with manual flushing.
    pub fn unbounded() -> Self {
        Self::new(WriterConfig::default())
    }

    /// Create a writer holding at most `capacity` flushed chunks.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(WriterConfig {
            capacity: Some(capacity),
            ..Default::default()
        })
    }

    /// Append bytes to the pending buffer.
    ///
    /// Empty input is a no-op. When auto-flush is enabled and the pending
    /// buffer reaches the threshold, a flush happens as a side effect of this
    /// call; if that flush fails with [`BufferError::CapacityExceeded`] the
    /// appended bytes stay pending and the error is surfaced here.
    pub fn write(&self, data: &[u8]) -> BufferResult<()> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(BufferError::Closed);
        }
        if data.is_empty() {
            return Ok(());
        }

        state.pending.extend_from_slice(data);
        state.total_bytes += data.len() as u64;

        if self.config.auto_flush && state.pending.len() >= self.config.flush_threshold {
            Self::flush_locked(&mut state, self.config.capacity)?;
        }
        Ok(())
    }

    /// Convert pending bytes into a new immutable chunk.
    ///
    /// A flush with nothing pending is a no-op and never creates an empty
    /// chunk. On capacity overflow the pending bytes are left untouched so a
    /// later flush can retry once chunks have been drained or cleared.
    pub fn flush(&self) -> BufferResult<()> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(BufferError::Closed);
        }
        Self::flush_locked(&mut state, self.config.capacity)
    }

    fn flush_locked(state: &mut WriterState, capacity: Option<usize>) -> BufferResult<()> {
        if state.pending.is_empty() {
            return Ok(());
        }
        if let Some(capacity) = capacity
            && state.chunks.len() >= capacity
        {
            return Err(BufferError::CapacityExceeded { capacity });
        }
        let chunk = Bytes::from(std::mem::take(&mut state.pending));
        state.chunks.push(chunk);
        Ok(())
    }

    /// Drop all chunks and pending data.
    ///
    /// `total_size` is cumulative for the writer's lifetime and does not
    /// reset here. Fails with [`BufferError::Closed`] after close: draining
    /// is the only operation still permitted on a closed writer, and a clear
    /// would destroy chunks the consumer has yet to collect.
    pub fn clear(&self) -> BufferResult<()> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(BufferError::Closed);
        }
        state.pending.clear();
        state.chunks.clear();
        Ok(())
    }

    /// Flush pending data best-effort and mark the writer closed.
    ///
    /// Idempotent. If the final flush fails on capacity the close still
    /// proceeds and the pending bytes are dropped, since no further writes can
    /// ever retry them. After closing, `write` and `flush` fail with
    /// [`BufferError::Closed`].
    pub fn close(&self) {
        let mut state = self.state.lock();
        if state.closed {
            return;
        }
        let _ = Self::flush_locked(&mut state, self.config.capacity);
        state.pending.clear();
        state.closed = true;
    }

    /// Whether the writer has been closed.
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Number of flushed chunks currently held.
    pub fn chunk_count(&self) -> usize {
        self.state.lock().chunks.len()
    }

    /// Number of pending (unflushed) bytes.
    pub fn buffer_size(&self) -> usize {
        self.state.lock().pending.len()
    }

    /// Cumulative bytes written over the writer's lifetime.
    pub fn total_size(&self) -> u64 {
        self.state.lock().total_bytes
    }

    /// Concatenation of all flushed chunks plus pending bytes.
    ///
    /// Read-only snapshot; does not consume chunks.
    pub fn get_data(&self) -> Vec<u8> {
        let state = self.state.lock();
        let total = state.chunks.iter().map(Bytes::len).sum::<usize>() + state.pending.len();
        let mut out = Vec::with_capacity(total);
        for chunk in &state.chunks {
            out.extend_from_slice(chunk);
        }
        out.extend_from_slice(&state.pending);
        out
    }

    /// Remove and return the oldest flushed chunk, freeing capacity.
    ///
    /// Legal after close; draining is how already-flushed data reaches the
    /// consumer side.
    pub fn pop_chunk(&self) -> Option<Bytes> {
        let mut state = self.state.lock();
        if state.chunks.is_empty() {
            None
        } else {
            Some(state.chunks.remove(0))
        }
    }

    /// Remove and return all flushed chunks in flush order.
    pub fn drain_chunks(&self) -> Vec<Bytes> {
        std::mem::take(&mut self.state.lock().chunks)
    }
}
