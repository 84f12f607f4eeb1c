//! Consumer-side chunk buffer.

use std::collections::VecDeque;

use bytes::Bytes;
use parking_lot::Mutex;

use super::{BufferError, BufferResult};

/// A queued chunk with its read cursor.
#[derive(Debug)]
struct ChunkCursor {
    data: Bytes,
    pos: usize,
}

impl ChunkCursor {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}

#[derive(Debug, Default)]
struct ReaderState {
    queue: VecDeque<ChunkCursor>,
    closed: bool,
}

/// Consumer-side byte buffer serving queued chunks to the transport.
///
/// Chunks typically originate from a [`super::ChunkWriter`] on the producer
/// side; the session orchestrator moves them across. Reads are non-blocking:
/// an empty queue yields an empty result, never an error. One or more producer
/// threads can feed a reader while a single consumer thread drains it.
#[derive(Debug, Default)]
pub struct ChunkReader {
    state: Mutex<ReaderState>,
}

impl ChunkReader {
    /// Create an empty reader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue an exact copy of the provided bytes as a new chunk.
    ///
    /// Empty input is a no-op.
    pub fn add_data(&self, data: &[u8]) -> BufferResult<()> {
        self.add_chunk(Bytes::copy_from_slice(data))
    }

    /// Enqueue an already-immutable chunk without copying.
    ///
    /// This is the transfer path for chunks drained from a writer.
    pub fn add_chunk(&self, chunk: Bytes) -> BufferResult<()> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(BufferError::Closed);
        }
        if chunk.is_empty() {
            return Ok(());
        }
        state.queue.push_back(ChunkCursor {
            data: chunk,
            pos: 0,
        });
        Ok(())
    }

    /// Dequeue up to `max_bytes`, merging across chunk boundaries.
    ///
    /// A partially consumed chunk keeps its remainder at the head of the queue
    /// for the next read. Returns fewer bytes than requested when the queue
    /// runs short, and an empty vector when nothing is queued.
    pub fn read(&self, max_bytes: usize) -> BufferResult<Vec<u8>> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(BufferError::Closed);
        }

        let mut out = Vec::with_capacity(max_bytes.min(Self::unread_locked(&state)));
        while out.len() < max_bytes {
            let Some(front) = state.queue.front_mut() else {
                break;
            };
            let take = front.remaining().min(max_bytes - out.len());
            out.extend_from_slice(&front.data[front.pos..front.pos + take]);
            front.pos += take;
            if front.remaining() == 0 {
                state.queue.pop_front();
            }
        }
        Ok(out)
    }

    /// Dequeue exactly one whole chunk, preserving frame boundaries.
    ///
    /// Returns chunks in FIFO order as originally added, or `None` when the
    /// queue is empty. A chunk partially consumed by [`Self::read`] yields its
    /// unread remainder.
    pub fn read_chunk(&self) -> BufferResult<Option<Bytes>> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(BufferError::Closed);
        }
        Ok(state.queue.pop_front().map(|cursor| {
            if cursor.pos == 0 {
                cursor.data
            } else {
                cursor.data.slice(cursor.pos..)
            }
        }))
    }

    /// Whether no unread bytes remain.
    pub fn is_empty(&self) -> bool {
        self.available() == 0
    }

    /// Total unread bytes across all queued chunks.
    pub fn available(&self) -> usize {
        Self::unread_locked(&self.state.lock())
    }

    fn unread_locked(state: &ReaderState) -> usize {
        state.queue.iter().map(ChunkCursor::remaining).sum()
    }

    /// Mark the reader closed. Irreversible; subsequent `add_data`/`read`
    /// calls fail with [`BufferError::Closed`].
    pub fn close(&self) {
        self.state.lock().closed = true;
    }

    /// Whether the reader has been closed.
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }
}
