//! Caller-side duplicate suppression for transcription updates.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::core::protocol::{DedupKey, TranscriptionMessage};

/// Outcome of observing a transcription update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupOutcome {
    /// First update seen for this utterance
    New,
    /// Text changed for an utterance already in flight
    Updated,
    /// Identical partial repeated; safe to suppress
    Duplicate,
}

/// Tracks in-flight utterances so repeated partial updates can be coalesced.
///
/// Keys on [`DedupKey`] (transcription id + language, partiality excluded),
/// so the final transcript for an utterance supersedes its partials and
/// retires the entry. Concurrent: multiple receive paths may observe into the
/// same table.
#[derive(Debug, Default)]
pub struct TranscriptionDeduper {
    in_flight: DashMap<DedupKey, String>,
}

impl TranscriptionDeduper {
    /// Create an empty deduper.
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe a transcription update and report how it relates to what has
    /// been seen for the same utterance.
    ///
    /// Partial updates are tracked by text; an identical repeat is a
    /// [`DedupOutcome::Duplicate`]. A final update always passes through and
    /// drops the utterance from the table.
    pub fn observe(&self, msg: &TranscriptionMessage) -> DedupOutcome {
        let key = msg.dedup_key();
        if msg.is_partial {
            match self.in_flight.entry(key) {
                Entry::Occupied(mut entry) => {
                    if entry.get() == &msg.text {
                        DedupOutcome::Duplicate
                    } else {
                        entry.insert(msg.text.clone());
                        DedupOutcome::Updated
                    }
                }
                Entry::Vacant(entry) => {
                    entry.insert(msg.text.clone());
                    DedupOutcome::New
                }
            }
        } else if self.in_flight.remove(&key).is_some() {
            DedupOutcome::Updated
        } else {
            DedupOutcome::New
        }
    }

    /// Number of utterances currently tracked.
    pub fn tracked(&self) -> usize {
        self.in_flight.len()
    }

    /// Forget all in-flight utterances.
    pub fn reset(&self) {
        self.in_flight.clear();
    }
}
