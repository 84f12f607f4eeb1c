//! Session-facing dispatch and deduplication layer.
//!
//! Built on the [`crate::core::protocol`] message model: raw frames come in
//! from the transport, typed [`crate::core::protocol::ProtocolMessage`]s go
//! out to the application, and repeated partial transcriptions for the same
//! utterance are coalesced in between.

mod dedup;
mod dispatcher;

pub use dedup::{DedupOutcome, TranscriptionDeduper};
pub use dispatcher::{DispatchError, FrameDispatcher};
