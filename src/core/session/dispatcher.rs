//! Inbound frame dispatch for a running session.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::{DedupOutcome, TranscriptionDeduper};
use crate::core::protocol::{ProtocolError, ProtocolMessage, classify_str};

use thiserror::Error;

/// Errors that can occur while dispatching inbound frames.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Frame could not be classified
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The session's event channel was closed by the receiver
    #[error("event channel closed")]
    ChannelClosed,
}

/// Classifies inbound frames and forwards typed messages to the session
/// orchestrator over an mpsc channel, suppressing duplicate partial
/// transcriptions along the way.
///
/// This is the seam between the transport's receive loop and application
/// code: the transport feeds raw frames in, the application consumes
/// [`ProtocolMessage`]s from the paired receiver.
#[derive(Debug)]
pub struct FrameDispatcher {
    events: mpsc::Sender<ProtocolMessage>,
    deduper: TranscriptionDeduper,
}

impl FrameDispatcher {
    /// Create a dispatcher forwarding to the given channel.
    pub fn new(events: mpsc::Sender<ProtocolMessage>) -> Self {
        Self {
            events,
            deduper: TranscriptionDeduper::new(),
        }
    }

    /// Classify one raw frame and forward the resulting message.
    ///
    /// Returns `Ok(true)` when a message was forwarded and `Ok(false)` when a
    /// duplicate partial transcription was suppressed. Classification
    /// failures surface to the caller untouched; the transport decides
    /// whether to drop the frame or abort the session.
    pub async fn dispatch(&self, raw: &str) -> Result<bool, DispatchError> {
        let msg = classify_str(raw)?;

        if let ProtocolMessage::Transcription(t) = &msg
            && self.deduper.observe(t) == DedupOutcome::Duplicate
        {
            debug!(
                transcription_id = %t.transcription_id,
                language = %t.language,
                "suppressing duplicate partial transcription"
            );
            return Ok(false);
        }

        if let ProtocolMessage::Error(e) = &msg {
            warn!(error = %e.error, "server reported an error");
        }

        self.events
            .send(msg)
            .await
            .map_err(|_| DispatchError::ChannelClosed)?;
        Ok(true)
    }

    /// Forget all in-flight utterances, e.g. when the transport reconnects.
    pub fn reset(&self) {
        self.deduper.reset();
    }
}
