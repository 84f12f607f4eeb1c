//! Typed protocol message model.
//!
//! Inbound frames are classified into this discriminated union by
//! [`super::classifier`]. A message is constructed once per frame, immutable
//! thereafter, and discarded after the caller consumes it.

use std::fmt;

use base64::prelude::*;
use bytes::Bytes;
use serde_json::Value;

use super::{Language, ProtocolError, ProtocolResult};

/// A classified inbound protocol message.
///
/// Unrecognized server message types land in [`ProtocolMessage::Generic`]
/// rather than failing, preserving forward compatibility at the
/// classification boundary.
#[derive(Debug, Clone)]
pub enum ProtocolMessage {
    /// Session-control status update
    Task(TaskMessage),
    /// Partial or final transcription/translation text
    Transcription(TranscriptionMessage),
    /// Synthesized audio payload
    Audio(AudioMessage),
    /// Server-reported error
    Error(ErrorMessage),
    /// Catch-all for unknown message types
    Generic(GenericMessage),
}

impl ProtocolMessage {
    /// The raw `message_type` tag this message was classified from.
    pub fn message_type(&self) -> &str {
        match self {
            ProtocolMessage::Task(m) => &m.message_type,
            ProtocolMessage::Transcription(m) => &m.message_type,
            ProtocolMessage::Audio(m) => &m.message_type,
            ProtocolMessage::Error(m) => &m.message_type,
            ProtocolMessage::Generic(m) => &m.message_type,
        }
    }

    /// Deduplication key, present only for transcription messages.
    pub fn dedup_key(&self) -> Option<DedupKey> {
        match self {
            ProtocolMessage::Transcription(m) => Some(m.dedup_key()),
            _ => None,
        }
    }
}

/// Session-control message (`current_task` / `set_task`).
#[derive(Debug, Clone)]
pub struct TaskMessage {
    /// Raw message type tag
    pub message_type: String,
    /// Task status string, when present
    pub status: Option<String>,
    /// Full session-control payload as received
    pub payload: Value,
}

/// A partial or final transcription/translation update for one utterance.
#[derive(Debug, Clone)]
pub struct TranscriptionMessage {
    /// Raw message type tag
    pub message_type: String,
    /// Server-assigned utterance identifier
    pub transcription_id: String,
    /// Language of the transcribed text
    pub language: Language,
    /// Transcribed or translated text
    pub text: String,
    /// Whether this update is partial (derived from the tag)
    pub is_partial: bool,
}

impl TranscriptionMessage {
    /// Construct a transcription message, validating the identifier.
    pub fn new(
        message_type: impl Into<String>,
        transcription_id: impl Into<String>,
        language: Language,
        text: impl Into<String>,
        is_partial: bool,
    ) -> ProtocolResult<Self> {
        let transcription_id = transcription_id.into();
        if transcription_id.trim().is_empty() {
            return Err(ProtocolError::Validation(
                "transcription_id must not be blank".to_string(),
            ));
        }
        Ok(Self {
            message_type: message_type.into(),
            transcription_id,
            language,
            text: text.into(),
            is_partial,
        })
    }

    /// Deduplication key for this utterance.
    ///
    /// Excludes partiality so a final transcript supersedes its partials under
    /// the same key. Use [`Self::dedup_key_with_partiality`] to track partial
    /// and final updates separately.
    pub fn dedup_key(&self) -> DedupKey {
        DedupKey {
            transcription_id: self.transcription_id.clone(),
            language: self.language,
            partiality: None,
        }
    }

    /// Deduplication key including the partial/final distinction.
    pub fn dedup_key_with_partiality(&self) -> DedupKey {
        DedupKey {
            transcription_id: self.transcription_id.clone(),
            language: self.language,
            partiality: Some(self.is_partial),
        }
    }
}

/// Synthesized audio decoded from its transport encoding.
#[derive(Debug, Clone)]
pub struct AudioMessage {
    /// Raw message type tag
    pub message_type: String,
    /// Raw PCM bytes
    pub audio_data: Bytes,
}

impl AudioMessage {
    /// Decode an audio message from its base64 transport encoding.
    pub fn from_base64(message_type: impl Into<String>, encoded: &str) -> ProtocolResult<Self> {
        let audio_data = BASE64_STANDARD
            .decode(encoded)
            .map_err(|e| ProtocolError::MalformedPayload(e.to_string()))?;
        Ok(Self {
            message_type: message_type.into(),
            audio_data: Bytes::from(audio_data),
        })
    }

    /// Size of the decoded audio payload in bytes.
    pub fn audio_size(&self) -> usize {
        self.audio_data.len()
    }
}

/// Server-reported error.
#[derive(Debug, Clone)]
pub struct ErrorMessage {
    /// Raw message type tag
    pub message_type: String,
    /// Error description
    pub error: String,
    /// Optional diagnostic detail
    pub details: Option<String>,
}

/// Opaque message for any unrecognized `message_type`.
#[derive(Debug, Clone)]
pub struct GenericMessage {
    /// Raw message type tag
    pub message_type: String,
    /// Payload as received, untouched
    pub payload: Value,
}

/// Identifier a caller uses to recognize repeated or superseding updates for
/// the same logical utterance.
///
/// Equality and hashing cover `(transcription_id, language)` plus the optional
/// partiality component; the dedup table in
/// [`crate::core::session::TranscriptionDeduper`] keys on this.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    /// Utterance identifier
    pub transcription_id: String,
    /// Language of the update
    pub language: Language,
    /// Partial/final component, `None` when excluded from the key
    pub partiality: Option<bool>,
}

impl fmt::Display for DedupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.transcription_id, self.language)?;
        match self.partiality {
            Some(true) => write!(f, ":partial"),
            Some(false) => write!(f, ":final"),
            None => Ok(()),
        }
    }
}
