//! Protocol message model and frame classification.
//!
//! Inbound frames are JSON mappings with a `message_type` tag and an optional
//! nested `data` payload. [`classify_frame`] matches the tag against a fixed
//! table and produces the corresponding [`ProtocolMessage`] variant; unknown
//! tags become [`ProtocolMessage::Generic`] instead of errors.

mod classifier;
mod language;
mod messages;

pub use classifier::{classify_frame, classify_str};
pub use language::Language;
pub use messages::{
    AudioMessage, DedupKey, ErrorMessage, GenericMessage, ProtocolMessage, TaskMessage,
    TranscriptionMessage,
};

use thiserror::Error;

/// Errors that can occur while constructing protocol messages.
#[derive(Debug, Clone, Error)]
pub enum ProtocolError {
    /// Unparseable locale code in a transcription frame
    #[error("unknown language code: {0}")]
    UnknownLanguage(String),

    /// Undecodable audio payload or unparseable frame text
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// Invalid construction parameters or missing required frame fields
    #[error("validation error: {0}")]
    Validation(String),
}

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;
