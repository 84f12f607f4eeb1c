//! State-free classification of raw frames into typed messages.
//!
//! The tag table is fixed. Recognized tags parse strictly (unknown locale,
//! undecodable audio and blank identifiers are hard failures); unrecognized
//! tags degrade to [`ProtocolMessage::Generic`] so new server message kinds
//! never break an older client.

use serde_json::Value;
use tracing::debug;

use super::messages::{
    AudioMessage, ErrorMessage, GenericMessage, ProtocolMessage, TaskMessage, TranscriptionMessage,
};
use super::{Language, ProtocolError, ProtocolResult};

/// Classification outcome for a known tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MessageKind {
    Task,
    PartialTranscription,
    FinalTranscription,
    Audio,
    Error,
}

/// Known `message_type` tags. Anything absent here is Generic.
static MESSAGE_KINDS: phf::Map<&'static str, MessageKind> = phf::phf_map! {
    "current_task" => MessageKind::Task,
    "set_task" => MessageKind::Task,
    "partial_transcription" => MessageKind::PartialTranscription,
    "partial_translated_transcription" => MessageKind::PartialTranscription,
    "validated_transcription" => MessageKind::FinalTranscription,
    "translated_transcription" => MessageKind::FinalTranscription,
    "output_audio_data" => MessageKind::Audio,
    "error" => MessageKind::Error,
};

/// Classify a raw JSON frame string.
///
/// Text that is not a JSON object at all is a [`ProtocolError::MalformedPayload`].
pub fn classify_str(raw: &str) -> ProtocolResult<ProtocolMessage> {
    let frame: Value =
        serde_json::from_str(raw).map_err(|e| ProtocolError::MalformedPayload(e.to_string()))?;
    classify_frame(&frame)
}

/// Classify a parsed frame into the matching [`ProtocolMessage`] variant.
///
/// The frame must carry a string `message_type` tag; the nested `data` mapping
/// is optional and variant-specific.
pub fn classify_frame(frame: &Value) -> ProtocolResult<ProtocolMessage> {
    let tag = frame
        .get("message_type")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            ProtocolError::Validation("frame is missing a string message_type tag".to_string())
        })?;
    let data = frame.get("data").cloned().unwrap_or(Value::Null);

    let Some(kind) = MESSAGE_KINDS.get(tag) else {
        debug!(message_type = %tag, "unrecognized message type, classifying as generic");
        return Ok(ProtocolMessage::Generic(GenericMessage {
            message_type: tag.to_string(),
            payload: data,
        }));
    };

    match kind {
        MessageKind::Task => Ok(ProtocolMessage::Task(TaskMessage {
            message_type: tag.to_string(),
            status: data
                .get("status")
                .and_then(Value::as_str)
                .map(str::to_string),
            payload: data,
        })),
        MessageKind::PartialTranscription | MessageKind::FinalTranscription => {
            let is_partial = *kind == MessageKind::PartialTranscription;
            classify_transcription(tag, &data, is_partial)
        }
        MessageKind::Audio => {
            let encoded = data.get("data").and_then(Value::as_str).ok_or_else(|| {
                ProtocolError::Validation(format!("{tag} frame is missing data.data"))
            })?;
            Ok(ProtocolMessage::Audio(AudioMessage::from_base64(
                tag, encoded,
            )?))
        }
        MessageKind::Error => Ok(ProtocolMessage::Error(ErrorMessage {
            message_type: tag.to_string(),
            error: data
                .get("error")
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    ProtocolError::Validation(format!("{tag} frame is missing data.error"))
                })?
                .to_string(),
            details: data
                .get("details")
                .and_then(Value::as_str)
                .map(str::to_string),
        })),
    }
}

fn classify_transcription(
    tag: &str,
    data: &Value,
    is_partial: bool,
) -> ProtocolResult<ProtocolMessage> {
    let body = data.get("transcription").ok_or_else(|| {
        ProtocolError::Validation(format!("{tag} frame is missing data.transcription"))
    })?;

    let transcription_id = body
        .get("transcription_id")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            ProtocolError::Validation(format!("{tag} frame is missing transcription_id"))
        })?;
    let language: Language = body
        .get("language")
        .and_then(Value::as_str)
        .ok_or_else(|| ProtocolError::Validation(format!("{tag} frame is missing language")))?
        .parse()?;
    let text = body.get("text").and_then(Value::as_str).unwrap_or_default();

    Ok(ProtocolMessage::Transcription(TranscriptionMessage::new(
        tag,
        transcription_id,
        language,
        text,
        is_partial,
    )?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::prelude::*;
    use serde_json::json;

    #[test]
    fn test_classify_partial_transcription() {
        let frame = json!({
            "message_type": "partial_transcription",
            "data": {
                "transcription": {
                    "transcription_id": "utt_42",
                    "language": "es",
                    "text": "hola mun"
                }
            }
        });
        match classify_frame(&frame).unwrap() {
            ProtocolMessage::Transcription(t) => {
                assert_eq!(t.transcription_id, "utt_42");
                assert_eq!(t.language, Language::Es);
                assert_eq!(t.text, "hola mun");
                assert!(t.is_partial);
            }
            other => panic!("expected Transcription, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_validated_transcription_is_final() {
        let frame = json!({
            "message_type": "validated_transcription",
            "data": {
                "transcription": {
                    "transcription_id": "utt_42",
                    "language": "es",
                    "text": "hola mundo"
                }
            }
        });
        match classify_frame(&frame).unwrap() {
            ProtocolMessage::Transcription(t) => assert!(!t.is_partial),
            other => panic!("expected Transcription, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_audio_decodes_base64() {
        let raw = vec![1u8, 2, 3, 4];
        let frame = json!({
            "message_type": "output_audio_data",
            "data": { "data": BASE64_STANDARD.encode(&raw) }
        });
        match classify_frame(&frame).unwrap() {
            ProtocolMessage::Audio(a) => {
                assert_eq!(&a.audio_data[..], &raw[..]);
                assert_eq!(a.audio_size(), 4);
            }
            other => panic!("expected Audio, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_audio_malformed_base64_fails() {
        let frame = json!({
            "message_type": "output_audio_data",
            "data": { "data": "%%%" }
        });
        assert!(matches!(
            classify_frame(&frame).unwrap_err(),
            ProtocolError::MalformedPayload(_)
        ));
    }

    #[test]
    fn test_classify_error_frame() {
        let frame = json!({
            "message_type": "error",
            "data": { "error": "quota exceeded", "details": "retry after 60s" }
        });
        match classify_frame(&frame).unwrap() {
            ProtocolMessage::Error(e) => {
                assert_eq!(e.error, "quota exceeded");
                assert_eq!(e.details.as_deref(), Some("retry after 60s"));
            }
            other => panic!("expected Error, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_error_frame_without_description_fails() {
        let frame = json!({
            "message_type": "error",
            "data": { "details": "no description here" }
        });
        assert!(matches!(
            classify_frame(&frame).unwrap_err(),
            ProtocolError::Validation(_)
        ));
    }

    #[test]
    fn test_classify_task_frame() {
        let frame = json!({
            "message_type": "current_task",
            "data": { "status": "running", "task_id": "t1" }
        });
        match classify_frame(&frame).unwrap() {
            ProtocolMessage::Task(t) => {
                assert_eq!(t.status.as_deref(), Some("running"));
                assert_eq!(t.payload["task_id"], "t1");
            }
            other => panic!("expected Task, got {other:?}"),
        }
    }

    #[test]
    fn test_unrecognized_tag_degrades_to_generic() {
        let frame = json!({
            "message_type": "pipeline_timings",
            "data": { "total_ms": 120 }
        });
        match classify_frame(&frame).unwrap() {
            ProtocolMessage::Generic(g) => {
                assert_eq!(g.message_type, "pipeline_timings");
                assert_eq!(g.payload["total_ms"], 120);
            }
            other => panic!("expected Generic, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_language_is_hard_failure() {
        let frame = json!({
            "message_type": "partial_transcription",
            "data": {
                "transcription": {
                    "transcription_id": "utt_1",
                    "language": "xx",
                    "text": "?"
                }
            }
        });
        assert!(matches!(
            classify_frame(&frame).unwrap_err(),
            ProtocolError::UnknownLanguage(_)
        ));
    }

    #[test]
    fn test_missing_message_type_is_validation_error() {
        let frame = json!({ "data": {} });
        assert!(matches!(
            classify_frame(&frame).unwrap_err(),
            ProtocolError::Validation(_)
        ));
    }

    #[test]
    fn test_classify_str_rejects_non_json() {
        assert!(matches!(
            classify_str("not json").unwrap_err(),
            ProtocolError::MalformedPayload(_)
        ));
    }

    #[test]
    fn test_classify_str_parses_frames() {
        let raw = r#"{"message_type": "session_ended", "data": null}"#;
        match classify_str(raw).unwrap() {
            ProtocolMessage::Generic(g) => assert_eq!(g.message_type, "session_ended"),
            other => panic!("expected Generic, got {other:?}"),
        }
    }
}
