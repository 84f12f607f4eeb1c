//! PCM format conversion on the audio path.
//!
//! All routines exchange raw 16-bit signed little-endian PCM byte sequences;
//! sample count = byte length / 2. Capture runs at 48kHz, the transport stage
//! at 24kHz; the session orchestrator invokes these converters at the edges of
//! both paths.

pub mod convert;

pub use convert::{CAPTURE_SAMPLE_RATE, TRANSPORT_SAMPLE_RATE};
