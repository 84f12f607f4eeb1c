pub mod config;
pub mod core;
pub mod init;

// Re-export commonly used items for convenience
pub use config::ClientConfig;
pub use crate::core::audio::convert;
pub use crate::core::buffer::{BufferError, BufferResult, ChunkReader, ChunkWriter, WriterConfig};
pub use crate::core::protocol::{
    DedupKey, Language, ProtocolError, ProtocolMessage, ProtocolResult, classify_frame,
    classify_str,
};
pub use crate::core::session::{DedupOutcome, DispatchError, FrameDispatcher, TranscriptionDeduper};
