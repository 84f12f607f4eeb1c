//! Core runtime components for a speech-translation session.
//!
//! The session orchestrator wires these together: microphone audio flows
//! through a [`buffer::ChunkWriter`], transferred chunks are drained into a
//! [`buffer::ChunkReader`] feeding the network transport, and inbound protocol
//! frames are classified by [`protocol`] into typed messages that
//! [`session::FrameDispatcher`] forwards to the application.

pub mod audio;
pub mod buffer;
pub mod protocol;
pub mod session;
