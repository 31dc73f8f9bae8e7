//! vmcast OSC layer - Minimal OSC 1.0 messages
//!
//! This is NOT a general OSC library. It covers exactly the subset the VMC
//! surface needs: messages with `i` (int32), `f` (float32) and `s` (string)
//! arguments, encoded big-endian with 4-byte alignment. Bundles are out of
//! scope; the sender never emits them and the listener reports them as
//! malformed datagrams.

pub mod message;
pub mod sink;

pub use message::*;
pub use sink::*;
