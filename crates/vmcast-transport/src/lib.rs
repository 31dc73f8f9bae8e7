//! vmcast Transport Layer - UDP plumbing around the synthesis core
//!
//! This crate provides:
//! - An outbound UDP sender with an optional transparent mirror destination
//! - A background diagnostic listener that logs every inbound OSC datagram
//! - A one-shot self-test probe aimed at the local listener
//!
//! The listener shares nothing in-process with the sender; the two only ever
//! meet on the network.

pub mod listener;
pub mod udp;

pub use listener::*;
pub use udp::*;
