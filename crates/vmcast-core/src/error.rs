//! Error types for vmcast

use thiserror::Error;

/// Core vmcast errors
#[derive(Error, Debug)]
pub enum VmcastError {
    // Wire errors
    #[error("Invalid OSC address: {0}")]
    InvalidAddress(String),

    #[error("Buffer too short: expected {expected}, got {actual}")]
    BufferTooShort { expected: usize, actual: usize },

    #[error("Unknown OSC type tag: {0:#04x}")]
    UnknownTypeTag(u8),

    #[error("Invalid wire format: {0}")]
    InvalidWireFormat(String),

    // Transport errors
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Result type for vmcast operations
pub type VmcastResult<T> = Result<T, VmcastError>;
