//! Message sink seam between protocol and transport
//!
//! The synthesis loop only ever pushes messages into an [`OscSink`]; the UDP
//! transport implements it for real sends, and [`MemorySink`] stands in for
//! simulated runs.

use std::future::Future;
use std::sync::Mutex;

use vmcast_core::VmcastResult;

use crate::OscMessage;

/// Best-effort outbound message sink
///
/// No acknowledgement, no retry: a failed send is a transport failure and
/// surfaces to the caller.
pub trait OscSink {
    /// Send one message
    fn send(&self, msg: &OscMessage) -> impl Future<Output = VmcastResult<()>> + Send;
}

/// Sink that records every message in order
///
/// Used by simulated transmission runs and protocol tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    messages: Mutex<Vec<OscMessage>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything sent so far
    pub fn messages(&self) -> Vec<OscMessage> {
        self.messages.lock().unwrap().clone()
    }

    /// Drain everything sent so far
    pub fn take(&self) -> Vec<OscMessage> {
        std::mem::take(&mut self.messages.lock().unwrap())
    }
}

impl OscSink for MemorySink {
    async fn send(&self, msg: &OscMessage) -> VmcastResult<()> {
        self.messages.lock().unwrap().push(msg.clone());
        Ok(())
    }
}
