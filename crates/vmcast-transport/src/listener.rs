//! Diagnostic listener
//!
//! An independent background task that logs every inbound OSC datagram.
//! It owns its socket, shares no state with the sender, and must never take
//! the synthesis loop down: every failure here is logged and skipped.

use std::net::SocketAddr;

use tokio::net::UdpSocket;
use tokio::task::JoinHandle;

use vmcast_core::{unix_time_secs, VmcastError, VmcastResult};
use vmcast_osc::{OscArg, OscMessage, OscSink};

use crate::UdpOscSender;

/// Largest datagram the listener will read
pub const MAX_DATAGRAM_SIZE: usize = 1536;

/// Address probed by [`send_selftest`]
pub const ADDR_SELFTEST: &str = "/SELFTEST";

/// Bind `addr` and spawn the logging loop
///
/// Binding errors surface to the caller; once running, the task only ever
/// logs and continues.
pub async fn spawn_listener(addr: SocketAddr) -> VmcastResult<JoinHandle<()>> {
    let socket = UdpSocket::bind(addr)
        .await
        .map_err(|e| VmcastError::Transport(e.to_string()))?;

    let local = socket
        .local_addr()
        .map_err(|e| VmcastError::Transport(e.to_string()))?;
    tracing::info!(%local, "listening for OSC datagrams");

    Ok(tokio::spawn(async move {
        let mut buf = vec![0u8; MAX_DATAGRAM_SIZE];
        loop {
            match socket.recv_from(&mut buf).await {
                Ok((len, from)) => match OscMessage::decode(&buf[..len]) {
                    Ok(msg) => tracing::info!(%from, "{}", msg),
                    Err(e) => tracing::warn!(%from, len, "undecodable datagram: {}", e),
                },
                Err(e) => {
                    tracing::warn!("UDP receive error: {}", e);
                }
            }
        }
    }))
}

/// Fire one `/SELFTEST ["ok", unix_time]` datagram at the local listener
pub async fn send_selftest(listen_port: u16) -> VmcastResult<()> {
    let dest: SocketAddr = ([127, 0, 0, 1], listen_port).into();
    let sender = UdpOscSender::connect(dest, None).await?;
    sender
        .send(&OscMessage::with_args(
            ADDR_SELFTEST,
            vec![OscArg::from("ok"), OscArg::Float(unix_time_secs() as f32)],
        ))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_listener_binds_ephemeral_port() {
        let handle = spawn_listener("127.0.0.1:0".parse().unwrap()).await.unwrap();
        handle.abort();
    }

    #[tokio::test]
    async fn test_selftest_packet_shape() {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let port = socket.local_addr().unwrap().port();

        send_selftest(port).await.unwrap();

        let mut buf = [0u8; MAX_DATAGRAM_SIZE];
        let (len, _) = socket.recv_from(&mut buf).await.unwrap();
        let msg = OscMessage::decode(&buf[..len]).unwrap();

        assert_eq!(msg.address, ADDR_SELFTEST);
        assert_eq!(msg.args[0], OscArg::Str("ok".into()));
        assert!(matches!(msg.args[1], OscArg::Float(t) if t > 0.0));
    }
}
