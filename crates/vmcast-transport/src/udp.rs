//! Outbound UDP sender
//!
//! Best-effort datagrams, no response channel. When a mirror destination is
//! configured every message is duplicated there, so a local listener can
//! inspect exactly what the receiver gets.

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};

use tokio::net::UdpSocket;

use vmcast_core::{VmcastError, VmcastResult};
use vmcast_osc::{OscMessage, OscSink};

/// UDP sink for OSC messages, with optional mirroring
pub struct UdpOscSender {
    socket: UdpSocket,
    primary: SocketAddr,
    mirror: Option<SocketAddr>,
}

impl UdpOscSender {
    /// Bind an ephemeral local port aimed at `primary`
    pub async fn connect(primary: SocketAddr, mirror: Option<SocketAddr>) -> VmcastResult<Self> {
        let bind_addr: SocketAddr = if primary.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| VmcastError::Transport(e.to_string()))?;

        Ok(UdpOscSender {
            socket,
            primary,
            mirror,
        })
    }

    /// Primary destination
    pub fn primary(&self) -> SocketAddr {
        self.primary
    }

    /// Mirror destination, if configured
    pub fn mirror(&self) -> Option<SocketAddr> {
        self.mirror
    }
}

impl OscSink for UdpOscSender {
    async fn send(&self, msg: &OscMessage) -> VmcastResult<()> {
        let bytes = msg.encode()?;

        self.socket
            .send_to(&bytes, self.primary)
            .await
            .map_err(|e| VmcastError::Transport(e.to_string()))?;

        if let Some(mirror) = self.mirror {
            self.socket
                .send_to(&bytes, mirror)
                .await
                .map_err(|e| VmcastError::Transport(e.to_string()))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vmcast_osc::OscArg;

    async fn receiver() -> (UdpSocket, SocketAddr) {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        (socket, addr)
    }

    async fn recv_message(socket: &UdpSocket) -> OscMessage {
        let mut buf = [0u8; 1536];
        let (len, _) = socket.recv_from(&mut buf).await.unwrap();
        OscMessage::decode(&buf[..len]).unwrap()
    }

    #[tokio::test]
    async fn test_send_reaches_primary() {
        let (rx, addr) = receiver().await;
        let sender = UdpOscSender::connect(addr, None).await.unwrap();

        let msg = OscMessage::with_args("/VMC/Ext/OK", vec![OscArg::Int(1)]);
        sender.send(&msg).await.unwrap();

        assert_eq!(recv_message(&rx).await, msg);
    }

    #[tokio::test]
    async fn test_mirror_gets_a_copy() {
        let (primary_rx, primary_addr) = receiver().await;
        let (mirror_rx, mirror_addr) = receiver().await;
        let sender = UdpOscSender::connect(primary_addr, Some(mirror_addr))
            .await
            .unwrap();

        let msg = OscMessage::with_args("/VMC/Ext/T", vec![OscArg::Float(1.25)]);
        sender.send(&msg).await.unwrap();

        assert_eq!(recv_message(&primary_rx).await, msg);
        assert_eq!(recv_message(&mirror_rx).await, msg);
    }
}
